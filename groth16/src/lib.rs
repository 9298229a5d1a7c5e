//! Groth16 proving backend over BN254.
//!
//! This crate contains:
//! - The witness model: ordered secret/public variables, extraction into field-element vectors,
//!   and the fixed-width binary witness format.
//! - A small R1CS front-end and solver.
//! - The Groth16 protocol: QAP reduction, trusted setup, prover and verifier.
//! - Serialization helpers for transporting keys, proofs and public inputs.

pub mod codec;
pub mod constants;
pub mod errors;
pub mod field;
pub mod groth16;
pub mod input;
pub mod qap;
pub mod r1cs;
pub mod types;
pub mod witness;

pub use errors::ZkError;
pub use field::{Regular, Value};
pub use input::parse_public_input;
pub use r1cs::{R1cs, R1csBuilder};
pub use witness::{Assignment, Variable, Visibility, Witness};
