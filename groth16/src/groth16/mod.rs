//! Groth16 over BN254: setup, prove, verify.
//!
//! SECURITY NOTE: a proving/verifying key pair is bound to the R1CS it was generated from. Both
//! keys record the R1CS digest and their expected sizes, and every entry point checks them before
//! doing any curve arithmetic.

#[cfg(feature = "insecure-dummy-setup")]
pub mod dummy;
pub mod keys;
pub mod prover;
pub mod setup;
pub mod verifier;

pub use keys::{Proof, ProvingKey, VerifyingKey};
pub use prover::{prove, prove_full};
pub use setup::setup;
pub use verifier::{verify, verify_named, verify_witness};

use crate::errors::ZkError;
use crate::field::map_serialization_error;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

fn to_bytes<T: CanonicalSerialize>(value: &T) -> Result<Vec<u8>, ZkError> {
    let mut out = Vec::with_capacity(value.compressed_size());
    value
        .serialize_compressed(&mut out)
        .map_err(map_serialization_error)?;
    Ok(out)
}

fn from_bytes<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T, ZkError> {
    T::deserialize_compressed(bytes).map_err(map_serialization_error)
}

/// Serialize a proving key to bytes.
pub fn serialize_pk(pk: &ProvingKey) -> Result<Vec<u8>, ZkError> {
    to_bytes(pk)
}

pub fn deserialize_pk(bytes: &[u8]) -> Result<ProvingKey, ZkError> {
    from_bytes(bytes)
}

pub fn serialize_vk(vk: &VerifyingKey) -> Result<Vec<u8>, ZkError> {
    to_bytes(vk)
}

pub fn deserialize_vk(bytes: &[u8]) -> Result<VerifyingKey, ZkError> {
    from_bytes(bytes)
}

pub fn serialize_proof(proof: &Proof) -> Result<Vec<u8>, ZkError> {
    to_bytes(proof)
}

/// Points are checked to be on the curve and in the right subgroup.
pub fn deserialize_proof(bytes: &[u8]) -> Result<Proof, ZkError> {
    from_bytes(bytes)
}
