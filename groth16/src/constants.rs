//! Crate-wide constants shared by the witness layer and the protocol.

/// Number of 64-bit limbs in a BN254 scalar field element.
pub const LIMBS: usize = 4;

/// Serialized width of one field element on the witness wire format.
///
/// Every element is written as `LIMBS * 8` little-endian canonical bytes, with no length prefix
/// and no padding between elements.
pub const ELEMENT_WIDTH: usize = LIMBS * 8;

/// Reserved name of the implicit one-constant (the "one wire").
///
/// It never appears in user declarations and is never serialized on the public witness wire
/// format; readers reconstruct it at index 0.
pub const ONE_WIRE: &str = "ONE_WIRE";

/// Separator used when flattening nested witness declarations into leaf names.
pub const NAME_SEPARATOR: &str = "_";

/// Domain separator mixed into the R1CS structural digest.
pub const R1CS_DIGEST_DOMAIN: &[u8] = b"groth16-backend/r1cs/v1";
