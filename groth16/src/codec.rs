//! Binary witness format.
//!
//! - full witness: `nb_secret + 1 + nb_public` elements, `[secret | one | public]`
//! - public witness: `nb_public` elements; the one-constant is implicit and NOT on the wire
//!
//! Each element is [`ELEMENT_WIDTH`] bytes. No header, no length prefix, no padding.

use crate::constants::ELEMENT_WIDTH;
use crate::errors::ZkError;
use crate::field::{read_element, write_element, Regular};
use crate::witness::{self, Witness};
use ark_bn254::Fr;
use std::io::Write;

/// Serialize the full witness `[secret | one | public]`.
pub fn write_full<W: Write, T: Witness + ?Sized>(mut sink: W, witness: &T) -> Result<(), ZkError> {
    let v = witness::full(witness)?;
    for x in &v {
        write_element(&mut sink, x)?;
    }
    Ok(())
}

/// Serialize the public witness, skipping the one-constant at index 0.
pub fn write_public<W: Write, T: Witness + ?Sized>(mut sink: W, witness: &T) -> Result<(), ZkError> {
    let v = witness::public(witness)?;
    for x in v.iter().skip(1) {
        write_element(&mut sink, &x.to_mont())?;
    }
    Ok(())
}

/// Encode an already extracted full witness vector.
pub fn encode_full(full: &[Fr]) -> Result<Vec<u8>, ZkError> {
    let mut out = Vec::with_capacity(full.len() * ELEMENT_WIDTH);
    for x in full {
        write_element(&mut out, x)?;
    }
    Ok(out)
}

/// Encode an already extracted public witness vector (index 0 is dropped).
pub fn encode_public(public: &[Regular]) -> Result<Vec<u8>, ZkError> {
    let mut out = Vec::with_capacity(public.len().saturating_sub(1) * ELEMENT_WIDTH);
    for x in public.iter().skip(1) {
        write_element(&mut out, &x.to_mont())?;
    }
    Ok(out)
}

/// Decode `[secret | one | public]`; elements are returned in Montgomery form.
pub fn read_full(bytes: &[u8]) -> Result<Vec<Fr>, ZkError> {
    check_length(bytes)?;
    Ok(bytes.chunks_exact(ELEMENT_WIDTH).map(read_element).collect())
}

/// Decode `[public]` and reconstruct the one-constant at index 0; elements are in Regular form.
pub fn read_public(bytes: &[u8]) -> Result<Vec<Regular>, ZkError> {
    check_length(bytes)?;
    let mut r = Vec::with_capacity(1 + bytes.len() / ELEMENT_WIDTH);
    r.push(Regular::one());
    r.extend(
        bytes
            .chunks_exact(ELEMENT_WIDTH)
            .map(|chunk| Regular::from_mont(&read_element(chunk))),
    );
    Ok(r)
}

fn check_length(bytes: &[u8]) -> Result<(), ZkError> {
    if bytes.len() % ELEMENT_WIDTH != 0 {
        return Err(ZkError::InvalidLength { len: bytes.len(), width: ELEMENT_WIDTH });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::{Assignment, Visibility};

    fn sample() -> Assignment {
        Assignment::new()
            .secret("x", 3u64)
            .public("y", 35u64)
            .secret("z", -1i64)
            .public("w", u128::MAX)
    }

    #[test]
    fn full_round_trip() {
        let w = sample();
        let mut bytes = Vec::new();
        write_full(&mut bytes, &w).unwrap();
        assert_eq!(bytes.len(), 5 * ELEMENT_WIDTH);
        assert_eq!(read_full(&bytes).unwrap(), witness::full(&w).unwrap());
    }

    #[test]
    fn public_round_trip_omits_one_wire() {
        let w = sample();
        let mut bytes = Vec::new();
        write_public(&mut bytes, &w).unwrap();
        assert_eq!(bytes.len(), 2 * ELEMENT_WIDTH);
        assert_eq!(read_public(&bytes).unwrap(), witness::public(&w).unwrap());
    }

    #[test]
    fn encode_helpers_match_writers() {
        let w = sample();
        let mut written = Vec::new();
        write_public(&mut written, &w).unwrap();
        assert_eq!(encode_public(&witness::public(&w).unwrap()).unwrap(), written);

        written.clear();
        write_full(&mut written, &w).unwrap();
        assert_eq!(encode_full(&witness::full(&w).unwrap()).unwrap(), written);
    }

    #[test]
    fn empty_public_blob_is_just_the_one_wire() {
        assert_eq!(read_public(&[]).unwrap(), vec![Regular::one()]);
        assert!(read_full(&[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_truncated_input() {
        let bytes = vec![0u8; ELEMENT_WIDTH + 1];
        assert!(matches!(read_full(&bytes), Err(ZkError::InvalidLength { len, .. }) if len == ELEMENT_WIDTH + 1));
        assert!(matches!(read_public(&bytes), Err(ZkError::InvalidLength { .. })));
    }

    #[test]
    fn writer_propagates_extraction_errors() {
        let w = Assignment::new().declare("x", Visibility::Secret);
        let mut bytes = Vec::new();
        assert!(matches!(write_full(&mut bytes, &w), Err(ZkError::UnassignedVariable(_))));
        assert!(bytes.is_empty());
    }
}
