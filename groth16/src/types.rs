//! JSON-friendly transport types for proofs and public inputs.

use crate::errors::ZkError;
use crate::field::{map_serialization_error, Regular};
use crate::groth16::{deserialize_proof, serialize_proof, Proof};
use ark_serialize::CanonicalSerialize;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// JSON-friendly representation of a field element.
///
/// Hex of the element's canonical little-endian bytes, the same bytes as the witness wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrHex {
    pub hex: String,
}

impl FrHex {
    pub fn from_regular(x: &Regular) -> Result<Self, ZkError> {
        let mut bytes = Vec::new();
        x.to_mont()
            .serialize_compressed(&mut bytes)
            .map_err(map_serialization_error)?;
        Ok(Self { hex: hex::encode(bytes) })
    }

    pub fn to_regular(&self) -> Result<Regular, ZkError> {
        let bytes = hex::decode(&self.hex).map_err(|e| ZkError::Serialization(format!("invalid hex: {e}")))?;
        let x = crate::codec::read_full(&bytes)?;
        match x.as_slice() {
            [x] => Ok(Regular::from_mont(x)),
            _ => Err(ZkError::Serialization(format!("expected one element, got {}", x.len()))),
        }
    }
}

/// A proof together with the public inputs it was produced for.
///
/// `public_inputs` omits the one wire, like the binary public witness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    pub proof_b64: String,
    pub public_inputs: Vec<FrHex>,
}

impl ProofBundle {
    pub fn new(proof: &Proof, public: &[Regular]) -> Result<Self, ZkError> {
        let b64 = base64::engine::general_purpose::STANDARD;
        Ok(Self {
            proof_b64: b64.encode(serialize_proof(proof)?),
            public_inputs: public
                .iter()
                .skip(1)
                .map(FrHex::from_regular)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Decode into a proof and a public witness with the one wire restored.
    pub fn decode(&self) -> Result<(Proof, Vec<Regular>), ZkError> {
        let b64 = base64::engine::general_purpose::STANDARD;
        let bytes = b64
            .decode(&self.proof_b64)
            .map_err(|e| ZkError::Serialization(format!("invalid base64: {e}")))?;
        let proof = deserialize_proof(&bytes)?;

        let mut public = Vec::with_capacity(self.public_inputs.len() + 1);
        public.push(Regular::one());
        for x in &self.public_inputs {
            public.push(x.to_regular()?);
        }
        Ok((proof, public))
    }
}
