//! Structured reference string and proof types.

use crate::errors::ZkError;
use crate::r1cs::R1cs;
use ark_bn254::{G1Affine, G2Affine};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// A Groth16 proof: two G1 points and one G2 point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

/// Everything the verifier needs. Its size grows with the number of public inputs only.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerifyingKey {
    pub alpha_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub gamma_g2: G2Affine,
    pub delta_g2: G2Affine,
    /// `[(beta*u_i + alpha*v_i + w_i) / gamma]_1` for each public wire, one wire first.
    pub gamma_abc_g1: Vec<G1Affine>,
    /// Ordered names matching `gamma_abc_g1`: `[ONE_WIRE, public...]`.
    pub public_input_names: Vec<String>,
    pub r1cs_digest: [u8; 32],
}

impl VerifyingKey {
    /// Length of the public witness this key accepts (one wire included).
    pub fn nb_public_inputs(&self) -> usize {
        self.gamma_abc_g1.len()
    }
}

/// Everything the prover needs, indexed by wire.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProvingKey {
    pub alpha_g1: G1Affine,
    pub beta_g1: G1Affine,
    pub delta_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub delta_g2: G2Affine,
    /// `[u_i(tau)]_1` for every wire.
    pub a_query: Vec<G1Affine>,
    /// `[v_i(tau)]_1` for every wire.
    pub b_g1_query: Vec<G1Affine>,
    /// `[v_i(tau)]_2` for every wire.
    pub b_g2_query: Vec<G2Affine>,
    /// `[tau^i * Z(tau) / delta]_1` for `i < domain_size - 1`.
    pub h_query: Vec<G1Affine>,
    /// `[(beta*u_i + alpha*v_i + w_i) / delta]_1` for every non-public wire, in wire order.
    pub l_query: Vec<G1Affine>,
    pub domain_size: u64,
    pub r1cs_digest: [u8; 32],
}

impl ProvingKey {
    /// Fail fast when the key was not produced from this constraint system.
    pub fn check(&self, r1cs: &R1cs) -> Result<(), ZkError> {
        if self.r1cs_digest != r1cs.digest() {
            return Err(ZkError::KeyMismatch("proving key was derived from a different r1cs".to_string()));
        }
        let nb_wires = r1cs.nb_wires();
        let nb_private = nb_wires - r1cs.public_wires().len();
        if self.a_query.len() != nb_wires
            || self.b_g1_query.len() != nb_wires
            || self.b_g2_query.len() != nb_wires
            || self.l_query.len() != nb_private
        {
            return Err(ZkError::KeyMismatch(format!(
                "proving key has {} wire elements and {} private elements, r1cs has {} and {}",
                self.a_query.len(),
                self.l_query.len(),
                nb_wires,
                nb_private
            )));
        }
        if self.h_query.len() as u64 + 1 != self.domain_size {
            return Err(ZkError::KeyMismatch(format!(
                "h query has {} elements for a domain of {}",
                self.h_query.len(),
                self.domain_size
            )));
        }
        Ok(())
    }
}
