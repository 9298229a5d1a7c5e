//! Benchmark-only key generation.
//!
//! IMPORTANT: keys built here are NOT sound. Every query point is the same random point, so the
//! resulting proofs are meaningless and there is no verifying key at all. The key is wrapped in
//! its own type so it can never be handed to [`super::prove`] by mistake.

use super::keys::{Proof, ProvingKey};
use super::prover;
use crate::errors::ZkError;
use crate::qap;
use crate::r1cs::R1cs;
use crate::witness::Witness;
use ark_bn254::{G1Projective, G2Projective};
use ark_ec::CurveGroup;
use ark_poly::EvaluationDomain;
use ark_std::UniformRand;
use rand::{CryptoRng, RngCore};
use tracing::warn;

/// A correctly shaped, cryptographically useless proving key.
#[derive(Clone, Debug)]
pub struct InsecureProvingKey(ProvingKey);

impl InsecureProvingKey {
    /// Run the real prover against the dummy key. Only the timing is meaningful.
    pub fn prove<W: Witness + ?Sized, R: RngCore + CryptoRng>(
        &self,
        r1cs: &R1cs,
        witness: &W,
        rng: &mut R,
    ) -> Result<Proof, ZkError> {
        prover::prove(r1cs, &self.0, witness, rng)
    }
}

/// Build a proving key with the right sizes for `r1cs` without computing any query.
pub fn insecure_dummy_setup<R: RngCore>(r1cs: &R1cs, rng: &mut R) -> Result<InsecureProvingKey, ZkError> {
    warn!("dummy setup: the proving key is insecure and must only be used for benchmarks");

    let domain = qap::domain_for(r1cs)?;
    let p1 = G1Projective::rand(rng).into_affine();
    let p2 = G2Projective::rand(rng).into_affine();

    let nb_wires = r1cs.nb_wires();
    let nb_private = nb_wires - r1cs.public_wires().len();

    Ok(InsecureProvingKey(ProvingKey {
        alpha_g1: p1,
        beta_g1: p1,
        delta_g1: p1,
        beta_g2: p2,
        delta_g2: p2,
        a_query: vec![p1; nb_wires],
        b_g1_query: vec![p1; nb_wires],
        b_g2_query: vec![p2; nb_wires],
        h_query: vec![p1; domain.size() - 1],
        l_query: vec![p1; nb_private],
        domain_size: domain.size() as u64,
        r1cs_digest: r1cs.digest(),
    }))
}
