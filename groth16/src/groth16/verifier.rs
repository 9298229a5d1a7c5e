//! Proof verification.
//!
//! Checks `e(A, B) == e(alpha, beta) * e(IC, gamma) * e(C, delta)` where
//! `IC = sum(x_i * gamma_abc_i)` over the public witness `x` (one wire first).

use super::keys::{Proof, VerifyingKey};
use crate::errors::ZkError;
use crate::field::{Regular, Value};
use crate::input::parse_public_input;
use crate::witness::{self, Witness};
use ark_bn254::{Bn254, Fr, G1Projective};
use ark_ec::pairing::Pairing;
use ark_ec::{CurveGroup, VariableBaseMSM};
use std::collections::HashMap;
use tracing::debug;

/// Verify `proof` against a public witness in Regular form (`[one | public...]`).
///
/// Returns `Ok(false)` for a proof that does not verify. A public witness whose length does not
/// match the key is an error, never a verdict.
pub fn verify(proof: &Proof, vk: &VerifyingKey, public: &[Regular]) -> Result<bool, ZkError> {
    if public.len() != vk.nb_public_inputs() {
        return Err(ZkError::KeyMismatch(format!(
            "verifying key expects {} public inputs (one wire included), got {}",
            vk.nb_public_inputs(),
            public.len()
        )));
    }

    let scalars: Vec<Fr> = public.iter().map(Regular::to_mont).collect();
    let ic = G1Projective::msm_unchecked(&vk.gamma_abc_g1, &scalars).into_affine();

    let (lhs, rhs) = rayon::join(
        || {
            Bn254::multi_pairing(
                [proof.a, -ic, -proof.c],
                [proof.b, vk.gamma_g2, vk.delta_g2],
            )
        },
        || Bn254::pairing(vk.alpha_g1, vk.beta_g2),
    );

    let ok = lhs == rhs;
    debug!(public = public.len(), ok, "proof verified");
    Ok(ok)
}

/// Verify against the public part of a structured witness.
pub fn verify_witness<W: Witness + ?Sized>(
    proof: &Proof,
    vk: &VerifyingKey,
    witness: &W,
) -> Result<bool, ZkError> {
    verify(proof, vk, &witness::public(witness)?)
}

/// Verify against named public inputs, ordered by the names stored in the key.
pub fn verify_named(
    proof: &Proof,
    vk: &VerifyingKey,
    inputs: &HashMap<String, Value>,
) -> Result<bool, ZkError> {
    let public = parse_public_input(&vk.public_input_names, inputs)?;
    verify(proof, vk, &public)
}
