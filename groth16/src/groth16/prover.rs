//! Proof generation.

use super::keys::{Proof, ProvingKey};
use crate::errors::ZkError;
use crate::qap;
use crate::r1cs::R1cs;
use crate::witness::{self, Witness};
use ark_bn254::{Fr, G1Projective, G2Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_poly::EvaluationDomain;
use ark_std::UniformRand;
use rand::{CryptoRng, RngCore};
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Prove that `witness` satisfies `r1cs`.
///
/// `rng` supplies the blinding scalars `r` and `s`; they are fresh for every call.
pub fn prove<W: Witness + ?Sized, R: RngCore + CryptoRng>(
    r1cs: &R1cs,
    pk: &ProvingKey,
    witness: &W,
    rng: &mut R,
) -> Result<Proof, ZkError> {
    let full = witness::full(witness)?;
    prove_full(r1cs, pk, &full, rng)
}

/// Prove from an already extracted (or decoded) full witness `[secret | one | public]`.
pub fn prove_full<R: RngCore + CryptoRng>(
    r1cs: &R1cs,
    pk: &ProvingKey,
    full: &[Fr],
    rng: &mut R,
) -> Result<Proof, ZkError> {
    let _span = info_span!("groth16_prove", constraints = r1cs.nb_constraints()).entered();
    let start = Instant::now();

    pk.check(r1cs)?;
    let domain = qap::domain_for(r1cs)?;
    if domain.size() as u64 != pk.domain_size {
        return Err(ZkError::KeyMismatch(format!(
            "proving key domain is {}, r1cs needs {}",
            pk.domain_size,
            domain.size()
        )));
    }

    let wires = r1cs.solve(full)?;
    let h = qap::quotient(r1cs, &domain, &wires)?;
    debug!(domain = domain.size(), "quotient computed");

    let public = r1cs.public_wires();
    let private: Vec<Fr> = wires
        .iter()
        .enumerate()
        .filter(|(i, _)| !public.contains(i))
        .map(|(_, w)| *w)
        .collect();

    let r = Fr::rand(rng);
    let s = Fr::rand(rng);

    let ((a_acc, b_g1_acc), (b_g2_acc, (h_acc, l_acc))) = rayon::join(
        || {
            rayon::join(
                || G1Projective::msm_unchecked(&pk.a_query, &wires),
                || G1Projective::msm_unchecked(&pk.b_g1_query, &wires),
            )
        },
        || {
            rayon::join(
                || G2Projective::msm_unchecked(&pk.b_g2_query, &wires),
                || {
                    rayon::join(
                        || G1Projective::msm_unchecked(&pk.h_query, &h),
                        || G1Projective::msm_unchecked(&pk.l_query, &private),
                    )
                },
            )
        },
    );

    let delta_g1: G1Projective = pk.delta_g1.into();
    let delta_g2: G2Projective = pk.delta_g2.into();

    let a = G1Projective::from(pk.alpha_g1) + a_acc + delta_g1 * r;
    let b_g1 = G1Projective::from(pk.beta_g1) + b_g1_acc + delta_g1 * s;
    let b = G2Projective::from(pk.beta_g2) + b_g2_acc + delta_g2 * s;
    let c = h_acc + l_acc + a * s + b_g1 * r - delta_g1 * (r * s);

    let proof = Proof {
        a: a.into_affine(),
        b: b.into_affine(),
        c: c.into_affine(),
    };

    info!(
        wires = wires.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "proof generated"
    );
    Ok(proof)
}
