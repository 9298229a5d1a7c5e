//! Circuit-specific trusted setup.
//!
//! SECURITY NOTE: the scalars sampled here (alpha, beta, gamma, delta, tau) are toxic waste.
//! Anyone who learns them can forge proofs. They live only for the duration of [`setup`]. In
//! production the randomness should come from an MPC ceremony; that ceremony is out of scope here.

use super::keys::{ProvingKey, VerifyingKey};
use crate::errors::ZkError;
use crate::qap::{self, Domain};
use crate::r1cs::R1cs;
use ark_bn254::{Fr, G1Projective, G2Projective};
use ark_ec::{CurveGroup, PrimeGroup};
use ark_ff::{Field, Zero};
use ark_poly::EvaluationDomain;
use ark_std::UniformRand;
use rand::{CryptoRng, Rng, RngCore};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, info_span};

struct ToxicWaste {
    alpha: Fr,
    beta: Fr,
    gamma: Fr,
    delta: Fr,
    tau: Fr,
}

impl ToxicWaste {
    fn sample<R: Rng>(rng: &mut R, domain: &Domain) -> Self {
        let mut tau = nonzero(rng);
        // tau on the domain would make Z(tau) = 0 and the h query degenerate.
        while domain.evaluate_vanishing_polynomial(tau).is_zero() {
            tau = nonzero(rng);
        }
        Self {
            alpha: nonzero(rng),
            beta: nonzero(rng),
            gamma: nonzero(rng),
            delta: nonzero(rng),
            tau,
        }
    }
}

fn nonzero<R: Rng>(rng: &mut R) -> Fr {
    loop {
        let x = Fr::rand(rng);
        if !x.is_zero() {
            return x;
        }
    }
}

/// `[s]G` for every scalar, computed in parallel and normalized in one batch.
pub(crate) fn batch_mul<G: CurveGroup>(base: G, scalars: &[G::ScalarField]) -> Vec<G::Affine> {
    let points: Vec<G> = scalars.par_iter().map(|s| base * s).collect();
    G::normalize_batch(&points)
}

/// Generate a key pair for `r1cs` from caller-supplied randomness.
pub fn setup<R: RngCore + CryptoRng>(
    r1cs: &R1cs,
    rng: &mut R,
) -> Result<(ProvingKey, VerifyingKey), ZkError> {
    let _span = info_span!("groth16_setup", constraints = r1cs.nb_constraints()).entered();
    let start = Instant::now();

    let domain = qap::domain_for(r1cs)?;
    let toxic = ToxicWaste::sample(rng, &domain);
    let keys = generate(r1cs, &domain, &toxic);

    info!(
        wires = r1cs.nb_wires(),
        public = r1cs.public_wires().len(),
        domain = domain.size(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "setup done"
    );
    Ok(keys)
}

fn generate(r1cs: &R1cs, domain: &Domain, t: &ToxicWaste) -> (ProvingKey, VerifyingKey) {
    let qap = qap::evaluate_at(r1cs, domain, t.tau);
    debug!(domain = domain.size(), "qap evaluated at tau");

    let gamma_inv = t.gamma.inverse().expect("gamma is sampled non-zero");
    let delta_inv = t.delta.inverse().expect("delta is sampled non-zero");

    let public = r1cs.public_wires();
    let combined = |i: usize| t.beta * qap.a[i] + t.alpha * qap.b[i] + qap.c[i];

    let gamma_abc: Vec<Fr> = public.clone().map(|i| combined(i) * gamma_inv).collect();
    let l: Vec<Fr> = (0..r1cs.nb_wires())
        .filter(|i| !public.contains(i))
        .map(|i| combined(i) * delta_inv)
        .collect();

    let zt_over_delta = qap.zt * delta_inv;
    let h: Vec<Fr> = std::iter::successors(Some(zt_over_delta), |acc| Some(*acc * t.tau))
        .take(domain.size() - 1)
        .collect();

    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    let ((a_query, b_g1_query), (b_g2_query, (h_query, l_query))) = rayon::join(
        || rayon::join(|| batch_mul(g1, &qap.a), || batch_mul(g1, &qap.b)),
        || {
            rayon::join(
                || batch_mul(g2, &qap.b),
                || rayon::join(|| batch_mul(g1, &h), || batch_mul(g1, &l)),
            )
        },
    );
    let gamma_abc_g1 = batch_mul(g1, &gamma_abc);

    let alpha_g1 = (g1 * t.alpha).into_affine();
    let beta_g1 = (g1 * t.beta).into_affine();
    let delta_g1 = (g1 * t.delta).into_affine();
    let beta_g2 = (g2 * t.beta).into_affine();
    let gamma_g2 = (g2 * t.gamma).into_affine();
    let delta_g2 = (g2 * t.delta).into_affine();

    let vk = VerifyingKey {
        alpha_g1,
        beta_g2,
        gamma_g2,
        delta_g2,
        gamma_abc_g1,
        public_input_names: r1cs.public_input_names(),
        r1cs_digest: r1cs.digest(),
    };

    let pk = ProvingKey {
        alpha_g1,
        beta_g1,
        delta_g1,
        beta_g2,
        delta_g2,
        a_query,
        b_g1_query,
        b_g2_query,
        h_query,
        l_query,
        domain_size: domain.size() as u64,
        r1cs_digest: r1cs.digest(),
    };

    (pk, vk)
}
