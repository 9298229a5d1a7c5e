//! Setup, prover and verifier benchmarks on the reference circuit `x^(2^n) == y`.
//!
//! ```bash
//! cargo bench --package groth16-backend --features insecure-dummy-setup --bench groth16
//! ```
//!
//! The prover runs against a dummy key so the measurement is not dominated by setup.

use ark_bn254::Fr;
use ark_ff::Field;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use groth16_backend::groth16::dummy::insecure_dummy_setup;
use groth16_backend::groth16::{prove, setup, verify};
use groth16_backend::{witness, Assignment, R1cs, R1csBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Number of squarings in the reference circuit.
const NB_CONSTRAINTS: usize = 40_000;

fn reference_circuit() -> (R1cs, Assignment) {
    let mut b = R1csBuilder::new();
    let mut x = b.secret_input("X");
    let y = b.public_input("Y");
    for _ in 0..NB_CONSTRAINTS {
        x = b.mul(x, x);
    }
    b.assert_equal(x, y);
    let r1cs = b.build().expect("reference circuit is well formed");

    let mut out = Fr::from(2u64);
    for _ in 0..NB_CONSTRAINTS {
        out.square_in_place();
    }
    (r1cs, Assignment::new().secret("X", 2u64).public("Y", out))
}

fn bench_setup(c: &mut Criterion) {
    let (r1cs, _) = reference_circuit();
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    c.bench_function("groth16/setup", |b| {
        b.iter(|| black_box(setup(&r1cs, &mut rng).expect("setup")))
    });
}

fn bench_prover(c: &mut Criterion) {
    let (r1cs, solution) = reference_circuit();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let pk = insecure_dummy_setup(&r1cs, &mut rng).expect("dummy setup");

    c.bench_function("groth16/prover", |b| {
        b.iter(|| black_box(pk.prove(&r1cs, &solution, &mut rng).expect("prove")))
    });
}

fn bench_verifier(c: &mut Criterion) {
    let (r1cs, solution) = reference_circuit();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let (pk, vk) = setup(&r1cs, &mut rng).expect("setup");
    let proof = prove(&r1cs, &pk, &solution, &mut rng).expect("prove");
    let public = witness::public(&solution).expect("public witness");

    c.bench_function("groth16/verifier", |b| {
        b.iter(|| assert!(verify(black_box(&proof), &vk, &public).expect("verify")))
    });
}

criterion_group!(
    name = groth16_benches;
    config = Criterion::default().sample_size(10);
    targets = bench_setup, bench_prover, bench_verifier,
);

criterion_main!(groth16_benches);
