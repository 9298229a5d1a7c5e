//! Reference circuit: `x^(2^n) == y`, one secret input and one public input.

use ark_bn254::Fr;
use ark_ff::Field;
use groth16_backend::{Assignment, R1cs, R1csBuilder, ZkError};

pub fn reference_r1cs(nb_constraints: usize) -> Result<R1cs, ZkError> {
    let mut b = R1csBuilder::new();
    let mut x = b.secret_input("X");
    let y = b.public_input("Y");
    for _ in 0..nb_constraints {
        x = b.mul(x, x);
    }
    b.assert_equal(x, y);
    b.build()
}

/// A satisfying assignment for `reference_r1cs(nb_constraints)` with `X = x`.
pub fn reference_witness(nb_constraints: usize, x: u64) -> Assignment {
    let mut y = Fr::from(x);
    for _ in 0..nb_constraints {
        y.square_in_place();
    }
    Assignment::new().secret("X", x).public("Y", y)
}
