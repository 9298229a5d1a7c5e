#![allow(dead_code)]

use ark_bn254::Fr;
use ark_ff::Field;
use groth16_backend::r1cs::LinearCombination;
use groth16_backend::{Assignment, R1cs, R1csBuilder, Variable, Witness};
use groth16_backend::witness::Leaf;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// x^3 + x + 5 == y, with x secret and y public.
pub fn cubic() -> R1cs {
    let mut b = R1csBuilder::new();
    let x = b.secret_input("X");
    let y = b.public_input("Y");
    let x2 = b.mul(x, x);
    let x3 = b.mul(x2, x);
    b.assert_equal(x3 + x + LinearCombination::constant(5u64), y);
    b.build().unwrap()
}

/// Typed witness for [`cubic`], declared the way a circuit struct would be.
pub struct CubicWitness {
    pub x: Variable,
    pub y: Variable,
}

impl CubicWitness {
    pub fn new(x: u64, y: u64) -> Self {
        Self {
            x: Variable::secret("X").with_value(x),
            y: Variable::public("Y").with_value(y),
        }
    }
}

impl Witness for CubicWitness {
    fn leaves(&self) -> impl Iterator<Item = Leaf<'_>> {
        [&self.x, &self.y].into_iter().map(Variable::as_leaf)
    }
}

/// Several public inputs interleaved with secrets:
/// a * b == p, p + c == q, (a + q) * d == r.
pub fn mixed() -> R1cs {
    let mut bld = R1csBuilder::new();
    let a = bld.secret_input("a");
    let p = bld.public_input("p");
    let b = bld.secret_input("b");
    let q = bld.public_input("q");
    let c = bld.secret_input("c");
    let r = bld.public_input("r");
    let d = bld.secret_input("d");

    let ab = bld.mul(a, b);
    bld.assert_equal(ab, p);
    bld.assert_equal(p + c, q);
    let aq = bld.mul(a + q, d);
    bld.assert_equal(aq, r);
    bld.build().unwrap()
}

pub fn mixed_witness(a: u64, b: u64, c: u64, d: u64) -> Assignment {
    let p = a * b;
    let q = p + c;
    let r = (a + q) * d;
    Assignment::new()
        .secret("a", a)
        .public("p", p)
        .secret("b", b)
        .public("q", q)
        .secret("c", c)
        .public("r", r)
        .secret("d", d)
}

/// x^(2^n) == y: the benchmark reference circuit.
pub fn repeated_squaring(n: usize) -> R1cs {
    let mut b = R1csBuilder::new();
    let mut x = b.secret_input("X");
    let y = b.public_input("Y");
    for _ in 0..n {
        x = b.mul(x, x);
    }
    b.assert_equal(x, y);
    b.build().unwrap()
}

pub fn repeated_squaring_witness(n: usize, x: u64) -> Assignment {
    let mut y = Fr::from(x);
    for _ in 0..n {
        y.square_in_place();
    }
    Assignment::new().secret("X", x).public("Y", y)
}
