//! R1CS -> QAP reduction.
//!
//! The evaluation domain has one row per constraint plus one input-consistency row per public
//! wire (`x_i * 0 = 0`), rounded up to a power of two. The extra rows keep the public-input
//! polynomials linearly independent, which the verifier's soundness depends on.

use crate::errors::ZkError;
use crate::r1cs::{evaluate, R1cs};
use ark_bn254::Fr;
use ark_ff::{FftField, Field, Zero};
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use rayon::prelude::*;

pub type Domain = GeneralEvaluationDomain<Fr>;

/// Number of domain rows the reduction needs before rounding.
pub fn nb_rows(r1cs: &R1cs) -> usize {
    r1cs.nb_constraints() + r1cs.public_wires().len()
}

pub fn domain_for(r1cs: &R1cs) -> Result<Domain, ZkError> {
    Domain::new(nb_rows(r1cs)).ok_or_else(|| {
        ZkError::MalformedR1cs(format!("{} rows exceed the field's FFT domain", nb_rows(r1cs)))
    })
}

/// The QAP basis polynomials of every wire, evaluated at a single point `tau`.
pub struct Evaluations {
    pub a: Vec<Fr>,
    pub b: Vec<Fr>,
    pub c: Vec<Fr>,
    /// Vanishing polynomial of the domain at `tau`.
    pub zt: Fr,
}

pub fn evaluate_at(r1cs: &R1cs, domain: &Domain, tau: Fr) -> Evaluations {
    let lagrange = domain.evaluate_all_lagrange_coefficients(tau);
    let nb_wires = r1cs.nb_wires();

    let mut a = vec![Fr::zero(); nb_wires];
    let mut b = vec![Fr::zero(); nb_wires];
    let mut c = vec![Fr::zero(); nb_wires];

    for (constraint, l) in r1cs.constraints().iter().zip(&lagrange) {
        for (wire, coeff) in &constraint.a {
            a[*wire] += *l * coeff;
        }
        for (wire, coeff) in &constraint.b {
            b[*wire] += *l * coeff;
        }
        for (wire, coeff) in &constraint.c {
            c[*wire] += *l * coeff;
        }
    }

    let start = r1cs.nb_constraints();
    for (k, wire) in r1cs.public_wires().enumerate() {
        a[wire] += lagrange[start + k];
    }

    Evaluations { a, b, c, zt: domain.evaluate_vanishing_polynomial(tau) }
}

/// Coefficients of `h = (A*B - C) / Z` for a solved wire vector.
///
/// Computed on the coset `g * H` so the division by `Z` (constant there) is a single scaling.
pub fn quotient(r1cs: &R1cs, domain: &Domain, wires: &[Fr]) -> Result<Vec<Fr>, ZkError> {
    let size = domain.size();
    let nb_constraints = r1cs.nb_constraints();
    let constraints = r1cs.constraints();

    let mut a = vec![Fr::zero(); size];
    let mut b = vec![Fr::zero(); size];
    let mut c = vec![Fr::zero(); size];

    a[..nb_constraints]
        .par_iter_mut()
        .zip(b[..nb_constraints].par_iter_mut())
        .zip(c[..nb_constraints].par_iter_mut())
        .zip(constraints.par_iter())
        .for_each(|(((ai, bi), ci), constraint)| {
            *ai = evaluate(&constraint.a, wires);
            *bi = evaluate(&constraint.b, wires);
            *ci = evaluate(&constraint.c, wires);
        });

    for (k, wire) in r1cs.public_wires().enumerate() {
        a[nb_constraints + k] = wires[wire];
    }

    let coset = domain
        .get_coset(Fr::GENERATOR)
        .ok_or_else(|| ZkError::MalformedR1cs("cannot build coset domain".to_string()))?;

    for v in [&mut a, &mut b, &mut c] {
        domain.ifft_in_place(v);
        coset.fft_in_place(v);
    }

    let z_inv = domain
        .evaluate_vanishing_polynomial(Fr::GENERATOR)
        .inverse()
        .ok_or_else(|| ZkError::MalformedR1cs("vanishing polynomial is zero on the coset".to_string()))?;

    let mut h = domain.mul_polynomials_in_evaluation_domain(&a, &b);
    h.par_iter_mut().zip(c.par_iter()).for_each(|(hi, ci)| {
        *hi -= ci;
        *hi *= z_inv;
    });
    coset.ifft_in_place(&mut h);
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r1cs::R1csBuilder;
    use crate::witness::{self, Assignment};
    use ark_poly::univariate::DensePolynomial;
    use ark_poly::{DenseUVPolynomial, Polynomial};

    fn square() -> R1cs {
        let mut b = R1csBuilder::new();
        let x = b.secret_input("x");
        let y = b.public_input("y");
        let x2 = b.mul(x, x);
        b.assert_equal(x2, y);
        b.build().unwrap()
    }

    #[test]
    fn domain_covers_constraints_and_inputs() {
        let r1cs = square();
        // 2 constraints + one wire + y
        assert_eq!(nb_rows(&r1cs), 4);
        assert_eq!(domain_for(&r1cs).unwrap().size(), 4);
    }

    #[test]
    fn quotient_satisfies_divisibility_at_random_point() {
        let r1cs = square();
        let domain = domain_for(&r1cs).unwrap();
        let w = Assignment::new().secret("x", 5u64).public("y", 25u64);
        let wires = r1cs.solve(&witness::full(&w).unwrap()).unwrap();
        let h = quotient(&r1cs, &domain, &wires).unwrap();

        let tau = Fr::from(0xdead_beefu64);
        let ev = evaluate_at(&r1cs, &domain, tau);
        let dot = |v: &[Fr]| v.iter().zip(&wires).fold(Fr::zero(), |acc, (p, w)| acc + *p * w);
        let h_at_tau = DensePolynomial::from_coefficients_vec(h).evaluate(&tau);

        assert_eq!(dot(&ev.a) * dot(&ev.b) - dot(&ev.c), h_at_tau * ev.zt);
    }
}
