//! Rank-1 constraint systems.
//!
//! A constraint is `<A, w> * <B, w> = <C, w>` over the wire vector
//!
//! ```text
//! w = [secret... | one | public... | internal...]
//! ```
//!
//! so the first `nb_secret + 1 + nb_public` wires are exactly the full witness produced by
//! [`crate::witness::full`]. Internal wires are derived by [`R1cs::solve`].
//!
//! [`R1csBuilder`] is a deliberately small front-end: declare inputs, multiply, assert equality.

use crate::constants::{ONE_WIRE, R1CS_DIGEST_DOMAIN};
use crate::errors::ZkError;
use crate::field::Value;
use crate::witness::{Assignment, Variable};
use ark_bn254::Fr;
use ark_ff::{Field, One, PrimeField, Zero};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::{Add, Mul, Range, Sub};
use tracing::debug;

/// Sparse linear combination over resolved wire indices.
pub type Terms = Vec<(usize, Fr)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub a: Terms,
    pub b: Terms,
    pub c: Terms,
}

/// A compiled constraint system. Only [`R1csBuilder::build`] produces one, so every value of
/// this type has at least one constraint and only in-range wire indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct R1cs {
    nb_secret: usize,
    nb_public: usize,
    nb_internal: usize,
    secret_names: Vec<String>,
    public_names: Vec<String>,
    constraints: Vec<Constraint>,
    digest: [u8; 32],
}

impl R1cs {
    pub fn nb_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn nb_secret(&self) -> usize {
        self.nb_secret
    }

    /// Number of user-declared public inputs (the one wire excluded).
    pub fn nb_public(&self) -> usize {
        self.nb_public
    }

    pub fn nb_internal(&self) -> usize {
        self.nb_internal
    }

    /// Length of the full witness vector `[secret | one | public]`.
    pub fn nb_witness(&self) -> usize {
        self.nb_secret + 1 + self.nb_public
    }

    pub fn nb_wires(&self) -> usize {
        self.nb_witness() + self.nb_internal
    }

    pub fn one_wire(&self) -> usize {
        self.nb_secret
    }

    /// Wires checked by the verifier: the one wire followed by the public inputs.
    pub fn public_wires(&self) -> Range<usize> {
        self.nb_secret..self.nb_witness()
    }

    pub fn is_public_wire(&self, wire: usize) -> bool {
        self.public_wires().contains(&wire)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn secret_names(&self) -> &[String] {
        &self.secret_names
    }

    pub fn public_names(&self) -> &[String] {
        &self.public_names
    }

    /// Ordered names of the verifier's public vector: `[ONE_WIRE, public...]`.
    pub fn public_input_names(&self) -> Vec<String> {
        std::iter::once(ONE_WIRE.to_string())
            .chain(self.public_names.iter().cloned())
            .collect()
    }

    /// SHA-256 over the structure (counts, names, coefficients). Keys remember it.
    pub fn digest(&self) -> [u8; 32] {
        self.digest
    }

    /// Build an assignment from a named map, in the order the inputs were declared.
    pub fn assign(&self, inputs: &HashMap<String, Value>) -> Result<Assignment, ZkError> {
        let lookup = |name: &String| {
            inputs
                .get(name)
                .copied()
                .ok_or_else(|| ZkError::MissingAssignment(name.clone()))
        };

        let mut assignment = Assignment::new();
        for name in &self.secret_names {
            assignment = assignment.push(Variable::secret(name.clone()).with_value(lookup(name)?));
        }
        for name in &self.public_names {
            assignment = assignment.push(Variable::public(name.clone()).with_value(lookup(name)?));
        }
        Ok(assignment)
    }

    /// Derive every internal wire from the full witness, checking each constraint on the way.
    ///
    /// Constraints are processed in order; each may introduce at most one not-yet-known wire, which
    /// must appear linearly in exactly one of A, B or C.
    pub fn solve(&self, witness: &[Fr]) -> Result<Vec<Fr>, ZkError> {
        self.check_witness_shape(witness)?;

        let mut values: Vec<Option<Fr>> = witness
            .iter()
            .copied()
            .map(Some)
            .chain(std::iter::repeat(None).take(self.nb_internal))
            .collect();

        for (index, c) in self.constraints.iter().enumerate() {
            let a = Partial::eval(&c.a, &values);
            let b = Partial::eval(&c.b, &values);
            let cc = Partial::eval(&c.c, &values);

            let solved = solve_one(index, &a, &b, &cc)?;
            if let Some((wire, value)) = solved {
                values[wire] = Some(value);
            }
        }

        let wires = values
            .into_iter()
            .enumerate()
            .map(|(wire, v)| {
                v.ok_or_else(|| ZkError::MalformedR1cs(format!("wire {wire} is never derived")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            constraints = self.constraints.len(),
            wires = wires.len(),
            "r1cs solved"
        );
        Ok(wires)
    }

    /// Check a complete wire assignment against every constraint.
    pub fn is_satisfied(&self, wires: &[Fr]) -> Result<(), ZkError> {
        if wires.len() != self.nb_wires() {
            return Err(ZkError::InvalidWitness(format!(
                "expected {} wires, got {}",
                self.nb_wires(),
                wires.len()
            )));
        }
        for (index, c) in self.constraints.iter().enumerate() {
            let a = evaluate(&c.a, wires);
            let b = evaluate(&c.b, wires);
            if a * b != evaluate(&c.c, wires) {
                return Err(ZkError::unsatisfied(index, "A * B != C"));
            }
        }
        Ok(())
    }

    fn check_witness_shape(&self, witness: &[Fr]) -> Result<(), ZkError> {
        if witness.len() != self.nb_witness() {
            return Err(ZkError::InvalidWitness(format!(
                "expected {} elements (secret {}, one wire, public {}), got {}",
                self.nb_witness(),
                self.nb_secret,
                self.nb_public,
                witness.len()
            )));
        }
        if !witness[self.one_wire()].is_one() {
            return Err(ZkError::InvalidWitness("one wire is not 1".to_string()));
        }
        Ok(())
    }
}

/// `<lc, wires>`.
pub(crate) fn evaluate(lc: &[(usize, Fr)], wires: &[Fr]) -> Fr {
    lc.iter().fold(Fr::zero(), |acc, (wire, coeff)| acc + *coeff * wires[*wire])
}

/// A linear combination evaluated as far as current knowledge allows.
struct Partial {
    known: Fr,
    unknown: Option<(usize, Fr)>,
    ambiguous: bool,
}

impl Partial {
    fn eval(lc: &[(usize, Fr)], values: &[Option<Fr>]) -> Self {
        let mut p = Partial { known: Fr::zero(), unknown: None, ambiguous: false };
        for &(wire, coeff) in lc {
            match (values[wire], p.unknown) {
                (Some(v), _) => p.known += coeff * v,
                (None, None) => p.unknown = Some((wire, coeff)),
                (None, Some(_)) => p.ambiguous = true,
            }
        }
        p
    }
}

fn solve_one(
    index: usize,
    a: &Partial,
    b: &Partial,
    c: &Partial,
) -> Result<Option<(usize, Fr)>, ZkError> {
    if a.ambiguous || b.ambiguous || c.ambiguous {
        return Err(ZkError::unsatisfied(index, "more than one unknown wire"));
    }

    let unknown_wires: HashSet<usize> = [a.unknown, b.unknown, c.unknown]
        .iter()
        .flatten()
        .map(|(wire, _)| *wire)
        .collect();
    let occurrences = [a.unknown, b.unknown, c.unknown].iter().flatten().count();
    if unknown_wires.len() > 1 || occurrences > 1 {
        return Err(ZkError::unsatisfied(index, "unknown wire is not linear in a single term"));
    }

    let inverse = |x: Fr| {
        x.inverse()
            .ok_or_else(|| ZkError::unsatisfied(index, "cannot derive wire: division by zero"))
    };

    match (a.unknown, b.unknown, c.unknown) {
        (None, None, None) => {
            if a.known * b.known != c.known {
                return Err(ZkError::unsatisfied(index, "A * B != C"));
            }
            Ok(None)
        }
        (None, None, Some((wire, coeff))) => {
            let v = (a.known * b.known - c.known) * inverse(coeff)?;
            Ok(Some((wire, v)))
        }
        (Some((wire, coeff)), None, None) => {
            let v = (c.known * inverse(b.known)? - a.known) * inverse(coeff)?;
            Ok(Some((wire, v)))
        }
        (None, Some((wire, coeff)), None) => {
            let v = (c.known * inverse(a.known)? - b.known) * inverse(coeff)?;
            Ok(Some((wire, v)))
        }
        _ => Err(ZkError::unsatisfied(index, "unknown wire is not linear in a single term")),
    }
}

/// Builder-side wire handle. Resolved to an index by [`R1csBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wire(Kind);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Kind {
    Secret(usize),
    One,
    Public(usize),
    Internal(usize),
}

impl Wire {
    pub const ONE: Wire = Wire(Kind::One);
}

/// Builder-side linear combination.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearCombination(Vec<(Wire, Fr)>);

impl LinearCombination {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(c: impl Into<Value>) -> Self {
        Self(vec![(Wire::ONE, c.into().to_field())])
    }

    pub fn term(mut self, coeff: impl Into<Value>, wire: Wire) -> Self {
        self.0.push((wire, coeff.into().to_field()));
        self
    }

    pub fn scale(mut self, k: Fr) -> Self {
        for (_, coeff) in self.0.iter_mut() {
            *coeff *= k;
        }
        self
    }
}

impl From<Wire> for LinearCombination {
    fn from(w: Wire) -> Self {
        Self(vec![(w, Fr::one())])
    }
}

impl<T: Into<LinearCombination>> Add<T> for LinearCombination {
    type Output = LinearCombination;

    fn add(mut self, rhs: T) -> Self::Output {
        self.0.extend(rhs.into().0);
        self
    }
}

impl<T: Into<LinearCombination>> Sub<T> for LinearCombination {
    type Output = LinearCombination;

    fn sub(self, rhs: T) -> Self::Output {
        self + rhs.into().scale(-Fr::one())
    }
}

impl<T: Into<LinearCombination>> Add<T> for Wire {
    type Output = LinearCombination;

    fn add(self, rhs: T) -> Self::Output {
        LinearCombination::from(self) + rhs
    }
}

impl<T: Into<LinearCombination>> Sub<T> for Wire {
    type Output = LinearCombination;

    fn sub(self, rhs: T) -> Self::Output {
        LinearCombination::from(self) - rhs
    }
}

impl Mul<Fr> for LinearCombination {
    type Output = LinearCombination;

    fn mul(self, k: Fr) -> Self::Output {
        self.scale(k)
    }
}

/// Minimal constraint front-end.
#[derive(Debug, Default)]
pub struct R1csBuilder {
    secret_names: Vec<String>,
    public_names: Vec<String>,
    nb_internal: usize,
    constraints: Vec<[LinearCombination; 3]>,
}

impl R1csBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secret_input(&mut self, name: impl Into<String>) -> Wire {
        self.secret_names.push(name.into());
        Wire(Kind::Secret(self.secret_names.len() - 1))
    }

    pub fn public_input(&mut self, name: impl Into<String>) -> Wire {
        self.public_names.push(name.into());
        Wire(Kind::Public(self.public_names.len() - 1))
    }

    /// Add `a * b = c` verbatim.
    pub fn constrain(
        &mut self,
        a: impl Into<LinearCombination>,
        b: impl Into<LinearCombination>,
        c: impl Into<LinearCombination>,
    ) {
        self.constraints.push([a.into(), b.into(), c.into()]);
    }

    /// Allocate an internal wire holding `a * b`.
    pub fn mul(&mut self, a: impl Into<LinearCombination>, b: impl Into<LinearCombination>) -> Wire {
        let out = Wire(Kind::Internal(self.nb_internal));
        self.nb_internal += 1;
        self.constrain(a, b, out);
        out
    }

    /// Allocate an internal wire holding the linear combination `lc`.
    pub fn linear(&mut self, lc: impl Into<LinearCombination>) -> Wire {
        self.mul(lc, Wire::ONE)
    }

    pub fn assert_equal(&mut self, lhs: impl Into<LinearCombination>, rhs: impl Into<LinearCombination>) {
        self.constrain(lhs, Wire::ONE, rhs);
    }

    pub fn build(self) -> Result<R1cs, ZkError> {
        if self.constraints.is_empty() {
            return Err(ZkError::MalformedR1cs("no constraints".to_string()));
        }

        let mut seen = HashSet::new();
        for name in self.secret_names.iter().chain(&self.public_names) {
            if name == ONE_WIRE {
                return Err(ZkError::MalformedR1cs(format!("{ONE_WIRE} is a reserved name")));
            }
            if !seen.insert(name.as_str()) {
                return Err(ZkError::MalformedR1cs(format!("duplicate input name {name}")));
            }
        }

        let nb_secret = self.secret_names.len();
        let nb_public = self.public_names.len();
        let nb_internal = self.nb_internal;
        // Wires are plain handles, so one minted by another builder can reach us.
        let resolve = |w: Wire| match w.0 {
            Kind::Secret(i) if i < nb_secret => Ok(i),
            Kind::One => Ok(nb_secret),
            Kind::Public(i) if i < nb_public => Ok(nb_secret + 1 + i),
            Kind::Internal(i) if i < nb_internal => Ok(nb_secret + 1 + nb_public + i),
            _ => Err(ZkError::MalformedR1cs(format!("{w:?} was not allocated by this builder"))),
        };
        let compress = |lc: LinearCombination| -> Result<Terms, ZkError> {
            let mut merged: BTreeMap<usize, Fr> = BTreeMap::new();
            for (w, coeff) in lc.0 {
                *merged.entry(resolve(w)?).or_insert_with(Fr::zero) += coeff;
            }
            Ok(merged.into_iter().filter(|(_, coeff)| !coeff.is_zero()).collect())
        };

        let constraints = self
            .constraints
            .into_iter()
            .map(|[a, b, c]| Ok(Constraint { a: compress(a)?, b: compress(b)?, c: compress(c)? }))
            .collect::<Result<Vec<_>, ZkError>>()?;

        let mut r1cs = R1cs {
            nb_secret,
            nb_public,
            nb_internal,
            secret_names: self.secret_names,
            public_names: self.public_names,
            constraints,
            digest: [0u8; 32],
        };
        r1cs.digest = structural_digest(&r1cs);

        debug!(
            constraints = r1cs.nb_constraints(),
            secret = nb_secret,
            public = nb_public,
            internal = r1cs.nb_internal,
            "r1cs built"
        );
        Ok(r1cs)
    }
}

fn structural_digest(r1cs: &R1cs) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(R1CS_DIGEST_DOMAIN);
    for n in [r1cs.nb_secret, r1cs.nb_public, r1cs.nb_internal, r1cs.constraints.len()] {
        h.update((n as u64).to_le_bytes());
    }
    for name in r1cs.secret_names.iter().chain(&r1cs.public_names) {
        h.update((name.len() as u64).to_le_bytes());
        h.update(name.as_bytes());
    }
    for c in &r1cs.constraints {
        for lc in [&c.a, &c.b, &c.c] {
            h.update((lc.len() as u64).to_le_bytes());
            for (wire, coeff) in lc {
                h.update((*wire as u64).to_le_bytes());
                for limb in coeff.into_bigint().0 {
                    h.update(limb.to_le_bytes());
                }
            }
        }
    }
    h.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness;

    /// x^3 + x + 5 == y
    fn cubic() -> R1cs {
        let mut b = R1csBuilder::new();
        let x = b.secret_input("x");
        let y = b.public_input("y");
        let x2 = b.mul(x, x);
        let x3 = b.mul(x2, x);
        b.assert_equal(x3 + x + LinearCombination::constant(5u64), y);
        b.build().unwrap()
    }

    #[test]
    fn layout_places_full_witness_first() {
        let r1cs = cubic();
        assert_eq!(r1cs.nb_witness(), 3);
        assert_eq!(r1cs.nb_wires(), 5);
        assert_eq!(r1cs.one_wire(), 1);
        assert_eq!(r1cs.public_wires(), 1..3);
        assert_eq!(r1cs.public_input_names(), vec![ONE_WIRE.to_string(), "y".to_string()]);
    }

    #[test]
    fn solves_internal_wires() {
        let r1cs = cubic();
        let w = Assignment::new().secret("x", 3u64).public("y", 35u64);
        let wires = r1cs.solve(&witness::full(&w).unwrap()).unwrap();
        assert_eq!(wires[3], Fr::from(9u64));
        assert_eq!(wires[4], Fr::from(27u64));
        r1cs.is_satisfied(&wires).unwrap();
    }

    #[test]
    fn rejects_bad_witness() {
        let r1cs = cubic();
        let w = Assignment::new().secret("x", 3u64).public("y", 36u64);
        match r1cs.solve(&witness::full(&w).unwrap()) {
            Err(ZkError::UnsatisfiableConstraint { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected UnsatisfiableConstraint, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_witness_shape() {
        let r1cs = cubic();
        assert!(matches!(r1cs.solve(&[Fr::one()]), Err(ZkError::InvalidWitness(_))));
        let no_one = [Fr::from(3u64), Fr::from(2u64), Fr::from(35u64)];
        assert!(matches!(r1cs.solve(&no_one), Err(ZkError::InvalidWitness(_))));
    }

    #[test]
    fn derives_wire_from_left_factor() {
        // inv * x = 1
        let mut b = R1csBuilder::new();
        let x = b.public_input("x");
        let inv = Wire(Kind::Internal(0));
        b.nb_internal = 1;
        b.constrain(inv, x, Wire::ONE);
        let r1cs = b.build().unwrap();

        let w = Assignment::new().public("x", 4u64);
        let wires = r1cs.solve(&witness::full(&w).unwrap()).unwrap();
        assert_eq!(wires[2] * Fr::from(4u64), Fr::one());

        let zero = Assignment::new().public("x", 0u64);
        assert!(matches!(
            r1cs.solve(&witness::full(&zero).unwrap()),
            Err(ZkError::UnsatisfiableConstraint { .. })
        ));
    }

    #[test]
    fn build_rejects_malformed_systems() {
        assert!(matches!(R1csBuilder::new().build(), Err(ZkError::MalformedR1cs(_))));

        let mut b = R1csBuilder::new();
        let x = b.public_input("x");
        b.public_input("x");
        b.assert_equal(x, x);
        assert!(matches!(b.build(), Err(ZkError::MalformedR1cs(_))));

        let mut b = R1csBuilder::new();
        let x = b.public_input(ONE_WIRE);
        b.assert_equal(x, x);
        assert!(matches!(b.build(), Err(ZkError::MalformedR1cs(_))));
    }

    #[test]
    fn build_rejects_wires_from_another_builder() {
        let mut other = R1csBuilder::new();
        let mut foreign = other.secret_input("a");
        for _ in 0..5 {
            foreign = other.mul(foreign, foreign);
        }

        let mut b = R1csBuilder::new();
        let x = b.secret_input("x");
        let y = b.public_input("y");
        let out = b.mul(x, foreign);
        b.assert_equal(out, y);
        assert!(matches!(b.build(), Err(ZkError::MalformedR1cs(_))));

        let mut b = R1csBuilder::new();
        let x = b.secret_input("x");
        let stray_public = other.public_input("p");
        b.assert_equal(x, stray_public);
        assert!(matches!(b.build(), Err(ZkError::MalformedR1cs(_))));
    }

    #[test]
    fn digest_tracks_structure_only() {
        assert_eq!(cubic().digest(), cubic().digest());

        let mut b = R1csBuilder::new();
        let x = b.secret_input("x");
        let y = b.public_input("y");
        let x2 = b.mul(x, x);
        let x3 = b.mul(x2, x);
        b.assert_equal(x3 + x + LinearCombination::constant(6u64), y);
        assert_ne!(b.build().unwrap().digest(), cubic().digest());
    }

    #[test]
    fn assign_from_named_map() {
        let r1cs = cubic();
        let mut inputs = HashMap::new();
        inputs.insert("x".to_string(), Value::from(3u64));
        assert!(matches!(r1cs.assign(&inputs), Err(ZkError::MissingAssignment(n)) if n == "y"));

        inputs.insert("y".to_string(), Value::from(35u64));
        let w = r1cs.assign(&inputs).unwrap();
        r1cs.solve(&witness::full(&w).unwrap()).unwrap();
    }
}
