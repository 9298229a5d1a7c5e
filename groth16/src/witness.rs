//! Witness model and extraction.
//!
//! A witness is described by an explicit, ordered schema of leaves: each leaf carries a name, a
//! [`Visibility`] and an optional [`Value`]. Extraction walks that schema by plain iteration, so
//! the index a leaf receives depends only on its declaration position.
//!
//! IMPORTANT: setup, proving and verification all rely on the same wire ordering. Declaration
//! order of the witness MUST match the order in which the circuit declared its inputs.

use crate::constants::NAME_SEPARATOR;
use crate::errors::ZkError;
use crate::field::{Regular, Value};
use ark_bn254::Fr;
use ark_ff::One;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Not declared by the user. Nested leaves inherit the visibility of their parent; a top-level
    /// leaf left unset is secret.
    #[default]
    Unset,
    Secret,
    Public,
}

impl Visibility {
    /// Whether a leaf with this visibility lands in the public part of the witness.
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

/// One declared variable slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub visibility: Visibility,
    pub value: Option<Value>,
}

impl Variable {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self { name: name.into(), visibility, value: None }
    }

    pub fn secret(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Secret)
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Public)
    }

    pub fn assign(&mut self, value: impl Into<Value>) {
        self.value = Some(value.into());
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.assign(value);
        self
    }

    pub fn as_leaf(&self) -> Leaf<'_> {
        Leaf {
            name: &self.name,
            visibility: self.visibility,
            value: self.value.as_ref(),
        }
    }
}

/// A borrowed view of one leaf, as produced by [`Witness::leaves`].
#[derive(Clone, Copy, Debug)]
pub struct Leaf<'a> {
    pub name: &'a str,
    pub visibility: Visibility,
    pub value: Option<&'a Value>,
}

impl Leaf<'_> {
    fn assigned(&self) -> Result<&Value, ZkError> {
        self.value
            .ok_or_else(|| ZkError::UnassignedVariable(self.name.to_string()))
    }
}

/// Anything that can enumerate its variable leaves in a stable declaration order.
///
/// Implementations must yield the same sequence every time they are called on the same value.
pub trait Witness {
    fn leaves(&self) -> impl Iterator<Item = Leaf<'_>>;
}

impl Witness for [Variable] {
    fn leaves(&self) -> impl Iterator<Item = Leaf<'_>> {
        self.iter().map(Variable::as_leaf)
    }
}

impl Witness for Vec<Variable> {
    fn leaves(&self) -> impl Iterator<Item = Leaf<'_>> {
        self.iter().map(Variable::as_leaf)
    }
}

/// An ordered list of variables; the general-purpose [`Witness`] implementation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    variables: Vec<Variable>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn secret(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Variable::secret(name).with_value(value))
    }

    pub fn public(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Variable::public(name).with_value(value))
    }

    /// Declare a slot without a value. Extraction fails on it until [`Assignment::set`] is called.
    pub fn declare(self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.push(Variable::new(name, visibility))
    }

    pub fn push(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Flatten `child` into this assignment as `prefix_<name>` leaves.
    ///
    /// Child leaves with [`Visibility::Unset`] take `visibility`.
    pub fn nest(mut self, prefix: &str, visibility: Visibility, child: Assignment) -> Self {
        for v in child.variables {
            let inherited = match v.visibility {
                Visibility::Unset => visibility,
                own => own,
            };
            self.variables.push(Variable {
                name: format!("{prefix}{NAME_SEPARATOR}{}", v.name),
                visibility: inherited,
                value: v.value,
            });
        }
        self
    }

    /// Assign every slot named `name`. Returns false if no such slot exists.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let mut found = false;
        for v in self.variables.iter_mut().filter(|v| v.name == name) {
            v.value = Some(value);
            found = true;
        }
        found
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Witness for Assignment {
    fn leaves(&self) -> impl Iterator<Item = Leaf<'_>> {
        self.variables.iter().map(Variable::as_leaf)
    }
}

/// Count secret and public leaves. Used to size the extraction buffers.
///
/// Every leaf is counted: unset top-level leaves count as secret.
pub fn count<W: Witness + ?Sized>(witness: &W) -> (usize, usize) {
    witness.leaves().fold((0, 0), |(nb_secret, nb_public), leaf| {
        if leaf.visibility.is_public() {
            (nb_secret, nb_public + 1)
        } else {
            (nb_secret + 1, nb_public)
        }
    })
}

/// Extract the full witness `[secret... | one | public...]` in Montgomery form.
pub fn full<W: Witness + ?Sized>(witness: &W) -> Result<Vec<Fr>, ZkError> {
    let (nb_secret, nb_public) = count(witness);

    let mut secret = Vec::with_capacity(nb_secret + 1 + nb_public);
    let mut public = Vec::with_capacity(nb_public + 1);
    public.push(Fr::one());

    for leaf in witness.leaves() {
        let value = leaf.assigned()?.to_field();
        if leaf.visibility.is_public() {
            public.push(value);
        } else {
            secret.push(value);
        }
    }

    secret.extend(public);
    Ok(secret)
}

/// Extract the public witness `[one | public...]` in Regular form.
///
/// Secret leaves are ignored entirely, assigned or not.
pub fn public<W: Witness + ?Sized>(witness: &W) -> Result<Vec<Regular>, ZkError> {
    let (_, nb_public) = count(witness);

    let mut public = Vec::with_capacity(nb_public + 1);
    public.push(Regular::one());

    for leaf in witness.leaves() {
        if leaf.visibility.is_public() {
            public.push(leaf.assigned()?.to_regular());
        }
    }

    Ok(public)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assignment {
        Assignment::new()
            .secret("a", 2u64)
            .public("x", 3u64)
            .secret("b", 4u64)
            .public("y", 5u64)
    }

    #[test]
    fn count_matches_visited_leaves() {
        let w = sample();
        let (nb_secret, nb_public) = count(&w);
        assert_eq!((nb_secret, nb_public), (2, 2));

        assert_eq!(full(&w).unwrap().len(), nb_secret + nb_public + 1);
        assert_eq!(public(&w).unwrap().len(), nb_public + 1);
    }

    #[test]
    fn full_layout_is_secret_then_one_then_public() {
        let got = full(&sample()).unwrap();
        let expected: Vec<Fr> = [2u64, 4, 1, 3, 5].into_iter().map(Fr::from).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn public_is_regular_and_starts_with_one() {
        let got = public(&sample()).unwrap();
        assert_eq!(got, vec![Regular::one(), Regular::from_u64(3), Regular::from_u64(5)]);
    }

    #[test]
    fn unassigned_secret_is_rejected_by_full_only() {
        let w = Assignment::new()
            .public("x", 1u64)
            .declare("hidden", Visibility::Secret);

        match full(&w) {
            Err(ZkError::UnassignedVariable(name)) => assert_eq!(name, "hidden"),
            other => panic!("expected UnassignedVariable, got {other:?}"),
        }
        assert!(public(&w).is_ok());

        let mut assigned = w.clone();
        assert!(assigned.set("hidden", 9u64));
        assert!(full(&assigned).is_ok());
    }

    #[test]
    fn unassigned_public_is_rejected_by_both() {
        let w = Assignment::new().declare("x", Visibility::Public);
        assert!(matches!(full(&w), Err(ZkError::UnassignedVariable(_))));
        assert!(matches!(public(&w), Err(ZkError::UnassignedVariable(_))));
    }

    #[test]
    fn extraction_is_deterministic() {
        let w = sample();
        assert_eq!(full(&w).unwrap(), full(&w).unwrap());
        assert_eq!(public(&w).unwrap(), public(&w).unwrap());
    }

    #[test]
    fn nested_leaves_inherit_parent_visibility() {
        let child = Assignment::new()
            .push(Variable::new("u", Visibility::Unset).with_value(7u64))
            .secret("v", 8u64);
        let w = Assignment::new().nest("point", Visibility::Public, child);

        let names: Vec<&str> = w.leaves().map(|l| l.name).collect();
        assert_eq!(names, ["point_u", "point_v"]);
        assert_eq!(count(&w), (1, 1));
        assert_eq!(public(&w).unwrap(), vec![Regular::one(), Regular::from_u64(7)]);
    }

    #[test]
    fn untagged_top_level_leaf_is_secret() {
        let w = Assignment::new()
            .push(Variable::new("untagged", Visibility::Unset).with_value(4u64))
            .public("y", 9u64);
        assert_eq!(count(&w), (1, 1));
        assert_eq!(full(&w).unwrap(), vec![Fr::from(4u64), Fr::one(), Fr::from(9u64)]);
        assert_eq!(public(&w).unwrap(), vec![Regular::one(), Regular::from_u64(9)]);
    }

    #[test]
    fn unassigned_untagged_leaf_is_rejected() {
        let w = Assignment::new()
            .declare("untagged", Visibility::default())
            .public("y", 9u64);
        match full(&w) {
            Err(ZkError::UnassignedVariable(name)) => assert_eq!(name, "untagged"),
            other => panic!("expected UnassignedVariable, got {other:?}"),
        }
    }

    #[test]
    fn setting_an_unknown_name_reports_false() {
        let mut w = sample();
        assert!(!w.set("nope", 1u64));
    }
}
