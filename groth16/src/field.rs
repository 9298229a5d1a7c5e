//! Field element adapter.
//!
//! arkworks keeps `Fr` in Montgomery form internally, so `Fr` *is* the Montgomery representation
//! used for arithmetic. [`Regular`] holds the canonical integer and is the representation used for
//! public inputs and for comparisons with the outside world. The two are distinct types: crossing
//! between them is always an explicit, lossless conversion.

use crate::constants::{ELEMENT_WIDTH, LIMBS};
use crate::errors::ZkError;
use ark_bn254::Fr;
use ark_ff::{BigInt, One, PrimeField, Zero};
use ark_serialize::{CanonicalSerialize, SerializationError};
use std::io::Write;

/// A scalar field element in canonical (non-Montgomery) form.
///
/// Always reduced: the only way to build one is from an `Fr`, or by reducing bytes modulo `p`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Regular(BigInt<LIMBS>);

impl Regular {
    pub fn zero() -> Self {
        Self::from_mont(&Fr::zero())
    }

    pub fn one() -> Self {
        Self::from_mont(&Fr::one())
    }

    pub fn from_u64(v: u64) -> Self {
        Self::from_mont(&Fr::from(v))
    }

    /// Montgomery -> Regular.
    pub fn from_mont(x: &Fr) -> Self {
        Regular(x.into_bigint())
    }

    /// Regular -> Montgomery.
    pub fn to_mont(&self) -> Fr {
        Fr::from_bigint(self.0).expect("regular elements are reduced by construction")
    }

    /// Reduce little-endian bytes modulo `p`.
    pub fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_mont(&Fr::from_le_bytes_mod_order(bytes))
    }

    pub fn as_bigint(&self) -> &BigInt<LIMBS> {
        &self.0
    }

    pub fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

impl From<Fr> for Regular {
    fn from(x: Fr) -> Self {
        Self::from_mont(&x)
    }
}

impl From<Regular> for Fr {
    fn from(x: Regular) -> Self {
        x.to_mont()
    }
}

/// The accepted source representations for a variable's value.
///
/// Conversion to a field element is total: integers are reduced modulo `p`, negative integers map
/// to `p - |x|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    U64(u64),
    I64(i64),
    U128(u128),
    Bool(bool),
    Field(Fr),
}

impl Value {
    pub fn to_field(&self) -> Fr {
        match *self {
            Value::U64(v) => Fr::from(v),
            Value::I64(v) if v < 0 => -Fr::from(v.unsigned_abs()),
            Value::I64(v) => Fr::from(v as u64),
            Value::U128(v) => Fr::from(v),
            Value::Bool(b) => Fr::from(b as u64),
            Value::Field(x) => x,
        }
    }

    pub fn to_regular(&self) -> Regular {
        Regular::from_mont(&self.to_field())
    }
}

macro_rules! value_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::U64(v as u64)
            }
        })*
    };
}

macro_rules! value_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::I64(v as i64)
            }
        })*
    };
}

value_from_unsigned!(u8, u16, u32, u64, usize);
value_from_signed!(i8, i16, i32, i64);

impl From<u128> for Value {
    fn from(v: u128) -> Self {
        Value::U128(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Fr> for Value {
    fn from(x: Fr) -> Self {
        Value::Field(x)
    }
}

impl From<Regular> for Value {
    fn from(x: Regular) -> Self {
        Value::Field(x.to_mont())
    }
}

/// Write one element in its fixed-width encoding (canonical, little-endian).
pub fn write_element<W: Write>(sink: &mut W, x: &Fr) -> Result<(), ZkError> {
    x.serialize_compressed(sink).map_err(map_serialization_error)
}

/// Decode one fixed-width chunk into a Montgomery element, reducing modulo `p`.
///
/// `chunk` must be exactly [`ELEMENT_WIDTH`] bytes; callers slice it.
pub fn read_element(chunk: &[u8]) -> Fr {
    debug_assert_eq!(chunk.len(), ELEMENT_WIDTH);
    Fr::from_le_bytes_mod_order(chunk)
}

pub(crate) fn map_serialization_error(e: SerializationError) -> ZkError {
    match e {
        SerializationError::IoError(io) => ZkError::Io(io),
        other => ZkError::Serialization(format!("{other}")),
    }
}
