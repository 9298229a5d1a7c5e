use thiserror::Error;

/// Every failure surfaced by the backend.
///
/// None of these are retried or recovered internally. A proof that simply does not verify is NOT
/// an error: `verify` returns `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum ZkError {
    #[error("variable {0} not assigned")]
    UnassignedVariable(String),

    #[error("invalid input size: {len} bytes is not a multiple of the element width ({width})")]
    InvalidLength { len: usize, width: usize },

    #[error("missing assignment for public input {0}")]
    MissingAssignment(String),

    #[error("constraint #{index} is not satisfied: {reason}")]
    UnsatisfiableConstraint { index: usize, reason: String },

    #[error("invalid witness: {0}")]
    InvalidWitness(String),

    #[error("key does not match the constraint system: {0}")]
    KeyMismatch(String),

    #[error("malformed constraint system: {0}")]
    MalformedR1cs(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ZkError {
    pub(crate) fn unsatisfied(index: usize, reason: impl Into<String>) -> Self {
        ZkError::UnsatisfiableConstraint { index, reason: reason.into() }
    }
}
