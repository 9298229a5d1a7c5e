//! Mapping named public inputs onto the verifier's ordered public vector.

use crate::constants::ONE_WIRE;
use crate::errors::ZkError;
use crate::field::{Regular, Value};
use std::collections::HashMap;

/// Build the public witness (Regular form) in the order given by `expected_names`.
///
/// [`ONE_WIRE`] always maps to one, whatever `inputs` says about it. Any other name missing from
/// `inputs` is an error.
pub fn parse_public_input<S: AsRef<str>>(
    expected_names: &[S],
    inputs: &HashMap<String, Value>,
) -> Result<Vec<Regular>, ZkError> {
    expected_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if name == ONE_WIRE {
                return Ok(Regular::one());
            }
            inputs
                .get(name)
                .map(Value::to_regular)
                .ok_or_else(|| ZkError::MissingAssignment(name.to_string()))
        })
        .collect()
}
