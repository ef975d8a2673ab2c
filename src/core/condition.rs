//! Condition evaluation
//!
//! Conditions are predicates over a single inquiry value plus the inquiry
//! itself. They carry their own configuration and no other state.
//! Values are dynamic JSON since the inquiry context is free-form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::inquiry::Inquiry;
use crate::error::{AbacError, Result};

/// Predicate over an inquiry value
pub trait Condition: Send + Sync {
    fn satisfied(&self, what: &Value, request: &Inquiry) -> bool;
}

/// Satisfied if the value is a string equal to `equals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStringEqual")]
pub struct StringEqualCondition {
    equals: String,
}

#[derive(Deserialize)]
struct RawStringEqual {
    equals: Value,
}

impl TryFrom<RawStringEqual> for StringEqualCondition {
    type Error = AbacError;

    fn try_from(raw: RawStringEqual) -> Result<Self> {
        StringEqualCondition::new(raw.equals)
    }
}

impl StringEqualCondition {
    /// Create a new condition
    ///
    /// # Errors
    ///
    /// Returns `Config` if `equals` is not a JSON string.
    pub fn new(equals: Value) -> Result<Self> {
        match equals {
            Value::String(equals) => Ok(StringEqualCondition { equals }),
            other => Err(AbacError::Config(format!(
                "equals property should be a string, got {other}"
            ))),
        }
    }

    pub fn equals(&self) -> &str {
        &self.equals
    }
}

impl From<&str> for StringEqualCondition {
    fn from(equals: &str) -> Self {
        StringEqualCondition {
            equals: equals.to_string(),
        }
    }
}

impl Condition for StringEqualCondition {
    fn satisfied(&self, what: &Value, _request: &Inquiry) -> bool {
        what.as_str() == Some(self.equals.as_str())
    }
}

/// Satisfied when the value is a list of pairs whose two elements are equal strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringPairsEqualCondition;

impl Condition for StringPairsEqualCondition {
    fn satisfied(&self, what: &Value, _request: &Inquiry) -> bool {
        let Some(pairs) = what.as_array() else {
            return false;
        };

        pairs.iter().all(|pair| match pair.as_array().map(Vec::as_slice) {
            Some([left, right]) => {
                // Rejects only when neither side is a string; a mixed pair
                // still fails on the equality check below.
                if !left.is_string() && !right.is_string() {
                    return false;
                }
                left == right
            }
            _ => false,
        })
    }
}
