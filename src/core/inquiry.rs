//! Inquiry: the attribute values of an incoming request

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::policy::{ACTIONS, RESOURCES, SUBJECTS};

/// Request attributes checked against stored policies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub resource: String,

    /// Free-form request context, consumed by conditions
    #[serde(default)]
    pub context: HashMap<String, Value>,
}

impl Inquiry {
    pub fn new(
        subject: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Inquiry {
            subject: subject.into(),
            action: action.into(),
            resource: resource.into(),
            context: HashMap::new(),
        }
    }

    /// Add a context entry
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Attribute checked against the policy field of the same name
    ///
    /// `"subjects"` maps to `subject` and so on.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            SUBJECTS => Some(&self.subject),
            ACTIONS => Some(&self.action),
            RESOURCES => Some(&self.resource),
            _ => None,
        }
    }
}
