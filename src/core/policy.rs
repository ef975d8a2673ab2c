//! Policy document structure
//!
//! A policy lists accepted values per field. Each value is either a literal
//! or a regular expression wrapped in the policy's own tag characters, e.g.
//! `<[a-z]+>` with the default `<` / `>` tags.

use serde::{Deserialize, Serialize};

/// Default character opening an embedded regex
pub const DEFAULT_START_TAG: char = '<';

/// Default character closing an embedded regex
pub const DEFAULT_END_TAG: char = '>';

/// Field name for subject patterns
pub const SUBJECTS: &str = "subjects";
/// Field name for action patterns
pub const ACTIONS: &str = "actions";
/// Field name for resource patterns
pub const RESOURCES: &str = "resources";

/// Stored access-control rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    pub uid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default)]
    pub subjects: Vec<String>,

    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub resources: Vec<String>,

    /// Character opening an embedded regex
    #[serde(default = "default_start_tag")]
    pub start_tag: char,

    /// Character closing an embedded regex
    #[serde(default = "default_end_tag")]
    pub end_tag: char,
}

fn default_start_tag() -> char {
    DEFAULT_START_TAG
}

fn default_end_tag() -> char {
    DEFAULT_END_TAG
}

impl Policy {
    /// Create an empty policy with default tags
    pub fn new(uid: impl Into<String>) -> Self {
        Policy {
            uid: uid.into(),
            description: String::new(),
            subjects: Vec::new(),
            actions: Vec::new(),
            resources: Vec::new(),
            start_tag: DEFAULT_START_TAG,
            end_tag: DEFAULT_END_TAG,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    /// Override the regex tag characters
    pub fn with_tags(mut self, start_tag: char, end_tag: char) -> Self {
        self.start_tag = start_tag;
        self.end_tag = end_tag;
        self
    }

    /// Ordered pattern list for a named field
    ///
    /// Unknown field names return `None`; checkers treat that as an empty list.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        match name {
            SUBJECTS => Some(&self.subjects),
            ACTIONS => Some(&self.actions),
            RESOURCES => Some(&self.resources),
            _ => None,
        }
    }

    /// Parse a policy from JSON
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this policy to pretty JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
