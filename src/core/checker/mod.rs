//! Checkers decide whether an inquiry value fits a policy field
//!
//! Three strategies are available:
//! - `RegexChecker` - literals plus tagged regular expressions
//! - `StringExactChecker` - exact string equality
//! - `StringFuzzyChecker` - substring containment
//!
//! All of them scan the field's pattern list in order and stop at the first
//! item that accepts the value. A missing field behaves like an empty one.

mod regex;
mod string;

pub use self::regex::{RegexChecker, DEFAULT_CACHE_SIZE};
pub use self::string::{StringChecker, StringExactChecker, StringFuzzyChecker};

use serde::{Deserialize, Serialize};

use super::policy::Policy;

/// Matching strategy for policy fields
pub trait Checker: Send + Sync {
    /// Does `policy` accept `what` in its `field`?
    fn fits(&self, policy: &Policy, field: &str, what: &str) -> bool;
}

/// Checker selected by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckerKind {
    Regex {
        #[serde(default = "default_cache_size")]
        cache_size: usize,
    },
    StringExact,
    StringFuzzy,
}

fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

impl Default for CheckerKind {
    fn default() -> Self {
        CheckerKind::Regex {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl CheckerKind {
    /// Construct the configured checker
    pub fn build(&self) -> Box<dyn Checker> {
        match self {
            CheckerKind::Regex { cache_size } => Box::new(RegexChecker::new(*cache_size)),
            CheckerKind::StringExact => Box::new(StringExactChecker),
            CheckerKind::StringFuzzy => Box::new(StringFuzzyChecker),
        }
    }
}
