//! Matcher configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! default_start_tag = "<"
//! default_end_tag = ">"
//!
//! [checker]
//! kind = "regex"
//! cache_size = 1024
//! ```

use serde::{Deserialize, Serialize};

use super::checker::{Checker, CheckerKind};
use super::policy::{Policy, DEFAULT_END_TAG, DEFAULT_START_TAG};
use crate::error::{AbacError, Result};

/// Checker selection and policy defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub checker: CheckerKind,
    /// Tag applied to policies built with `new_policy`
    pub default_start_tag: char,
    pub default_end_tag: char,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            checker: CheckerKind::default(),
            default_start_tag: DEFAULT_START_TAG,
            default_end_tag: DEFAULT_END_TAG,
        }
    }
}

impl MatcherConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: MatcherConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check configuration invariants
    ///
    /// # Errors
    ///
    /// Returns `Config` for a zero regex cache size, identical tags, or
    /// whitespace tags.
    pub fn validate(&self) -> Result<()> {
        if let CheckerKind::Regex { cache_size: 0 } = self.checker {
            return Err(AbacError::Config(
                "regex checker cache_size must be at least 1".to_string(),
            ));
        }

        if self.default_start_tag == self.default_end_tag {
            return Err(AbacError::Config(format!(
                "start and end tags must differ, both are {:?}",
                self.default_start_tag
            )));
        }

        for tag in [self.default_start_tag, self.default_end_tag] {
            if tag.is_whitespace() {
                return Err(AbacError::Config(format!(
                    "tag {tag:?} must not be whitespace"
                )));
            }
        }

        Ok(())
    }

    /// Construct the configured checker
    pub fn build_checker(&self) -> Box<dyn Checker> {
        self.checker.build()
    }

    /// Empty policy carrying the configured tags
    pub fn new_policy(&self, uid: impl Into<String>) -> Policy {
        Policy::new(uid).with_tags(self.default_start_tag, self.default_end_tag)
    }
}
