//! Checker for literal values mixed with tagged regular expressions
//!
//! E.g. with `<` / `>` tags, `Dog`, `Doge` and `Dogs` fit `<Dog[se]?>`
//! while `Dogger` doesn't.

use tracing::{error, trace};

use super::Checker;
use crate::core::pattern::{CacheStats, PatternCache};
use crate::core::policy::Policy;

/// Default number of compiled patterns kept per checker
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Checker that uses regular expressions
pub struct RegexChecker {
    cache: PatternCache,
}

impl RegexChecker {
    /// Create a regex checker caching up to `cache_size` compiled patterns
    pub fn new(cache_size: usize) -> Self {
        RegexChecker {
            cache: PatternCache::new(cache_size),
        }
    }

    /// Compiled pattern cache
    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for RegexChecker {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl Checker for RegexChecker {
    /// Items without any tag character compare as plain strings. A pattern
    /// that fails to compile makes the whole call return `false`, remaining
    /// items are not consulted.
    fn fits(&self, policy: &Policy, field: &str, what: &str) -> bool {
        let items = policy.field(field).unwrap_or_default();

        for item in items {
            if !item.contains(policy.start_tag) && !item.contains(policy.end_tag) {
                if item == what {
                    trace!(policy = %policy.uid, field, item = %item, "Literal match");
                    return true;
                }
                continue;
            }

            let regex = match self.cache.get_or_compile(item, policy.start_tag, policy.end_tag) {
                Ok(regex) => regex,
                Err(e) => {
                    error!(
                        policy = %policy.uid,
                        field,
                        pattern = %item,
                        error = %e,
                        "Pattern compilation failed, rejecting field"
                    );
                    return false;
                }
            };

            // Anchored at the start of the value
            if regex.find(what).is_some_and(|m| m.start() == 0) {
                trace!(policy = %policy.uid, field, pattern = %item, "Regex match");
                return true;
            }
        }

        false
    }
}

impl std::fmt::Debug for RegexChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexChecker")
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::{ACTIONS, RESOURCES, SUBJECTS};

    #[test]
    fn test_regex_fits() {
        let checker = RegexChecker::default();
        let policy = Policy::new("p").with_subjects(["<Dog[se]?>"]);

        assert!(checker.fits(&policy, SUBJECTS, "Dog"));
        assert!(checker.fits(&policy, SUBJECTS, "Doge"));
        assert!(checker.fits(&policy, SUBJECTS, "Dogs"));
        assert!(!checker.fits(&policy, SUBJECTS, "Dogger"));
    }

    #[test]
    fn test_literals_skip_compilation() {
        let checker = RegexChecker::new(8);
        let policy = Policy::new("p").with_actions(["read", "write"]);

        assert!(checker.fits(&policy, ACTIONS, "write"));
        assert!(!checker.fits(&policy, ACTIONS, "delete"));
        assert!(checker.cache().is_empty());
        assert_eq!(checker.cache_stats().misses, 0);
    }

    #[test]
    fn test_missing_or_empty_field() {
        let checker = RegexChecker::default();
        let policy = Policy::new("p");

        assert!(!checker.fits(&policy, RESOURCES, ""));
        assert!(!checker.fits(&policy, "unknown", "anything"));
    }

    #[test]
    fn test_compile_failure_aborts_scan() {
        let checker = RegexChecker::default();
        // Broken pattern precedes a literal that would otherwise match
        let policy = Policy::new("p").with_subjects(["<[a-z>", "alice"]);

        assert!(!checker.fits(&policy, SUBJECTS, "alice"));
    }

    #[test]
    fn test_match_before_broken_pattern() {
        let checker = RegexChecker::default();
        let policy = Policy::new("p").with_subjects(["alice", "<[a-z>"]);

        assert!(checker.fits(&policy, SUBJECTS, "alice"));
    }

    #[test]
    fn test_lone_tag_character_is_not_literal() {
        let checker = RegexChecker::default();
        // Contains only the end tag: not a literal, and unbalanced
        let policy = Policy::new("p").with_subjects(["a>b", "a>b"]);

        assert!(!checker.fits(&policy, SUBJECTS, "a>b"));
    }

    #[test]
    fn test_repeated_pattern_compiles_once() {
        let checker = RegexChecker::default();
        let policy = Policy::new("p").with_resources(["books:<\\d+>"]);

        for i in 0..10 {
            assert!(checker.fits(&policy, RESOURCES, &format!("books:{}", i)));
        }

        let stats = checker.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 9);
    }
}
