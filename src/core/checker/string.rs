//! Checkers comparing plain strings
//!
//! Items wrapped in the policy's tags have exactly the first and last
//! character stripped before comparison. The inner text is compared as a
//! plain string, never as a regex.

use super::Checker;
use crate::core::policy::Policy;

/// Checker built on a string comparison primitive
pub trait StringChecker: Send + Sync {
    /// Compares the inquiry value (`needle`) to a policy item (`haystack`)
    fn compare(&self, needle: &str, haystack: &str) -> bool;

    /// Shared `fits` algorithm for string checkers
    fn fits_items(&self, policy: &Policy, field: &str, what: &str) -> bool {
        policy
            .field(field)
            .unwrap_or_default()
            .iter()
            .any(|item| self.compare(what, strip_tags(item, policy.start_tag, policy.end_tag)))
    }
}

/// Remove the tag characters if `item` starts with `start_tag` and ends with `end_tag`
///
/// Only the first and last positions are inspected. A single character that
/// is both tags strips to the empty string.
fn strip_tags(item: &str, start_tag: char, end_tag: char) -> &str {
    let mut chars = item.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == start_tag && last == end_tag => {
            &item[first.len_utf8()..item.len() - last.len_utf8()]
        }
        (Some(only), None) if only == start_tag && only == end_tag => "",
        _ => item,
    }
}

/// Checker that uses exact string equality. Case-sensitive.
///
/// E.g. `sun` vs `sunny` - false, `sun` vs `sun` - true
#[derive(Debug, Clone, Copy, Default)]
pub struct StringExactChecker;

impl StringChecker for StringExactChecker {
    fn compare(&self, needle: &str, haystack: &str) -> bool {
        needle == haystack
    }
}

impl Checker for StringExactChecker {
    fn fits(&self, policy: &Policy, field: &str, what: &str) -> bool {
        self.fits_items(policy, field, what)
    }
}

/// Checker that uses substring containment. Case-sensitive.
///
/// E.g. `sun` in `sunny` - true, `sun` in `unsung` - true
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFuzzyChecker;

impl StringChecker for StringFuzzyChecker {
    fn compare(&self, needle: &str, haystack: &str) -> bool {
        haystack.contains(needle)
    }
}

impl Checker for StringFuzzyChecker {
    fn fits(&self, policy: &Policy, field: &str, what: &str) -> bool {
        self.fits_items(policy, field, what)
    }
}
