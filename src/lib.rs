//! # abac-rs - Attribute Matching for ABAC Policies
//!
//! `abac-rs` decides whether an inquiry attribute "fits" the accepted values
//! a policy lists for a field (subjects, actions, resources):
//!
//! - **Regex checker**: literals mixed with tagged regular expressions (`<[a-z]+>`),
//!   compiled once and kept in a bounded LRU cache
//! - **String checkers**: exact equality or substring containment
//! - **Conditions**: standalone predicates over inquiry values
//! - **Observable store**: a store decorator notifying subscribers after every
//!   successful mutation
//!
//! ## Quick Start
//!
//! ```rust
//! use abac_rs::{Checker, Policy, RegexChecker, SUBJECTS};
//!
//! let checker = RegexChecker::default();
//! let policy = Policy::new("dogs").with_subjects(["<Dog[se]?>", "Cat"]);
//!
//! assert!(checker.fits(&policy, SUBJECTS, "Doge"));
//! assert!(checker.fits(&policy, SUBJECTS, "Cat"));
//! assert!(!checker.fits(&policy, SUBJECTS, "Dogger"));
//! ```
//!
//! ## Watching a store
//!
//! ```rust
//! use abac_rs::{MemoryStore, ObservableMutationStore, Policy, PolicyStore};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), abac_rs::StoreError> {
//! let store = ObservableMutationStore::new(MemoryStore::new());
//! store.subscribe(Arc::new(|| -> anyhow::Result<()> {
//!     // invalidate cached decisions here
//!     Ok(())
//! }));
//!
//! store.add(Policy::new("p1").with_actions(["read"]))?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;

pub use crate::core::{
    checker::{
        Checker, CheckerKind, RegexChecker, StringChecker, StringExactChecker,
        StringFuzzyChecker, DEFAULT_CACHE_SIZE,
    },
    condition::{Condition, StringEqualCondition, StringPairsEqualCondition},
    config::MatcherConfig,
    inquiry::Inquiry,
    pattern::{CacheStats, PatternCache, PatternCompiler},
    policy::{Policy, ACTIONS, DEFAULT_END_TAG, DEFAULT_START_TAG, RESOURCES, SUBJECTS},
    storage::{
        MemoryStore, ObservableMutationStore, Observer, PolicyStore, StoreError, StoreResult,
        Subject, SubscriptionId,
    },
};
pub use crate::error::{AbacError, Result};
