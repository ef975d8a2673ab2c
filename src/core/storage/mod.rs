//! Policy storage
//!
//! `PolicyStore` is the interface every backend implements. Error semantics
//! belong to the backend and travel through `StoreError` untouched.
//! `ObservableMutationStore` decorates any store and tells subscribers about
//! successful mutations.

mod memory;
mod observable;
mod subject;

pub use memory::MemoryStore;
pub use observable::ObservableMutationStore;
pub use subject::{Observer, Subject, SubscriptionId};

use thiserror::Error;

use super::checker::Checker;
use super::inquiry::Inquiry;
use super::policy::Policy;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("observer failed: {0}")]
    Observer(#[source] anyhow::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend for policies
pub trait PolicyStore: Send + Sync {
    /// Store a new policy
    fn add(&self, policy: Policy) -> StoreResult<()>;

    /// Replace a stored policy
    fn update(&self, policy: Policy) -> StoreResult<()>;

    /// Remove a policy by uid
    fn delete(&self, uid: &str) -> StoreResult<()>;

    fn get(&self, uid: &str) -> StoreResult<Option<Policy>>;

    /// Page through stored policies
    fn get_all(&self, limit: usize, offset: usize) -> StoreResult<Vec<Policy>>;

    /// Candidate policies for an inquiry
    ///
    /// Backends may return a superset; a checker, when given, lets them
    /// narrow the candidates.
    fn find_for_inquiry(
        &self,
        inquiry: &Inquiry,
        checker: Option<&dyn Checker>,
    ) -> StoreResult<Vec<Policy>>;
}
