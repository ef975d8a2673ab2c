//! Store decorator that notifies observers about mutations
//!
//! Reads are proxied as-is. `add`, `update` and `delete` notify every
//! subscriber once, after the wrapped store reports success. A failed
//! mutation notifies nobody.

use std::sync::Arc;
use tracing::debug;

use super::{Observer, PolicyStore, StoreError, StoreResult, Subject, SubscriptionId};
use crate::core::checker::Checker;
use crate::core::inquiry::Inquiry;
use crate::core::policy::Policy;

/// Wraps a `PolicyStore` and publishes its mutations
#[derive(Debug)]
pub struct ObservableMutationStore<S> {
    store: S,
    subject: Subject,
}

impl<S: PolicyStore> ObservableMutationStore<S> {
    pub fn new(store: S) -> Self {
        ObservableMutationStore {
            store,
            subject: Subject::new(),
        }
    }

    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> SubscriptionId {
        self.subject.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subject.unsubscribe(id)
    }

    /// Notify all observers; their failure is reported as `StoreError::Observer`
    pub fn notify(&self) -> StoreResult<()> {
        self.subject.notify().map_err(StoreError::Observer)
    }

    /// Wrapped store
    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn notify_after<T>(&self, operation: &str, result: StoreResult<T>) -> StoreResult<T> {
        let value = result?;
        debug!(operation, "Policy store mutated");
        self.notify()?;
        Ok(value)
    }
}

impl<S: PolicyStore> PolicyStore for ObservableMutationStore<S> {
    fn add(&self, policy: Policy) -> StoreResult<()> {
        self.notify_after("add", self.store.add(policy))
    }

    fn update(&self, policy: Policy) -> StoreResult<()> {
        self.notify_after("update", self.store.update(policy))
    }

    fn delete(&self, uid: &str) -> StoreResult<()> {
        self.notify_after("delete", self.store.delete(uid))
    }

    fn get(&self, uid: &str) -> StoreResult<Option<Policy>> {
        self.store.get(uid)
    }

    fn get_all(&self, limit: usize, offset: usize) -> StoreResult<Vec<Policy>> {
        self.store.get_all(limit, offset)
    }

    fn find_for_inquiry(
        &self,
        inquiry: &Inquiry,
        checker: Option<&dyn Checker>,
    ) -> StoreResult<Vec<Policy>> {
        self.store.find_for_inquiry(inquiry, checker)
    }
}
