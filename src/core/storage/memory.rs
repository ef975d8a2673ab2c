//! In-memory policy store

use parking_lot::RwLock;
use tracing::debug;

use super::{PolicyStore, StoreError, StoreResult};
use crate::core::checker::Checker;
use crate::core::inquiry::Inquiry;
use crate::core::policy::{Policy, ACTIONS, RESOURCES, SUBJECTS};

/// Insertion-ordered store kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    policies: RwLock<Vec<Policy>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.policies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.read().is_empty()
    }
}

/// Does every matchable field of `policy` fit the inquiry?
fn fits_inquiry(checker: &dyn Checker, policy: &Policy, inquiry: &Inquiry) -> bool {
    [SUBJECTS, ACTIONS, RESOURCES].iter().all(|field| {
        inquiry
            .field(field)
            .is_some_and(|what| checker.fits(policy, field, what))
    })
}

impl PolicyStore for MemoryStore {
    fn add(&self, policy: Policy) -> StoreResult<()> {
        let mut policies = self.policies.write();
        if policies.iter().any(|p| p.uid == policy.uid) {
            return Err(StoreError::Conflict(format!(
                "policy {} already exists",
                policy.uid
            )));
        }
        debug!(uid = %policy.uid, "Adding policy");
        policies.push(policy);
        Ok(())
    }

    /// Replaces the policy with the same uid, or appends it
    fn update(&self, policy: Policy) -> StoreResult<()> {
        let mut policies = self.policies.write();
        match policies.iter_mut().find(|p| p.uid == policy.uid) {
            Some(existing) => *existing = policy,
            None => policies.push(policy),
        }
        Ok(())
    }

    /// Deleting an unknown uid is a no-op
    fn delete(&self, uid: &str) -> StoreResult<()> {
        self.policies.write().retain(|p| p.uid != uid);
        Ok(())
    }

    fn get(&self, uid: &str) -> StoreResult<Option<Policy>> {
        Ok(self.policies.read().iter().find(|p| p.uid == uid).cloned())
    }

    fn get_all(&self, limit: usize, offset: usize) -> StoreResult<Vec<Policy>> {
        Ok(self
            .policies
            .read()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn find_for_inquiry(
        &self,
        inquiry: &Inquiry,
        checker: Option<&dyn Checker>,
    ) -> StoreResult<Vec<Policy>> {
        let policies = self.policies.read();
        let found = match checker {
            Some(checker) => policies
                .iter()
                .filter(|p| fits_inquiry(checker, p, inquiry))
                .cloned()
                .collect(),
            None => policies.clone(),
        };
        Ok(found)
    }
}
