//! Publish/subscribe list for change notifications

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Receives change notifications
pub trait Observer: Send + Sync {
    fn update(&self) -> anyhow::Result<()>;
}

impl<F> Observer for F
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    fn update(&self) -> anyhow::Result<()> {
        self()
    }
}

/// Token returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered list of observers
///
/// Observers are shared, not owned: dropping a subscription only drops this
/// list's handle.
#[derive(Default)]
pub struct Subject {
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn Observer>)>>,
    next_id: AtomicU64,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer; it is notified after all earlier subscribers
    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    /// Remove an observer, returning whether it was subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    /// Call every observer in subscription order
    ///
    /// Runs on the caller's thread and stops at the first failing observer.
    /// The list is snapshotted first, so observers may (un)subscribe while
    /// being notified.
    pub fn notify(&self) -> anyhow::Result<()> {
        let observers: Vec<Arc<dyn Observer>> = self
            .observers
            .read()
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();

        debug!(observers = observers.len(), "Notifying observers");
        for observer in observers {
            observer.update()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }
}

impl std::fmt::Debug for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_notify_in_subscription_order() {
        let subject = Subject::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let calls = Arc::clone(&calls);
            subject.subscribe(Arc::new(move || -> anyhow::Result<()> {
                calls.lock().push(n);
                Ok(())
            }));
        }

        subject.notify().unwrap();
        assert_eq!(*calls.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let subject = Subject::new();
        let calls = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&calls);
        let id = subject.subscribe(Arc::new(move || -> anyhow::Result<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        subject.notify().unwrap();
        assert!(subject.unsubscribe(id));
        assert!(!subject.unsubscribe(id));
        subject.notify().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(subject.is_empty());
    }

    #[test]
    fn test_same_observer_twice() {
        let subject = Subject::new();
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let observer: Arc<dyn Observer> = Arc::new(move || -> anyhow::Result<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let first = subject.subscribe(Arc::clone(&observer));
        subject.subscribe(observer);
        assert_eq!(subject.len(), 2);

        subject.notify().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        subject.unsubscribe(first);
        subject.notify().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failing_observer_stops_dispatch() {
        let subject = Subject::new();
        let reached = Arc::new(AtomicU64::new(0));

        subject.subscribe(Arc::new(|| -> anyhow::Result<()> {
            Err(anyhow::anyhow!("cache unavailable"))
        }));
        let counter = Arc::clone(&reached);
        subject.subscribe(Arc::new(move || -> anyhow::Result<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        let err = subject.notify().unwrap_err();
        assert_eq!(err.to_string(), "cache unavailable");
        assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_notify_without_observers() {
        assert!(Subject::new().notify().is_ok());
    }
}
