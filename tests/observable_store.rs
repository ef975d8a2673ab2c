//! Notification contract of the observable store wrapper

use abac_rs::{
    Checker, Inquiry, MemoryStore, ObservableMutationStore, Observer, Policy, PolicyStore,
    RegexChecker, StoreError, StoreResult, ACTIONS,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store whose mutations always fail, for checking the no-notify path
struct BrokenStore;

impl PolicyStore for BrokenStore {
    fn add(&self, policy: Policy) -> StoreResult<()> {
        Err(StoreError::Unexpected(anyhow::anyhow!(
            "disk full while adding {}",
            policy.uid
        )))
    }

    fn update(&self, policy: Policy) -> StoreResult<()> {
        Err(StoreError::NotFound(policy.uid))
    }

    fn delete(&self, uid: &str) -> StoreResult<()> {
        Err(StoreError::NotFound(uid.to_string()))
    }

    fn get(&self, _uid: &str) -> StoreResult<Option<Policy>> {
        Err(StoreError::Unexpected(anyhow::anyhow!("connection reset")))
    }

    fn get_all(&self, _limit: usize, _offset: usize) -> StoreResult<Vec<Policy>> {
        Ok(Vec::new())
    }

    fn find_for_inquiry(
        &self,
        _inquiry: &Inquiry,
        _checker: Option<&dyn Checker>,
    ) -> StoreResult<Vec<Policy>> {
        Ok(Vec::new())
    }
}

fn counter() -> (Arc<AtomicUsize>, Arc<dyn Observer>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let observer: Arc<dyn Observer> = Arc::new(move || -> anyhow::Result<()> {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    (calls, observer)
}

#[test]
fn test_observer_sees_completed_mutation() {
    let store = Arc::new(ObservableMutationStore::new(MemoryStore::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));

    // Observer reads back through the wrapper: the mutation must already be visible
    let weak = Arc::downgrade(&store);
    let log = Arc::clone(&seen);
    store.subscribe(Arc::new(move || -> anyhow::Result<()> {
        if let Some(store) = weak.upgrade() {
            log.lock().push(store.get_all(100, 0)?.len());
        }
        Ok(())
    }));

    store.add(Policy::new("a")).unwrap();
    store.add(Policy::new("b")).unwrap();
    store.delete("a").unwrap();

    assert_eq!(*seen.lock(), vec![1, 2, 1]);
}

#[test]
fn test_failed_mutations_propagate_unchanged() {
    let store = ObservableMutationStore::new(BrokenStore);
    let (calls, observer) = counter();
    store.subscribe(observer);

    match store.add(Policy::new("a")) {
        Err(StoreError::Unexpected(e)) => assert_eq!(e.to_string(), "disk full while adding a"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        store.update(Policy::new("a")),
        Err(StoreError::NotFound(uid)) if uid == "a"
    ));
    assert!(matches!(store.delete("a"), Err(StoreError::NotFound(_))));
    assert!(store.get("a").is_err());

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_observers_called_in_subscription_order() {
    let store = ObservableMutationStore::new(MemoryStore::new());
    let order = Arc::new(Mutex::new(Vec::new()));

    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        store.subscribe(Arc::new(move || -> anyhow::Result<()> {
            order.lock().push(name);
            Ok(())
        }));
    }

    store.update(Policy::new("p")).unwrap();
    assert_eq!(*order.lock(), vec!["first", "second", "third"]);
}

#[test]
fn test_reads_pass_through() {
    let store = ObservableMutationStore::new(MemoryStore::new());
    let (calls, observer) = counter();
    store.subscribe(observer);

    let open_policy = |uid: &str, action: &str| {
        Policy::new(uid)
            .with_subjects(["<.*>"])
            .with_actions([action])
            .with_resources(["<.*>"])
    };
    store.add(open_policy("readers", "<get|list>")).unwrap();
    store.add(open_policy("writers", "put")).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let checker = RegexChecker::default();
    let inquiry = Inquiry::new("alice", "list", "docs");
    let found = store.find_for_inquiry(&inquiry, Some(&checker)).unwrap();
    assert_eq!(found.len(), 1);
    assert!(checker.fits(&found[0], ACTIONS, "get"));

    assert_eq!(store.get_all(1, 1).unwrap()[0].uid, "writers");
    assert!(store.get("missing").unwrap().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_manual_notify() {
    let store = ObservableMutationStore::new(MemoryStore::new());
    let (calls, observer) = counter();
    let id = store.subscribe(observer);

    store.notify().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    store.unsubscribe(id);
    store.notify().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
