use super::*;
use crate::util::storage::MemoryStorage;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Counter {
    hits: u32,
    label: String,
}

const KEY: &str = "test/counter";

fn backend() -> (MemoryStorage, Arc<dyn StorageBackend>) {
    let storage = MemoryStorage::new();
    let shared: Arc<dyn StorageBackend> = Arc::new(storage.clone());
    (storage, shared)
}

// =============================================================
// Loading
// =============================================================

#[test]
fn load_without_record_uses_default() {
    let (_, shared) = backend();
    let durable = Durable::<Counter>::load(KEY, shared);
    assert_eq!(durable.get(), &Counter::default());
}

#[test]
fn load_with_malformed_record_uses_default() {
    let (storage, shared) = backend();
    storage.set_item(KEY, "{not json").unwrap();
    let durable = Durable::<Counter>::load(KEY, shared);
    assert_eq!(durable.get(), &Counter::default());
}

#[test]
fn load_with_wrong_shape_uses_default() {
    let (storage, shared) = backend();
    storage.set_item(KEY, r#"{"hits":"many"}"#).unwrap();
    let durable = Durable::<Counter>::load(KEY, shared);
    assert_eq!(durable.get().hits, 0);
}

#[test]
fn detached_does_not_read_storage() {
    let (storage, shared) = backend();
    storage.set_item(KEY, r#"{"hits":4,"label":"x"}"#).unwrap();
    let durable = Durable::<Counter>::detached(KEY, shared);
    assert_eq!(durable.get().hits, 0);
}

// =============================================================
// Mutation and persistence
// =============================================================

#[test]
fn mutate_writes_before_returning() {
    let (storage, shared) = backend();
    let mut durable = Durable::<Counter>::load(KEY, shared);
    durable.mutate(|c| c.hits = 3);
    assert_eq!(storage.raw(KEY).as_deref(), Some(r#"{"hits":3,"label":""}"#));
}

#[test]
fn mutate_returns_closure_output() {
    let (_, shared) = backend();
    let mut durable = Durable::<Counter>::load(KEY, shared);
    let previous = durable.mutate(|c| std::mem::replace(&mut c.hits, 9));
    assert_eq!(previous, 0);
    assert_eq!(durable.get().hits, 9);
}

#[test]
fn reload_round_trips_value() {
    let (_, shared) = backend();
    let mut durable = Durable::<Counter>::load(KEY, Arc::clone(&shared));
    durable.mutate(|c| {
        c.hits = 7;
        c.label = "seven".to_owned();
    });
    let reloaded = Durable::<Counter>::load(KEY, shared);
    assert_eq!(reloaded.get(), durable.get());
}

#[test]
fn rejected_write_is_swallowed_and_memory_keeps_value() {
    let (storage, shared) = backend();
    storage.set_read_only(true);
    let mut durable = Durable::<Counter>::load(KEY, shared);
    durable.mutate(|c| c.hits = 1);
    assert_eq!(durable.get().hits, 1);
    assert!(storage.is_empty());
}

#[test]
fn try_persist_surfaces_rejected_write() {
    let (storage, shared) = backend();
    storage.set_read_only(true);
    let durable = Durable::<Counter>::load(KEY, shared);
    assert!(matches!(durable.try_persist(), Err(StorageError::WriteRejected { .. })));
}

#[test]
fn forget_removes_record_and_resets() {
    let (storage, shared) = backend();
    let mut durable = Durable::<Counter>::load(KEY, shared);
    durable.mutate(|c| c.hits = 2);
    durable.forget();
    assert_eq!(durable.get(), &Counter::default());
    assert_eq!(storage.raw(KEY), None);
}
