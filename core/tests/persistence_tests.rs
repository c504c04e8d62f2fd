// tests/persistence_tests.rs
mod common;

use amaya_cart::codec::{decode, encode};
use amaya_cart::{
  CartError, CartStore, CartStoreConfig, FileStorage, KeyValueStorage, MemoryStorage, DEFAULT_STORAGE_KEY,
};
use common::*;
use std::sync::Arc;

#[test]
fn test_every_mutation_writes_through() {
  setup_tracing();
  let (storage, mut store) = memory_store();

  store.add_item(&rose_oil()).unwrap();
  let after_add = storage.peek(DEFAULT_STORAGE_KEY).unwrap();
  assert_eq!(decode(&after_add).unwrap(), store.snapshot());

  store.update_quantity(1, 3).unwrap();
  let after_update = storage.peek(DEFAULT_STORAGE_KEY).unwrap();
  assert_eq!(decode(&after_update).unwrap(), store.snapshot());

  store.clear().unwrap();
  let after_clear = storage.peek(DEFAULT_STORAGE_KEY).unwrap();
  assert!(decode(&after_clear).unwrap().is_empty());
}

#[test]
fn test_reopen_restores_same_cart() {
  setup_tracing();
  let (storage, mut store) = memory_store();
  store.add_item(&clay_mask()).unwrap();
  store.add_item(&rose_oil()).unwrap();
  store.add_item(&clay_mask()).unwrap();

  let reopened = CartStore::open(storage, CartStoreConfig::default());
  assert_eq!(reopened.snapshot(), store.snapshot());
  assert_eq!(reopened.total(), store.total());
}

#[test]
fn test_snapshot_encoding_is_idempotent() {
  setup_tracing();
  let (_storage, mut store) = memory_store();
  store.add_item(&rose_oil()).unwrap();
  store.add_item(&sample_sachet()).unwrap();
  store.update_quantity(3, 12).unwrap();

  let first = encode(store.items()).unwrap();
  let second = encode(&decode(&first).unwrap()).unwrap();
  assert_eq!(first, second);
}

#[test]
fn test_malformed_storage_falls_back_to_empty() {
  setup_tracing();
  for blob in [
    "",
    "not json at all",
    "{\"version\":1,\"items\":",
    "{\"version\":1,\"items\":[{\"id\":\"one\"}]}",
    "null",
  ] {
    let storage = Arc::new(MemoryStorage::with_value(DEFAULT_STORAGE_KEY, blob));
    let store = CartStore::open(storage, CartStoreConfig::default());
    assert!(store.is_empty(), "blob {:?} should yield an empty cart", blob);
  }
}

#[test]
fn test_unversioned_legacy_array_is_discarded() {
  setup_tracing();
  let legacy = r#"[{"id":1,"name":"Rose Facial Oil","description":"","price":10,"rating":4.8,
    "reviewCount":126,"image":"/images/rose-oil.jpg","inStock":true,"quantity":2}]"#;
  let storage = Arc::new(MemoryStorage::with_value(DEFAULT_STORAGE_KEY, legacy));
  let store = CartStore::open(storage, CartStoreConfig::default());
  assert!(store.is_empty());
}

#[test]
fn test_future_schema_version_is_discarded() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::with_value(
    DEFAULT_STORAGE_KEY,
    r#"{"version":2,"items":[]}"#,
  ));
  let store = CartStore::open(storage, CartStoreConfig::default());
  assert!(store.is_empty());
}

#[test]
fn test_write_failure_is_surfaced_but_memory_advances() {
  setup_tracing();
  let (storage, mut store) = memory_store();
  store.add_item(&rose_oil()).unwrap();
  let persisted_before = storage.peek(DEFAULT_STORAGE_KEY).unwrap();

  storage.fail_writes(true);
  let err = store.add_item(&clay_mask()).unwrap_err();

  assert!(err.is_storage());
  assert!(matches!(err, CartError::Storage { ref key, .. } if key == DEFAULT_STORAGE_KEY));
  assert!(store.contains(2));
  assert_eq!(storage.peek(DEFAULT_STORAGE_KEY).unwrap(), persisted_before);

  storage.fail_writes(false);
  store.flush().unwrap();
  assert_eq!(
    decode(&storage.peek(DEFAULT_STORAGE_KEY).unwrap()).unwrap(),
    store.snapshot()
  );
}

#[test]
fn test_listeners_run_even_when_write_fails() {
  setup_tracing();
  let (storage, mut store) = memory_store();
  let notified = Arc::new(std::sync::atomic::AtomicUsize::new(0));
  let counter = notified.clone();
  store.subscribe(move |_, _| {
    counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
  });

  storage.fail_writes(true);
  assert!(store.add_item(&rose_oil()).is_err());
  assert_eq!(notified.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_file_storage_round_trip() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = Arc::new(FileStorage::new(dir.path().join("state")));

  {
    let mut store = CartStore::open(storage.clone(), CartStoreConfig::default());
    assert!(store.is_empty());
    store.add_item(&rose_oil()).unwrap();
    store.add_item(&rose_oil()).unwrap();
    store.add_item(&clay_mask()).unwrap();
  }

  let path = storage.path_for(DEFAULT_STORAGE_KEY);
  assert!(path.exists());
  assert!(!path.with_extension("json.tmp").exists());

  let reopened = CartStore::open(storage, CartStoreConfig::default());
  assert_eq!(ids_and_quantities(&reopened), vec![(1, 2), (2, 1)]);
  assert_eq!(reopened.total(), 25.0);
}

#[test]
fn test_file_storage_missing_and_remove() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path());

  assert_eq!(storage.get("nothing-here").unwrap(), None);
  storage.remove("nothing-here").unwrap();

  storage.set("cart", "{}").unwrap();
  assert_eq!(storage.get("cart").unwrap().as_deref(), Some("{}"));
  storage.remove("cart").unwrap();
  assert_eq!(storage.get("cart").unwrap(), None);
}

#[test]
fn test_unreadable_file_storage_falls_back_to_empty() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path());
  // A directory where the snapshot file should be makes the read fail.
  std::fs::create_dir_all(storage.path_for(DEFAULT_STORAGE_KEY)).unwrap();

  assert!(storage.get(DEFAULT_STORAGE_KEY).is_err());
  let store = CartStore::open(Arc::new(storage), CartStoreConfig::default());
  assert!(store.is_empty());
}

#[test]
fn test_non_finite_price_surfaces_instead_of_corrupting_storage() {
  setup_tracing();
  let (storage, mut store) = memory_store();
  store.add_item(&rose_oil()).unwrap();
  let persisted_before = storage.peek(DEFAULT_STORAGE_KEY).unwrap();

  let mut broken = clay_mask();
  broken.price = f64::NAN;
  let err = store.add_item(&broken).unwrap_err();

  assert!(matches!(err, CartError::InvalidSnapshot(_)));
  assert_eq!(storage.peek(DEFAULT_STORAGE_KEY).unwrap(), persisted_before);
  let reopened = CartStore::open(storage, CartStoreConfig::default());
  assert_eq!(ids_and_quantities(&reopened), vec![(1, 1)]);
}

#[test]
fn test_restored_prices_match_persisted_prices() {
  setup_tracing();
  let (storage, mut store) = memory_store();
  let mut serum = clay_mask();
  serum.price = 109.56350267966239;
  store.add_item(&serum).unwrap();
  store.update_quantity(serum.id, 3).unwrap();

  let reopened = CartStore::open(storage.clone(), CartStoreConfig::default());
  assert_eq!(reopened.get(serum.id).unwrap().price(), 109.56350267966239);
  assert_eq!(reopened.total(), store.total());
  assert_eq!(
    encode(reopened.items()).unwrap(),
    storage.peek(DEFAULT_STORAGE_KEY).unwrap()
  );
}
