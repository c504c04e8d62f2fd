// amaya_cart/src/storage/memory.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use parking_lot::RwLock;

use super::KeyValueStorage;
use crate::error::{CartError, CartResult};

/// In-process storage, the equivalent of a browser's local storage for tests
/// and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  slots: RwLock<HashMap<String, String>>,
  fail_writes: AtomicBool,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Storage pre-seeded with one value.
  pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
    let storage = Self::new();
    storage.slots.write().insert(key.into(), value.into());
    storage
  }

  /// While enabled, `set` and `remove` fail as if the quota were exhausted.
  pub fn fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// Raw stored value, bypassing the trait.
  pub fn peek(&self, key: &str) -> Option<String> {
    self.slots.read().get(key).cloned()
  }

  fn check_writable(&self, key: &str) -> CartResult<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(CartError::storage(key, anyhow!("storage quota exceeded")));
    }
    Ok(())
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get(&self, key: &str) -> CartResult<Option<String>> {
    Ok(self.peek(key))
  }

  fn set(&self, key: &str, value: &str) -> CartResult<()> {
    self.check_writable(key)?;
    self.slots.write().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> CartResult<()> {
    self.check_writable(key)?;
    self.slots.write().remove(key);
    Ok(())
  }
}
