// amaya_cart/src/storage/mod.rs

//! Durable key-value slots the cart snapshot is written to.
//!
//! The cart only ever touches one key. Backends must be safe to share across
//! threads because `SharedCart` hands the store out behind a lock.

pub mod file;
pub mod memory;
pub mod queued;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use queued::QueuedStorage;

use crate::error::CartResult;

/// A string-valued key-value slot.
pub trait KeyValueStorage: Send + Sync {
  /// Reads the value under `key`. A missing key is `Ok(None)`, not an error.
  fn get(&self, key: &str) -> CartResult<Option<String>>;

  /// Overwrites the value under `key` with `value`.
  fn set(&self, key: &str, value: &str) -> CartResult<()>;

  /// Deletes `key`. Deleting a missing key succeeds.
  fn remove(&self, key: &str) -> CartResult<()>;
}
