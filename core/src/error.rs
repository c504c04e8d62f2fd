// amaya_cart/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
  /// A storage backend failed to read or write the slot under `key`.
  #[error("Storage operation failed for key '{key}'. Source: {source}")]
  Storage {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Cart snapshot could not be (de)serialized: {0}")]
  Codec(#[from] serde_json::Error),

  #[error("Unsupported cart snapshot version {found:?} (expected {expected})")]
  SchemaVersion { found: Option<u64>, expected: u64 },

  /// The blob parsed but violates a line-item invariant (zero quantity, duplicate id).
  #[error("Invalid cart snapshot: {0}")]
  InvalidSnapshot(String),

  #[error("Internal cart error: {0}")]
  Internal(String),
}

impl CartError {
  pub(crate) fn storage(key: &str, source: impl Into<AnyhowError>) -> Self {
    CartError::Storage {
      key: key.to_string(),
      source: source.into(),
    }
  }

  /// True when the error came from the storage backend rather than the codec.
  pub fn is_storage(&self) -> bool {
    matches!(self, CartError::Storage { .. })
  }
}

// Backends built on anyhow can use `?` directly. The key is unknown at this
// point, so the error is filed as internal.
impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<CartError>() {
      Ok(cart_err) => cart_err,
      Err(other) => CartError::Internal(format!("{:#}", other)),
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anyhow_wrapping_a_cart_error_unwraps() {
    let wrapped = anyhow::Error::new(CartError::InvalidSnapshot("dup".to_string()));
    assert!(matches!(CartError::from(wrapped), CartError::InvalidSnapshot(_)));

    let other = anyhow::anyhow!("disk on fire").context("writing snapshot");
    match CartError::from(other) {
      CartError::Internal(msg) => assert_eq!(msg, "writing snapshot: disk on fire"),
      e => panic!("unexpected {:?}", e),
    }
  }

  #[test]
  fn storage_helper_keeps_key() {
    let err = CartError::storage("amaya-cart", std::io::Error::other("quota"));
    assert!(err.is_storage());
    assert_eq!(err.to_string(), "Storage operation failed for key 'amaya-cart'. Source: quota");
  }
}
