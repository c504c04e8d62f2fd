// amaya_cart/src/codec.rs

//! Versioned JSON snapshot format for the persisted cart.
//!
//! The stored blob is `{"version": 1, "items": [...]}` where every item is a
//! flat `CartLineItem` object. Anything else (including the bare array written
//! by earlier storefront builds) is rejected; `restore` turns any rejection into
//! an empty cart.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{event, Level};

use crate::error::{CartError, CartResult};
use crate::model::CartLineItem;

/// Current on-disk schema version.
pub const CART_SCHEMA_VERSION: u64 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
  version: u64,
  items: &'a [CartLineItem],
}

#[derive(Deserialize)]
struct Envelope {
  items: Vec<CartLineItem>,
}

/// Serialises the full line-item sequence into a snapshot blob.
///
/// Non-finite prices or ratings would be written as `null` and make the whole
/// blob unreadable, so they are rejected here instead.
pub fn encode(items: &[CartLineItem]) -> CartResult<String> {
  if let Some(line) = items
    .iter()
    .find(|line| !line.product.price.is_finite() || !line.product.rating.is_finite())
  {
    return Err(CartError::InvalidSnapshot(format!(
      "product {} has a non-finite price or rating",
      line.id()
    )));
  }
  let envelope = EnvelopeRef {
    version: CART_SCHEMA_VERSION,
    items,
  };
  Ok(serde_json::to_string(&envelope)?)
}

/// Parses and validates a snapshot blob.
pub fn decode(blob: &str) -> CartResult<Vec<CartLineItem>> {
  let value: Value = serde_json::from_str(blob)?;

  let found = value.get("version").and_then(Value::as_u64);
  if found != Some(CART_SCHEMA_VERSION) {
    return Err(CartError::SchemaVersion {
      found,
      expected: CART_SCHEMA_VERSION,
    });
  }

  let envelope: Envelope = serde_json::from_value(value)?;
  validate(&envelope.items)?;
  Ok(envelope.items)
}

fn validate(items: &[CartLineItem]) -> CartResult<()> {
  let mut seen = HashSet::with_capacity(items.len());
  for line in items {
    if line.quantity == 0 {
      return Err(CartError::InvalidSnapshot(format!(
        "line for product {} has quantity 0",
        line.id()
      )));
    }
    if !seen.insert(line.id()) {
      return Err(CartError::InvalidSnapshot(format!(
        "product {} appears more than once",
        line.id()
      )));
    }
  }
  Ok(())
}

/// Initial line items from whatever the storage slot held.
///
/// Never fails: a missing, corrupt, outdated or invalid blob yields an empty cart.
pub fn restore(blob: Option<&str>) -> Vec<CartLineItem> {
  let Some(blob) = blob else {
    event!(Level::DEBUG, "No stored cart snapshot; starting empty.");
    return Vec::new();
  };
  match decode(blob) {
    Ok(items) => {
      event!(Level::DEBUG, lines = items.len(), "Restored cart snapshot.");
      items
    }
    Err(e) => {
      event!(Level::WARN, error = %e, "Discarding unreadable cart snapshot; starting empty.");
      Vec::new()
    }
  }
}
