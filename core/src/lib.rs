// amaya_cart/src/lib.rs

//! Amaya Cart: the shopping-cart state container behind the Amaya storefront.
//!
//! The cart is an ordered list of line items with a small set of rules:
//!  - Adding a product already in the cart bumps its quantity; the first
//!    snapshot of the product is kept.
//!  - Setting a quantity to zero (or below) removes the line.
//!  - Updates and removals for products not in the cart do nothing.
//!  - Totals and counts are derived on demand, never stored.
//!  - Every mutation writes the full snapshot to a key-value slot, and opening
//!    a store restores from that slot, falling back to an empty cart.

pub mod codec;
pub mod error;
pub mod model;
pub mod shared;
pub mod storage;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::codec::CART_SCHEMA_VERSION;
pub use crate::error::{CartError, CartResult};
pub use crate::model::{Badge, CartLineItem, Product, ProductId, Quantity};
pub use crate::shared::SharedCart;
pub use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, QueuedStorage};
pub use crate::store::{
  CartAction, CartChange, CartStore, CartStoreConfig, Listener, SubscriptionId, DEFAULT_STORAGE_KEY,
};

/*
    Typical wiring:
    1. Pick a storage backend (`FileStorage` on disk, `MemoryStorage` in tests,
       optionally wrapped in `QueuedStorage` for background writes).
    2. `SharedCart::open(Arc::new(storage), CartStoreConfig::default())` once per session.
    3. Pass clones of the `SharedCart` to whatever needs the cart.
    4. Views call `subscribe` to re-render, and the mutation methods on user events.
*/
