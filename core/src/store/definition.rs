// amaya_cart/src/store/definition.rs

//! The `CartStore`: single owner of the cart's line items.

use std::sync::Arc;

use tracing::{event, instrument, Level};

use super::action::{CartAction, CartChange};
use super::reducer;
use super::subscriptions::{Listener, SubscriptionId, Subscribers};
use crate::codec;
use crate::error::CartResult;
use crate::model::{CartLineItem, Product, ProductId};
use crate::storage::KeyValueStorage;

/// Storage key used by the storefront.
pub const DEFAULT_STORAGE_KEY: &str = "amaya-cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreConfig {
  /// Key of the slot holding the cart snapshot.
  pub storage_key: String,
}

impl Default for CartStoreConfig {
  fn default() -> Self {
    Self {
      storage_key: DEFAULT_STORAGE_KEY.to_string(),
    }
  }
}

impl CartStoreConfig {
  pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
    Self {
      storage_key: storage_key.into(),
    }
  }
}

/// Write-through shopping cart.
///
/// Every mutation updates the in-memory line items first and then writes the
/// full snapshot to storage. The in-memory change always sticks; a failed write
/// is logged and returned so the caller can decide whether to retry with
/// [`CartStore::flush`] or ignore it.
pub struct CartStore {
  items: Vec<CartLineItem>,
  storage: Arc<dyn KeyValueStorage>,
  config: CartStoreConfig,
  subscribers: Subscribers,
}

impl CartStore {
  /// Restores the cart from `storage`.
  ///
  /// Never fails: an unreadable slot or an unusable snapshot gives an empty cart.
  #[instrument(name = "CartStore::open", skip_all, fields(key = %config.storage_key))]
  pub fn open(storage: Arc<dyn KeyValueStorage>, config: CartStoreConfig) -> Self {
    let blob = match storage.get(&config.storage_key) {
      Ok(blob) => blob,
      Err(e) => {
        event!(Level::WARN, error = %e, "Cart storage unreadable; starting empty.");
        None
      }
    };
    let items = codec::restore(blob.as_deref());
    event!(Level::INFO, lines = items.len(), "Cart store opened.");
    Self {
      items,
      storage,
      config,
      subscribers: Subscribers::default(),
    }
  }

  /// `open` with the default storage key.
  pub fn open_default(storage: Arc<dyn KeyValueStorage>) -> Self {
    Self::open(storage, CartStoreConfig::default())
  }

  pub fn config(&self) -> &CartStoreConfig {
    &self.config
  }

  // --- Mutations ---

  pub fn add_item(&mut self, product: &Product) -> CartResult<CartChange> {
    self.dispatch(CartAction::AddItem(product.clone()))
  }

  pub fn remove_item(&mut self, product_id: ProductId) -> CartResult<CartChange> {
    self.dispatch(CartAction::RemoveItem(product_id))
  }

  /// Sets the quantity for an existing line. `quantity <= 0` removes it.
  pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> CartResult<CartChange> {
    self.dispatch(CartAction::UpdateQuantity { product_id, quantity })
  }

  pub fn clear(&mut self) -> CartResult<CartChange> {
    self.dispatch(CartAction::Clear)
  }

  /// Applies any action, persists the resulting snapshot, then notifies listeners.
  #[instrument(name = "CartStore::dispatch", skip_all, fields(action = action.kind()))]
  pub fn dispatch(&mut self, action: CartAction) -> CartResult<CartChange> {
    let change = reducer::reduce(&mut self.items, action);
    event!(Level::DEBUG, ?change, lines = self.items.len(), "Cart mutated.");

    let persisted = self.persist();
    self.subscribers.notify(&change, &self.items);
    persisted.map(|()| change)
  }

  /// Re-writes the current snapshot, e.g. after a failed write.
  pub fn flush(&self) -> CartResult<()> {
    self.persist()
  }

  fn persist(&self) -> CartResult<()> {
    let result = codec::encode(&self.items).and_then(|blob| self.storage.set(&self.config.storage_key, &blob));
    if let Err(e) = &result {
      event!(
        Level::ERROR,
        key = %self.config.storage_key,
        error = %e,
        "Failed to persist cart; in-memory cart is ahead of storage."
      );
    }
    result
  }

  // --- Reads ---

  /// Current line items in first-added order.
  pub fn items(&self) -> &[CartLineItem] {
    &self.items
  }

  /// Owned copy of the current line items.
  pub fn snapshot(&self) -> Vec<CartLineItem> {
    self.items.clone()
  }

  pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
    self.items.iter().find(|line| line.id() == product_id)
  }

  /// Number of distinct products.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  // --- Derived queries ---

  pub fn total(&self) -> f64 {
    reducer::total(&self.items)
  }

  pub fn item_count(&self) -> u64 {
    reducer::item_count(&self.items)
  }

  pub fn contains(&self, product_id: ProductId) -> bool {
    reducer::contains(&self.items, product_id)
  }

  // --- Subscriptions ---

  pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
  where
    F: Fn(&CartChange, &[CartLineItem]) + Send + Sync + 'static,
  {
    let listener: Listener = Arc::new(listener);
    self.subscribers.add(listener)
  }

  /// Returns false if `id` was not subscribed.
  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.subscribers.remove(id)
  }

  pub fn subscriber_count(&self) -> usize {
    self.subscribers.len()
  }
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("items", &self.items)
      .field("config", &self.config)
      .field("subscribers", &self.subscribers)
      .finish()
  }
}
