// amaya_cart/src/shared.rs

//! A cloneable handle to one `CartStore`, handed explicitly to every view
//! that needs the cart.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::sync::Arc;

use crate::error::CartResult;
use crate::model::{CartLineItem, Product, ProductId};
use crate::storage::KeyValueStorage;
use crate::store::{CartAction, CartChange, CartStore, CartStoreConfig, SubscriptionId};

/// Shared ownership of a single cart per session.
///
/// Clones point at the same store. Mutations take the write lock for their
/// whole duration (including the storage write), so they never interleave.
///
/// Read guards from [`SharedCart::items`] block mutations while held. Drop
/// them promptly, and never hold one across an `.await`.
#[derive(Debug)]
pub struct SharedCart(Arc<RwLock<CartStore>>);

impl SharedCart {
  pub fn new(store: CartStore) -> Self {
    SharedCart(Arc::new(RwLock::new(store)))
  }

  /// Opens a store over `storage` and wraps it.
  pub fn open(storage: Arc<dyn KeyValueStorage>, config: CartStoreConfig) -> Self {
    Self::new(CartStore::open(storage, config))
  }

  /// Borrowed view of the line items, valid while the guard lives.
  pub fn items(&self) -> MappedRwLockReadGuard<'_, [CartLineItem]> {
    RwLockReadGuard::map(self.0.read(), |store| store.items())
  }

  pub fn snapshot(&self) -> Vec<CartLineItem> {
    self.0.read().snapshot()
  }

  pub fn add_item(&self, product: &Product) -> CartResult<CartChange> {
    self.0.write().add_item(product)
  }

  pub fn remove_item(&self, product_id: ProductId) -> CartResult<CartChange> {
    self.0.write().remove_item(product_id)
  }

  pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> CartResult<CartChange> {
    self.0.write().update_quantity(product_id, quantity)
  }

  pub fn clear(&self) -> CartResult<CartChange> {
    self.0.write().clear()
  }

  pub fn dispatch(&self, action: CartAction) -> CartResult<CartChange> {
    self.0.write().dispatch(action)
  }

  pub fn flush(&self) -> CartResult<()> {
    self.0.read().flush()
  }

  pub fn total(&self) -> f64 {
    self.0.read().total()
  }

  pub fn item_count(&self) -> u64 {
    self.0.read().item_count()
  }

  pub fn contains(&self, product_id: ProductId) -> bool {
    self.0.read().contains(product_id)
  }

  /// Listeners run while the store's write lock is held; they must not call
  /// back into this handle.
  pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
  where
    F: Fn(&CartChange, &[CartLineItem]) + Send + Sync + 'static,
  {
    self.0.write().subscribe(listener)
  }

  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.0.write().unsubscribe(id)
  }

  /// Runs `f` with read access to the whole store.
  pub fn with_store<R>(&self, f: impl FnOnce(&CartStore) -> R) -> R {
    f(&self.0.read())
  }
}

impl Clone for SharedCart {
  fn clone(&self) -> Self {
    SharedCart(Arc::clone(&self.0))
  }
}
