// amaya_cart/src/store/subscriptions.rs

//! Change listeners the UI layer registers to re-render after a mutation.

use std::sync::Arc;

use super::action::CartChange;
use crate::model::CartLineItem;

/// Called after every mutation, once the snapshot has been handed to storage.
/// Receives the change and a read-only view of the resulting line items.
pub type Listener = Arc<dyn Fn(&CartChange, &[CartLineItem]) + Send + Sync + 'static>;

/// Handle returned by `CartStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Subscribers {
  next_id: u64,
  listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
  pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
    self.next_id += 1;
    let id = SubscriptionId(self.next_id);
    self.listeners.push((id, listener));
    id
  }

  pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
    let before = self.listeners.len();
    self.listeners.retain(|(existing, _)| *existing != id);
    self.listeners.len() != before
  }

  pub(crate) fn len(&self) -> usize {
    self.listeners.len()
  }

  /// Notifies in subscription order.
  pub(crate) fn notify(&self, change: &CartChange, items: &[CartLineItem]) {
    for (_, listener) in &self.listeners {
      listener(change, items);
    }
  }
}

impl std::fmt::Debug for Subscribers {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscribers")
      .field("count", &self.listeners.len())
      .finish()
  }
}
