// amaya_cart/src/store/action.rs

//! Mutation requests accepted by the cart and the outcome each one produced.

use crate::model::{Product, ProductId, Quantity};

/// One of the four cart mutations, in reducer form.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
  /// Append the product with quantity 1, or bump the existing line by 1.
  AddItem(Product),
  /// Drop the line for this id. Absent ids are ignored.
  RemoveItem(ProductId),
  /// Absolute set. `quantity <= 0` removes the line; absent ids are ignored.
  UpdateQuantity { product_id: ProductId, quantity: i64 },
  /// Empty the cart.
  Clear,
}

impl CartAction {
  /// Short name used in tracing fields.
  pub fn kind(&self) -> &'static str {
    match self {
      CartAction::AddItem(_) => "add_item",
      CartAction::RemoveItem(_) => "remove_item",
      CartAction::UpdateQuantity { .. } => "update_quantity",
      CartAction::Clear => "clear",
    }
  }
}

/// What a `CartAction` actually did to the line-item sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
  /// A new line was appended with quantity 1.
  Added { product_id: ProductId },
  /// An existing line's quantity went up by one.
  Incremented { product_id: ProductId, quantity: Quantity },
  /// An existing line's quantity was set to an absolute value.
  QuantitySet { product_id: ProductId, quantity: Quantity },
  /// A line was deleted, either directly or by a non-positive quantity update.
  Removed { product_id: ProductId },
  /// Every line was dropped.
  Cleared { removed: usize },
  /// The action targeted an absent id. The snapshot is still re-persisted.
  Unchanged,
}

impl CartChange {
  pub fn is_unchanged(&self) -> bool {
    matches!(self, CartChange::Unchanged)
  }
}
