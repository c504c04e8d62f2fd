// amaya_cart/src/store/reducer.rs

//! The pure transition function behind every cart mutation.

use super::action::{CartAction, CartChange};
use crate::model::{CartLineItem, ProductId, Quantity};

/// Applies `action` to `items` in place and reports the effect.
///
/// Invariants kept on every path: at most one line per product id, no line
/// with quantity 0, and existing lines never move.
pub fn reduce(items: &mut Vec<CartLineItem>, action: CartAction) -> CartChange {
  match action {
    CartAction::AddItem(product) => match items.iter_mut().find(|line| line.id() == product.id) {
      // Keep the first snapshot; only the count moves.
      Some(line) => {
        line.quantity = line.quantity.saturating_add(1);
        CartChange::Incremented {
          product_id: line.id(),
          quantity: line.quantity,
        }
      }
      None => {
        let product_id = product.id;
        items.push(CartLineItem::new(product, 1));
        CartChange::Added { product_id }
      }
    },

    CartAction::RemoveItem(product_id) => remove_line(items, product_id),

    CartAction::UpdateQuantity { product_id, quantity } => {
      if quantity <= 0 {
        return remove_line(items, product_id);
      }
      let quantity = Quantity::try_from(quantity).unwrap_or(Quantity::MAX);
      match items.iter_mut().find(|line| line.id() == product_id) {
        Some(line) => {
          line.quantity = quantity;
          CartChange::QuantitySet { product_id, quantity }
        }
        None => CartChange::Unchanged,
      }
    }

    CartAction::Clear => {
      let removed = items.len();
      items.clear();
      CartChange::Cleared { removed }
    }
  }
}

fn remove_line(items: &mut Vec<CartLineItem>, product_id: ProductId) -> CartChange {
  match items.iter().position(|line| line.id() == product_id) {
    Some(idx) => {
      items.remove(idx);
      CartChange::Removed { product_id }
    }
    None => CartChange::Unchanged,
  }
}

/// Sum of `price * quantity` over all lines.
pub fn total(items: &[CartLineItem]) -> f64 {
  items.iter().map(CartLineItem::line_total).sum()
}

/// Total units across all lines (not distinct products).
pub fn item_count(items: &[CartLineItem]) -> u64 {
  items.iter().map(|line| u64::from(line.quantity)).sum()
}

pub fn contains(items: &[CartLineItem], product_id: ProductId) -> bool {
  items.iter().any(|line| line.id() == product_id)
}
