// amaya_cart/src/model/line_item.rs

use serde::{Deserialize, Serialize};

use super::product::{Product, ProductId};

/// Units of one product held in the cart. Stored quantities are always >= 1.
pub type Quantity = u32;

/// A product snapshot plus how many units of it are in the cart.
///
/// Serialises as a single flat object: the product's fields with `quantity`
/// alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
  #[serde(flatten)]
  pub product: Product,
  pub quantity: Quantity,
}

impl CartLineItem {
  pub fn new(product: Product, quantity: Quantity) -> Self {
    Self { product, quantity }
  }

  pub fn id(&self) -> ProductId {
    self.product.id
  }

  pub fn price(&self) -> f64 {
    self.product.price
  }

  /// `price * quantity` for this line.
  pub fn line_total(&self) -> f64 {
    self.product.price * f64::from(self.quantity)
  }
}
