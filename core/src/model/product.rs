// amaya_cart/src/model/product.rs

//! Catalogue product values as handed to the cart by the storefront.
//!
//! The cart never validates or owns catalogue data. A `Product` is copied into
//! a line item on first add and that snapshot is kept from then on.

use serde::{Deserialize, Serialize};

/// Catalogue-wide product identifier.
pub type ProductId = u64;

/// Merchandising badge shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
  Bestseller,
  New,
  Popular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub description: String,
  /// Unit price. Expected to be non-negative; not enforced here.
  pub price: f64,
  pub rating: f64,
  pub review_count: u32,
  pub image: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  pub in_stock: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub badge: Option<Badge>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slug: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub ingredients: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub benefits: Vec<String>,
}

impl Product {
  /// Minimal in-stock product with empty descriptive fields.
  pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
    Self {
      id,
      name: name.into(),
      description: String::new(),
      price,
      rating: 0.0,
      review_count: 0,
      image: String::new(),
      category: None,
      in_stock: true,
      badge: None,
      slug: None,
      ingredients: Vec::new(),
      benefits: Vec::new(),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn with_badge(mut self, badge: Badge) -> Self {
    self.badge = Some(badge);
    self
  }

  pub fn with_image(mut self, image: impl Into<String>) -> Self {
    self.image = image.into();
    self
  }

  pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
    self.rating = rating;
    self.review_count = review_count;
    self
  }
}
