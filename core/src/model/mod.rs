//! Cart data model: catalogue products and the line items built from them.

pub mod line_item;
pub mod product;

pub use line_item::{CartLineItem, Quantity};
pub use product::{Badge, Product, ProductId};
