// demos/storefront/src/config.rs

use crate::errors::{AppError, Result};
use amaya_cart::DEFAULT_STORAGE_KEY;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Directory holding the cart snapshot file.
  pub data_dir: PathBuf,
  pub cart_key: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let data_dir = env::var("STOREFRONT_DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from(".storefront"));

    let cart_key = env::var("STOREFRONT_CART_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());
    if cart_key.trim().is_empty() {
      return Err(AppError::Config("STOREFRONT_CART_KEY must not be empty".to_string()));
    }

    tracing::debug!(data_dir = %data_dir.display(), cart_key = %cart_key, "Storefront configuration loaded.");
    Ok(Self { data_dir, cart_key })
  }
}
