// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use amaya_cart::{Badge, CartStore, CartStoreConfig, MemoryStorage, Product};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

// --- Product fixtures ---
pub fn rose_oil() -> Product {
  Product::new(1, "Rose Facial Oil", 10.0)
    .with_description("Cold-pressed rosehip and damask rose.")
    .with_category("Oils")
    .with_rating(4.8, 126)
    .with_image("/images/rose-oil.jpg")
    .with_badge(Badge::Bestseller)
}

pub fn clay_mask() -> Product {
  Product::new(2, "Kaolin Clay Mask", 5.0)
    .with_category("Masks")
    .with_rating(4.5, 58)
    .with_image("/images/clay-mask.jpg")
}

pub fn sample_sachet() -> Product {
  Product::new(3, "Sample Sachet", 0.0).with_badge(Badge::New)
}

// --- Store helpers ---
pub fn memory_store() -> (Arc<MemoryStorage>, CartStore) {
  let storage = Arc::new(MemoryStorage::new());
  let store = CartStore::open(storage.clone(), CartStoreConfig::default());
  (storage, store)
}

pub fn ids_and_quantities(store: &CartStore) -> Vec<(u64, u32)> {
  store.items().iter().map(|l| (l.id(), l.quantity)).collect()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
