// demos/storefront/src/main.rs

mod cli;
mod config;
mod errors;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};

use amaya_cart::{CartChange, CartStoreConfig, FileStorage, Product, SharedCart};
use clap::Parser;
use std::sync::Arc;
use tracing::Level;

fn main() -> anyhow::Result<()> {
  // RUST_LOG overrides the default level.
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let app_config = AppConfig::from_env()?;

  let storage = Arc::new(FileStorage::new(&app_config.data_dir));
  let cart = SharedCart::open(storage, CartStoreConfig::with_storage_key(app_config.cart_key.clone()));
  cart.subscribe(|change, items| {
    tracing::info!(?change, lines = items.len(), "Cart updated.");
  });

  run(&cart, cli.command)?;
  print_cart(&cart);
  Ok(())
}

fn run(cart: &SharedCart, command: Command) -> AppResult<()> {
  let change = match command {
    Command::Show => return Ok(()),
    Command::Add { json, file } => {
      let raw = match (json, file) {
        (Some(json), _) => json,
        (None, Some(path)) => std::fs::read_to_string(&path)
          .map_err(|e| AppError::InvalidProduct(format!("reading {}: {}", path.display(), e)))?,
        (None, None) => return Err(AppError::InvalidProduct("no product given".to_string())),
      };
      let product: Product =
        serde_json::from_str(&raw).map_err(|e| AppError::InvalidProduct(e.to_string()))?;
      cart.add_item(&product)?
    }
    Command::Remove { id } => cart.remove_item(id)?,
    Command::Set { id, quantity } => cart.update_quantity(id, quantity)?,
    Command::Clear => cart.clear()?,
  };
  if let CartChange::Unchanged = change {
    tracing::warn!("Product not in cart; nothing changed.");
  }
  Ok(())
}

fn print_cart(cart: &SharedCart) {
  let items = cart.snapshot();
  if items.is_empty() {
    println!("Your cart is empty.");
    return;
  }
  for line in &items {
    println!(
      "{:>4}  {:<32} {:>3} x {:>8.2} = {:>9.2}",
      line.id(),
      line.product.name,
      line.quantity,
      line.price(),
      line.line_total()
    );
  }
  println!("{} item(s), total {:.2}", cart.item_count(), cart.total());
}
