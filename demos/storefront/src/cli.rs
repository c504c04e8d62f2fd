// demos/storefront/src/cli.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect and edit the locally persisted storefront cart.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Print the cart's lines, unit count and total.
  Show,
  /// Add one unit of a product, given as catalogue JSON.
  Add {
    /// Product JSON, e.g. '{"id":1,"name":"Rose Oil","description":"","price":24.5,...}'
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    json: Option<String>,
    /// Path to a file containing the product JSON.
    #[arg(long)]
    file: Option<PathBuf>,
  },
  /// Remove a product's line.
  Remove { id: u64 },
  /// Set a product's quantity. Zero or less removes the line.
  Set {
    id: u64,
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
  },
  /// Empty the cart.
  Clear,
}
