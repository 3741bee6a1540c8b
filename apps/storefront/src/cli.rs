//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the catalog and manage a persistent cart
#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use JSON output format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: platform config dir / storefront.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file path (default: STOREFRONT_DB_PATH or platform data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Keep the cart in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products, page by page
    Products(ProductsArgs),

    /// Show a single product
    Product {
        /// Product id
        id: String,
    },

    /// List categories
    Categories,

    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommand),
}

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Only products in this category (not paginated)
    #[arg(long)]
    pub category: Option<String>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },

    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },

    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Product id
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_update_negative() {
        let cli = Cli::try_parse_from(["storefront", "cart", "update", "3", "-1"]).unwrap();
        match cli.command {
            Command::Cart(CartCommand::Update { id, quantity }) => {
                assert_eq!(id, "3");
                assert_eq!(quantity, -1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_products_with_globals() {
        let cli =
            Cli::try_parse_from(["storefront", "products", "--pages", "3", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Products(args) => {
                assert_eq!(args.pages, 3);
                assert!(args.category.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
