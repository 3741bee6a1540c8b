//! # Storefront CLI Library
//!
//! Wiring for the `storefront` binary: logging, configuration, state
//! construction and command dispatch.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument types
//! ├── output.rs       ◄─── Text / JSON rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── cart.rs     ◄─── CartStore (persistent cart container)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Listing, detail, categories
//! │   └── cart.rs     ◄─── Cart manipulation
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{CartCommand, Cli, Command};
use error::{ApiError, ErrorCode};
use output::Output;
use state::CartStore;
use storefront_catalog::{CatalogConfig, CatalogLoader, HttpCatalogClient};
use storefront_store::{CartPersistence, Database, MemoryCartPersistence, SqliteCartPersistence, StoreConfig};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load catalog config (defaults → storefront.toml → STOREFRONT_*)    │
/// │  2. Build HTTP client + CatalogLoader                                  │
/// │  3. Open local store (only for cart commands)                          │
/// │     • --ephemeral: in-memory persistence                               │
/// │     • else SQLite at --db / STOREFRONT_DB_PATH / platform data dir     │
/// │  4. Restore CartStore from the saved snapshot                          │
/// │  5. Dispatch the command and render its result                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let output = Output::new(cli.json);

    let config = CatalogConfig::load(cli.config.clone())?;
    info!(base_url = %config.api.base_url, "Catalog configured");

    let client = HttpCatalogClient::new(&config)?;
    let catalog = CatalogLoader::new(Arc::new(client));

    match cli.command {
        Command::Products(args) => {
            let response = commands::product::list_products(&catalog, args.category, args.pages).await?;
            commands::product::render_list(&output, &response);
        }
        Command::Product { id } => {
            let id = commands::parse_product_id(&id)?;
            let product = commands::product::get_product(&catalog, id).await?;
            commands::product::render_product(&output, &product);
        }
        Command::Categories => {
            let categories = commands::product::list_categories(&catalog).await?;
            commands::product::render_categories(&output, &categories);
        }
        Command::Cart(action) => {
            let (persistence, db) = open_persistence(cli.ephemeral, cli.db).await?;
            let cart = CartStore::restore(persistence).await;
            let result = run_cart(action, &catalog, &cart, &output).await;

            // Flush the WAL before exit
            if let Some(db) = db {
                db.close().await;
            }
            result?;
        }
    }

    Ok(())
}

async fn run_cart(
    action: CartCommand,
    catalog: &CatalogLoader,
    cart: &CartStore,
    output: &Output,
) -> Result<(), ApiError> {
    use commands::cart;

    let response = match action {
        CartCommand::Show => cart::get_cart(cart),
        CartCommand::Add { id } => {
            let id = commands::parse_product_id(&id)?;
            let response = cart::add_to_cart(catalog, cart, id).await?;
            output.success(&format!("Added product {}", id));
            response
        }
        CartCommand::Remove { id } => {
            let id = commands::parse_product_id(&id)?;
            cart::remove_from_cart(cart, id).await
        }
        CartCommand::Update { id, quantity } => {
            let id = commands::parse_product_id(&id)?;
            cart::update_cart_item(cart, id, quantity).await
        }
        CartCommand::Clear => {
            let response = cart::clear_cart(cart).await;
            output.success("Cart cleared");
            response
        }
    };

    cart::render(output, &response);
    Ok(())
}

/// Picks the cart's persistence. The database handle, when there is one,
/// is returned so the caller can close it.
async fn open_persistence(
    ephemeral: bool,
    db_path: Option<PathBuf>,
) -> Result<(Arc<dyn CartPersistence>, Option<Database>), ApiError> {
    if ephemeral {
        info!("Using in-memory cart persistence");
        let persistence: Arc<dyn CartPersistence> = Arc::new(MemoryCartPersistence::new());
        return Ok((persistence, None));
    }

    let path = match db_path {
        Some(path) => path,
        None => database_path()?,
    };
    info!(?path, "Database path determined");

    let db = Database::new(StoreConfig::new(path)).await?;
    let persistence: Arc<dyn CartPersistence> = Arc::new(SqliteCartPersistence::new(db.kv()));
    Ok((persistence, Some(db)))
}

/// Initializes the tracing subscriber. Logs go to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Trace for storefront crates only
/// - Default: `info,storefront=debug,sqlx=warn` with `--verbose`, else `warn`
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,storefront=debug,sqlx=warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// Set `STOREFRONT_DB_PATH` to use a custom path.
pub fn database_path() -> Result<PathBuf, ApiError> {
    if let Ok(path) = std::env::var("STOREFRONT_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront").ok_or_else(|| {
        ApiError::new(
            ErrorCode::ConfigError,
            "Could not determine app data directory",
        )
    })?;

    Ok(proj_dirs.data_dir().join("storefront.db"))
}
