//! # Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► parse args, init logging                                │
//! │  lib.rs  ────► config, state, dispatch (kept there for testability)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use storefront::cli::Cli;
use storefront::output::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    storefront::init_tracing(cli.verbose);

    let output = Output::new(cli.json);
    if let Err(e) = storefront::run(cli).await {
        output.error(&e);
        std::process::exit(e.exit_code());
    }
}
