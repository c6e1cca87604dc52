//! docindex CLI - build search records for documentation sites
//!
//! # Examples
//!
//! ```bash
//! # Build records for a rendered site and write _search/*.json
//! docindex index ./build --no-upload
//!
//! # Preview what would be uploaded
//! docindex index ./build --dry-run
//!
//! # Re-upload record files from an earlier build
//! docindex upload ./build --dry-run
//!
//! # Show configuration
//! docindex show-config --all
//! ```

use clap::Parser;
use docindex::cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing on stderr; stdout carries command output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "docindex=info".into());
    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
