//! CLI adapter for docindex
//!
//! Provides the command-line interface for building, writing and
//! uploading search records. Depends on `core/`; `core/` never
//! depends on it.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     core/        |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// docindex - search records for documentation sites
///
/// Splits rendered documentation pages into size-bounded search
/// records in parallel, writes one record file per language and
/// uploads them to the search index.
#[derive(Parser, Debug)]
#[command(name = "docindex")]
#[command(version)]
#[command(about = "Parallel search record builder for documentation sites", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "DOCINDEX_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build search records for a rendered documentation tree
    Index(commands::IndexArgs),

    /// Re-upload previously written record files
    Upload(commands::UploadArgs),

    /// Print the client-side search configuration for a language
    #[command(name = "client-config")]
    ClientConfig(commands::ClientConfigArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  docindex completions bash > ~/.local/share/bash-completion/completions/docindex
    ///   zsh:   docindex completions zsh > ~/.zfunc/_docindex
    ///   fish:  docindex completions fish > ~/.config/fish/completions/docindex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format).await,
        Commands::Upload(args) => commands::upload::execute(args, &services, cli.format).await,
        Commands::ClientConfig(args) => {
            commands::client_config::execute(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
