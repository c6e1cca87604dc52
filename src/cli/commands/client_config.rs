//! Client-config command - print the search client configuration

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the client-config command
#[derive(Args, Debug)]
pub struct ClientConfigArgs {
    /// Language code
    #[arg(default_value = "en")]
    pub lang: String,
}

/// Execute the client-config command
pub async fn execute(
    args: ClientConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = services.create_provider(None)?;
    let client = provider.client_config(&args.lang);

    match format {
        OutputFormat::Human => {
            print_header(&format!("Search client ({})", args.lang));
            println!("  provider: {}", client.provider);
            println!("  api: {}", colors::file_path(&client.api));
            println!("  link: {}", colors::file_path(&client.link));
            println!("  appId: {}", client.app_id);
            println!("  indexName: {}", colors::lang(&client.index_name));
            println!("  searchKey: {}", client.search_key);
            println!(
                "  querySettings: {}",
                serde_json::to_string(&client.query_settings)?
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&client)?);
        }
    }

    Ok(())
}
