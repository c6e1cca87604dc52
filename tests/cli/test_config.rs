//! Tests for the show-config and client-config CLI commands

use crate::cli::test_helpers::{create_cli_test_services, create_uploading_services};
use docindex::cli::commands::client_config::{self, ClientConfigArgs};
use docindex::cli::commands::config::{self, ConfigArgs, ConfigResponse};
use docindex::cli::OutputFormat;

/// Test show-config in both formats
#[tokio::test]
async fn test_show_config() {
    let services = create_cli_test_services();

    for all in [false, true] {
        let result = config::execute(ConfigArgs { all }, &services, OutputFormat::Human).await;
        assert!(result.is_ok(), "show-config should succeed");
    }

    let result = config::execute(ConfigArgs { all: false }, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "show-config (JSON) should succeed");
}

/// The JSON response never carries the API key
#[test]
fn test_config_response_redacts_api_key() {
    let mut cfg = docindex::Config::default();
    cfg.search_index.api_key = Some("secret-admin-key".to_string());

    let response = ConfigResponse {
        config_file: "/tmp/docindex.toml".to_string(),
        config: &cfg,
    };
    let json = serde_json::to_string(&response).unwrap();

    assert!(!json.contains("secret-admin-key"));
    assert!(json.contains("\"config_file\""));
    assert!(json.contains("\"max_workers\""));
}

/// Test client-config in both formats
#[tokio::test]
async fn test_client_config() {
    let services = create_uploading_services();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = ClientConfigArgs {
            lang: "ru".to_string(),
        };
        let result = client_config::execute(args, &services, format).await;
        assert!(result.is_ok(), "client-config should succeed");
    }
}
