//! Tests for the index CLI command
//!
//! - Indexing a rendered site in both output formats
//! - Command-line overrides (workers, lang, patterns)
//! - Dry-run uploads
//! - Error cases (invalid path, file instead of directory, bad overrides)

use crate::cli::test_helpers::{create_cli_test_services, create_uploading_services, index_args};
use crate::common::{section_page, TestSite};
use docindex::cli::commands::index::execute;
use docindex::cli::OutputFormat;
use docindex::core::storage::load_records;

/// Test indexing a site (human format)
#[tokio::test]
async fn test_index_site_human() {
    let services = create_cli_test_services();
    let site = TestSite::small();

    let result = execute(index_args(site.path()), &services, OutputFormat::Human).await;

    assert!(result.is_ok(), "Index should succeed: {:?}", result.err());
    assert!(site.records_file("en").exists());
    assert!(site.records_file("ru").exists());
}

/// Test indexing a site (JSON format)
#[tokio::test]
async fn test_index_site_json() {
    let services = create_cli_test_services();
    let site = TestSite::small();

    let result = execute(index_args(site.path()), &services, OutputFormat::Json).await;

    assert!(result.is_ok(), "Index (JSON) should succeed");
    let records = load_records(&site.records_file("en")).unwrap();
    assert!(records.iter().all(|r| r.lang == "en"));
    assert!(records.iter().all(|r| !r.url.starts_with("en/draft")));
}

/// Pages outside a language directory take the `--lang` value
#[tokio::test]
async fn test_index_lang_override() {
    let services = create_cli_test_services();
    let site = TestSite::with_files(&[("guide.html", &section_page("Guide", &[]))]);

    let mut args = index_args(site.path());
    args.lang = Some("de".to_string());

    execute(args, &services, OutputFormat::Json).await.unwrap();

    assert!(site.records_file("de").exists());
    assert!(!site.records_file("en").exists());
}

/// Custom include patterns limit the pages indexed
#[tokio::test]
async fn test_index_include_patterns() {
    let services = create_cli_test_services();
    let site = TestSite::small();

    let mut args = index_args(site.path());
    args.include = vec!["ru/*.html".to_string()];
    args.workers = Some(1);

    execute(args, &services, OutputFormat::Json).await.unwrap();

    assert!(site.records_file("ru").exists());
    assert!(!site.records_file("en").exists());
}

/// The service config itself is left untouched by overrides
#[tokio::test]
async fn test_index_overrides_are_per_run() {
    let services = create_cli_test_services();
    let site = TestSite::small();

    let mut args = index_args(site.path());
    args.workers = Some(1);
    args.lang = Some("de".to_string());
    execute(args, &services, OutputFormat::Json).await.unwrap();

    assert_eq!(services.config.workers.max_workers, 2);
    assert_eq!(services.config.indexing.default_lang, "en");
}

/// Dry-run with uploads enabled succeeds without a real client
#[tokio::test]
async fn test_index_dry_run_upload() {
    let services = create_uploading_services();
    let site = TestSite::small();

    let mut args = index_args(site.path());
    args.dry_run = true;

    let result = execute(args, &services, OutputFormat::Json).await;

    assert!(result.is_ok(), "Dry-run index should succeed: {:?}", result.err());
    assert!(site.records_file("en").exists());
}

/// --no-upload writes files even when uploads are configured
#[tokio::test]
async fn test_index_no_upload() {
    let services = create_uploading_services();
    let site = TestSite::small();

    let mut args = index_args(site.path());
    args.no_upload = true;

    execute(args, &services, OutputFormat::Human).await.unwrap();

    assert!(site.records_file("ru").exists());
}

/// Test error on invalid path
#[tokio::test]
async fn test_index_invalid_path() {
    let services = create_cli_test_services();

    let result = execute(
        index_args(std::path::Path::new("/nonexistent/docs/output")),
        &services,
        OutputFormat::Human,
    )
    .await;

    assert!(result.is_err(), "Should fail for invalid path");
    let err_msg = result.unwrap_err().to_string();
    assert!(err_msg.contains("Invalid path"), "Error: {err_msg}");
}

/// Test error when the path is a file
#[tokio::test]
async fn test_index_path_is_file() {
    let services = create_cli_test_services();
    let site = TestSite::small();

    let result = execute(
        index_args(&site.path().join("en/index.html")),
        &services,
        OutputFormat::Human,
    )
    .await;

    let err_msg = result.unwrap_err().to_string();
    assert!(err_msg.contains("not a directory"), "Error: {err_msg}");
}

/// Test that invalid overrides are rejected before indexing
#[tokio::test]
async fn test_index_zero_workers_rejected() {
    let services = create_cli_test_services();
    let site = TestSite::small();

    let mut args = index_args(site.path());
    args.workers = Some(0);

    let result = execute(args, &services, OutputFormat::Human).await;

    assert!(result.is_err(), "Zero workers should be rejected");
    assert!(!site.records_file("en").exists());
}
