// Search provider: add, release, add_objects, client_config

use docindex::core::config::Config;
use docindex::core::error::DocIndexError;
use docindex::core::indexer::PageInfo;
use docindex::core::provider::SearchProvider;
use docindex::core::storage::RecordStore;
use docindex::core::types::DocumentMeta;
use docindex::core::upload::{DryRunUploader, SearchIndexUploader, UploadMethod};
use std::sync::Arc;
use tempfile::TempDir;

use crate::common::{offline_config, record};

fn page(html: &str) -> PageInfo {
    PageInfo {
        html: html.to_string(),
        title: String::new(),
        meta: DocumentMeta::default(),
    }
}

fn online_config() -> Config {
    let mut config = offline_config();
    config.search_index.upload_during_build = true;
    config.search_index.app_id = "APP".to_string();
    config.search_index.index_name = Some("product-{lang}".to_string());
    config
}

fn dry_run_provider(config: Config) -> (SearchProvider, Arc<DryRunUploader>) {
    let uploader = Arc::new(DryRunUploader::new());
    let dyn_uploader: Arc<dyn SearchIndexUploader> = uploader.clone();
    let provider = SearchProvider::new(config, Some(dyn_uploader)).unwrap();
    (provider, uploader)
}

#[tokio::test]
async fn test_new_rejects_invalid_config() {
    let mut config = offline_config();
    config.indexing.chunk_size = 0;

    let err = SearchProvider::new(config, None).err().unwrap();

    assert!(matches!(err, DocIndexError::ConfigError(_)));
}

#[tokio::test]
async fn test_add_skips_empty_and_no_index_pages() {
    let provider = SearchProvider::new(offline_config(), None).unwrap();

    assert!(!provider.add("empty.md", "en", page("  \n")).unwrap());

    let mut hidden = page("<h1>Hidden</h1><p>x</p>");
    hidden.meta.no_index = true;
    assert!(!provider.add("hidden.md", "en", hidden).unwrap());

    assert!(provider
        .add("shown.md", "en", page("<h1>Shown</h1><p>x</p>"))
        .unwrap());

    let output = TempDir::new().unwrap();
    let summary = provider.release(output.path()).await.unwrap();

    assert_eq!(summary.stats.submitted, 1);
    assert_eq!(summary.results.total_records(), 1);
}

#[tokio::test]
async fn test_release_writes_files_without_uploading() {
    let provider = SearchProvider::new(offline_config(), None).unwrap();
    provider
        .add("a.md", "en", page("<h1>A</h1><p>a</p>"))
        .unwrap();
    provider
        .add("b.md", "ru", page("<h1>B</h1><p>b</p>"))
        .unwrap();

    let output = TempDir::new().unwrap();
    let summary = provider.release(output.path()).await.unwrap();

    assert_eq!(summary.files.len(), 2);
    assert!(summary.uploaded.is_empty());
    assert!(output.path().join("_search/en-algolia.json").exists());
    assert!(output.path().join("_search/ru-algolia.json").exists());
}

#[tokio::test]
async fn test_release_uploads_with_save_objects() {
    let (provider, uploader) = dry_run_provider(online_config());
    provider
        .add("a.md", "ru", page("<h1>A</h1><p>a</p>"))
        .unwrap();

    let output = TempDir::new().unwrap();
    let summary = provider.release(output.path()).await.unwrap();

    assert_eq!(summary.uploaded, vec!["ru"]);
    let requests = uploader.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].index_name, "product-ru");
    assert_eq!(requests[0].method, UploadMethod::SaveObjects);
    assert_eq!(requests[0].settings.index_languages, vec!["ru"]);
    assert_eq!(requests[0].settings.attribute_for_distinct, "url");
    assert_eq!(requests[0].records.len(), 1);
}

#[tokio::test]
async fn test_add_after_release_fails() {
    let provider = SearchProvider::new(offline_config(), None).unwrap();
    let output = TempDir::new().unwrap();
    provider.release(output.path()).await.unwrap();

    let err = provider
        .add("late.md", "en", page("<p>late</p>"))
        .unwrap_err();
    assert!(matches!(err, DocIndexError::PoolTerminated));
}

#[tokio::test]
async fn test_add_objects_replaces_all() {
    let search_dir = TempDir::new().unwrap();
    let store = RecordStore::new(search_dir.path());
    store.write("en", &[record("a", "en"), record("b", "en")]).unwrap();
    store.write("be", &[record("c", "be")]).unwrap();
    std::fs::write(search_dir.path().join("notes.json"), "[]").unwrap();

    let (provider, uploader) = dry_run_provider(online_config());
    let uploaded = provider.add_objects(search_dir.path()).await.unwrap();

    assert_eq!(uploaded, vec!["be", "en"]);
    let requests = uploader.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.method == UploadMethod::ReplaceAllObjects));
    assert_eq!(requests[0].settings.index_languages, vec!["be", "ru"]);
    assert_eq!(requests[1].records.len(), 2);
}

#[tokio::test]
async fn test_add_objects_disabled_uploads() {
    let search_dir = TempDir::new().unwrap();
    RecordStore::new(search_dir.path())
        .write("en", &[record("a", "en")])
        .unwrap();

    let (provider, uploader) = dry_run_provider(offline_config());
    let uploaded = provider.add_objects(search_dir.path()).await.unwrap();

    assert!(uploaded.is_empty());
    assert!(uploader.requests().is_empty());
}

#[tokio::test]
async fn test_add_objects_without_client_fails() {
    let search_dir = TempDir::new().unwrap();
    let provider = SearchProvider::new(online_config(), None).unwrap();

    let err = provider.add_objects(search_dir.path()).await.unwrap_err();

    assert!(matches!(err, DocIndexError::UploadFailed(_)));
}

#[tokio::test]
async fn test_settings_and_clear_with_dry_run() {
    let (provider, _uploader) = dry_run_provider(online_config());
    let langs = vec!["en".to_string(), "ru".to_string()];

    provider
        .set_settings(&langs, &serde_json::Map::new())
        .await
        .unwrap();
    provider.clear_index(&langs).await.unwrap();
}

#[tokio::test]
async fn test_client_config() {
    let mut config = online_config();
    config
        .search_index
        .query_settings
        .insert("hitsPerPage".to_string(), serde_json::json!(10));
    let provider = SearchProvider::new(config, None).unwrap();

    let client = provider.client_config("ru");
    let value = serde_json::to_value(&client).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "provider": "algolia",
            "api": "_search/api.js",
            "link": "_search/ru/index.html",
            "appId": "APP",
            "indexName": "product-ru",
            "searchKey": "search-api-key",
            "querySettings": {"hitsPerPage": 10},
        })
    );
}
