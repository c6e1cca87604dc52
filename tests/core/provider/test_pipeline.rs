// Full runs: walk a rendered site, build records, write files

use docindex::core::storage::load_records;

use crate::common::{create_test_services, TestSite};

#[tokio::test]
async fn test_index_small_site() {
    let site = TestSite::small();
    let services = create_test_services();
    let pipeline = services.create_pipeline().unwrap();
    let provider = services.create_provider(None).unwrap();

    let (summary, stats) = pipeline.index_directory(site.path(), &provider).await.unwrap();

    assert_eq!(stats.pages_found, 4);
    assert_eq!(stats.pages_submitted, 3);
    assert_eq!(stats.pages_skipped, 1);
    assert_eq!(stats.tasks_failed, 0);
    assert_eq!(stats.tasks_lost, 0);
    assert_eq!(summary.stats.completed, 3);
    assert_eq!(
        stats.records_by_lang.keys().collect::<Vec<_>>(),
        vec!["en", "ru"]
    );

    let en = load_records(&site.records_file("en")).unwrap();
    assert_eq!(en.len(), stats.records_by_lang["en"]);
    assert!(en.iter().all(|r| !r.content.contains("Menu")));
    assert!(en.iter().any(|r| r.url.starts_with("en/install.html")));
    assert!(!en.iter().any(|r| r.url.starts_with("en/draft.html")));
}

#[tokio::test]
async fn test_index_skips_record_output_dir() {
    let site = TestSite::small();
    let services = create_test_services();

    for _ in 0..2 {
        let pipeline = services.create_pipeline().unwrap();
        let provider = services.create_provider(None).unwrap();
        let (_, stats) = pipeline.index_directory(site.path(), &provider).await.unwrap();
        assert_eq!(stats.pages_found, 4);
    }
}
