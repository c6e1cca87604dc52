// UTF-8 safety: chunk families over multi-byte content
//
// Chunk boundaries are counted in characters, so no slice may ever
// split a multi-byte sequence.

use docindex::core::indexer::builder::split_and_push_large_record;
use docindex::core::indexer::{split_into_sections, Chunker, RecordBuilder};
use docindex::core::types::Document;

use crate::common::record;

#[test]
fn test_cyrillic_chunks_reconstruct() {
    let chunker = Chunker::new(3);
    let mut original = record("ru", "ru");
    original.content = "Привет, мир".to_string();

    let mut out = Vec::new();
    split_and_push_large_record(original.clone(), &mut out, &chunker);

    assert_eq!(out.len(), 4);
    assert_eq!(out[0].content, "При");
    assert_eq!(out[3].content, "ир");
    let rebuilt: String = out.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(rebuilt, original.content);
}

#[test]
fn test_emoji_at_chunk_boundary() {
    let chunker = Chunker::new(2);
    let mut original = record("emoji", "en");
    original.content = "a🚀b🎉c🦀".to_string();

    let mut out = Vec::new();
    split_and_push_large_record(original, &mut out, &chunker);

    let contents: Vec<&str> = out.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["a🚀", "b🎉", "c🦀"]);
}

#[test]
fn test_cjk_page_is_split_without_panic() {
    let body = "文字".repeat(3000);
    let document = Document::new("zh/page.md", "zh", format!("<h1>标题</h1><p>{body}</p>"));

    let records = RecordBuilder::default()
        .build(&document, &split_into_sections(&document.html))
        .unwrap();

    // 6000 chars of three-byte text exceed the byte ceiling
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].content.chars().count(), 4000);
    assert_eq!(records[1].content.chars().count(), 2000);
    assert_eq!(records[0].section.as_deref(), Some("标题"));
}

#[test]
fn test_plain_text_limit_counts_characters() {
    let body = "ё".repeat(6000);
    let document = Document::new("ru/page.md", "ru", format!("<div>{body}</div>"));

    // A div without headings still forms one untitled section
    let records = RecordBuilder::default()
        .build(&document, &split_into_sections(&document.html))
        .unwrap();
    assert_eq!(records[0].object_id, "ru/page-0-chunk-1");

    let empty_split = Default::default();
    let whole = RecordBuilder::default().build(&document, &empty_split).unwrap();
    let rebuilt: String = whole.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(rebuilt.chars().count(), 5000);
}
