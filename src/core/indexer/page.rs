//! Page loading.
//!
//! Reads a rendered HTML file from an output tree and recovers the
//! information a documentation build would have attached to it:
//! the page title, keywords, description and the `noindex` flag.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::{Component, Path};

use crate::core::error::{DocIndexError, Result};
use crate::core::types::DocumentMeta;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("title selector"));

static META: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name][content]").expect("meta selector"));

static MAIN: Lazy<Selector> = Lazy::new(|| Selector::parse("main").expect("main selector"));

static ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article").expect("article selector"));

static ROLE_MAIN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[role=main]").expect("role selector"));

/// Rendered page content and metadata, as produced by a docs build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageInfo {
    pub html: String,
    pub title: String,
    pub meta: DocumentMeta,
}

/// A page located in an output tree
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Path relative to the output root, `/`-separated
    pub path: String,
    pub lang: String,
    pub info: PageInfo,
}

/// Load one rendered page below `root`.
///
/// Fails with `InvalidDocument` when the file is not below `root`
/// or is not valid UTF-8.
pub fn load_page(root: &Path, file: &Path, default_lang: &str) -> Result<Page> {
    let relative = file.strip_prefix(root).map_err(|_| {
        DocIndexError::InvalidDocument(format!("{file:?} is outside of {root:?}"))
    })?;
    let path = relative_path(relative)?;

    let raw = fs::read_to_string(file).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            DocIndexError::InvalidDocument(format!("Skipping non-UTF-8 page: {file:?}"))
        } else {
            DocIndexError::IoError(e)
        }
    })?;

    let lang = page_lang(&path, default_lang);
    Ok(Page {
        path,
        lang,
        info: parse_page(&raw),
    })
}

/// Extract content HTML, title and metadata from a full page.
pub fn parse_page(raw: &str) -> PageInfo {
    let document = Html::parse_document(raw);

    let title = document
        .select(&TITLE)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mut meta = DocumentMeta::default();
    for element in document.select(&META) {
        let (Some(name), Some(content)) = (element.attr("name"), element.attr("content")) else {
            continue;
        };
        match name.to_ascii_lowercase().as_str() {
            "keywords" => {
                meta.keywords = content
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "description" => meta.description = Some(content.trim().to_string()),
            "robots" => {
                meta.no_index = content
                    .split(',')
                    .any(|d| d.trim().eq_ignore_ascii_case("noindex"));
            }
            _ => {}
        }
    }

    let html = content_element(&document)
        .map(|content| content.inner_html())
        .unwrap_or_else(|| raw.to_string());

    PageInfo { html, title, meta }
}

/// The element holding the page's own content: the first `main`,
/// else the first `article`, else the first `[role=main]`
fn content_element(document: &Html) -> Option<ElementRef<'_>> {
    [&*MAIN, &*ARTICLE, &*ROLE_MAIN]
        .into_iter()
        .find_map(|selector| document.select(selector).next())
}

/// Language of a page: its first path component when that is a
/// two-letter lowercase code, otherwise `default_lang`.
pub fn page_lang(path: &str, default_lang: &str) -> String {
    let mut components = path.split('/');
    match (components.next(), components.next()) {
        (Some(first), Some(_))
            if first.len() == 2 && first.bytes().all(|b| b.is_ascii_lowercase()) =>
        {
            first.to_string()
        }
        _ => default_lang.to_string(),
    }
}

fn relative_path(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                DocIndexError::InvalidDocument(format!("Non UTF-8 path: {relative:?}"))
            })?),
            _ => {
                return Err(DocIndexError::InvalidDocument(format!(
                    "Unexpected path component in {relative:?}"
                )))
            }
        }
    }
    if parts.is_empty() {
        return Err(DocIndexError::InvalidDocument("Empty page path".to_string()));
    }
    Ok(parts.join("/"))
}
