//! HTML text helpers built on `scraper`.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("body selector"));

static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector"));

/// Elements whose text never reaches the index
const SKIPPED_TAGS: &[&str] = &["script", "style", "template", "noscript", "svg"];

/// Elements that separate words when flattened to text
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// The `<body>` element of a parsed document.
///
/// html5ever synthesizes a body for fragments too.
pub fn body(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&BODY).next()
}

/// Heading level for `h1`..`h6`, `None` for anything else.
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Concatenated text of an element and all of its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of an element's own text nodes, ignoring child elements.
pub fn direct_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}

/// Text of every heading element in document order.
///
/// Child node texts of one heading are deduplicated before being
/// joined, so a heading that repeats the same span (an anchor
/// link mirroring its title, say) yields the text once. Identical
/// headings elsewhere in the page are all kept.
pub fn extract_headings(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut headings = Vec::new();

    for heading in document.select(&HEADINGS) {
        let mut pieces: Vec<String> = Vec::new();
        for child in heading.children() {
            let piece = match child.value() {
                Node::Text(text) => {
                    let text: &str = text;
                    text.to_string()
                }
                Node::Element(_) => ElementRef::wrap(child).map(element_text).unwrap_or_default(),
                _ => String::new(),
            };
            if !pieces.contains(&piece) {
                pieces.push(piece);
            }
        }

        let text = pieces.concat();
        let text = text.trim();
        if !text.is_empty() {
            headings.push(text.to_string());
        }
    }

    headings
}

/// Readable text of a whole page with whitespace collapsed.
///
/// Script and style content is dropped; block elements are
/// separated by a space so adjacent paragraphs do not run
/// together.
pub fn plain_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = body(&document).unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_text(root, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let tag = el.name();
                if SKIPPED_TAGS.contains(&tag) {
                    continue;
                }
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&tag);
                if block {
                    out.push(' ');
                }
                collect_text(child, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim_end().to_string()
}
