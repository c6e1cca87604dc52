//! Heading-based section splitting.
//!
//! Walks the top-level children of `<body>` in order. Every `h1`-`h6`
//! child closes the running section and opens a new one; every other
//! child appends its trimmed text plus a single space to the running
//! section. Sections whose content trims to nothing are dropped.

use scraper::{ElementRef, Html};

use crate::core::indexer::html::{body, direct_text, element_text, heading_level};
use crate::core::types::Section;

/// Output of [`split_into_sections`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitDocument {
    /// Sections in document order
    pub sections: Vec<Section>,

    /// First non-empty heading text of the page
    pub main_heading: String,
}

/// Split a rendered page into sections at heading boundaries.
///
/// Content that appears before the first heading lands in an
/// untitled section (`heading = ""`, `level = 0`). A page without
/// headings therefore yields one untitled section when it has any
/// text, and no sections at all when it is empty.
pub fn split_into_sections(html: &str) -> SplitDocument {
    let document = Html::parse_document(html);
    let mut split = SplitDocument::default();

    let Some(body) = body(&document) else {
        return split;
    };

    let mut current = Section::default();

    for child in body.children().filter_map(ElementRef::wrap) {
        match heading_level(child.value().name()) {
            Some(level) => {
                flush(&mut split.sections, current);

                let heading = heading_text(child);
                if split.main_heading.is_empty() {
                    split.main_heading = heading.clone();
                }

                current = Section {
                    heading,
                    level,
                    anchor: child.value().attr("id").unwrap_or_default().to_string(),
                    content: String::new(),
                };
            }
            None => {
                current.content.push_str(element_text(child).trim());
                current.content.push(' ');
            }
        }
    }

    flush(&mut split.sections, current);
    split
}

fn flush(sections: &mut Vec<Section>, section: Section) {
    if !section.content.trim().is_empty() {
        sections.push(section);
    }
}

/// Heading text from the element's own text nodes, falling back to
/// the full text when those are blank (`<h2><a>Title</a></h2>`).
fn heading_text(heading: ElementRef<'_>) -> String {
    let direct = direct_text(heading);
    let direct = direct.trim();
    if !direct.is_empty() {
        return direct.to_string();
    }
    element_text(heading).trim().to_string()
}
