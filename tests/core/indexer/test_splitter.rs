// Section splitting over realistic page content

use docindex::core::indexer::split_into_sections;

#[test]
fn test_k_headings_give_k_sections() {
    let html = "<h1>A</h1><p>a</p><h2>B</h2><p>b</p><h3>C</h3><p>c</p><h2>D</h2><p>d</p>";

    let split = split_into_sections(html);

    let got: Vec<(&str, u8)> = split
        .sections
        .iter()
        .map(|s| (s.heading.as_str(), s.level))
        .collect();
    assert_eq!(got, vec![("A", 1), ("B", 2), ("C", 3), ("D", 2)]);
}

#[test]
fn test_content_before_first_heading() {
    let split = split_into_sections("<p>Preface</p><h2>Chapter</h2><p>Text</p>");

    assert_eq!(split.sections.len(), 2);
    assert_eq!(split.sections[0].heading, "");
    assert_eq!(split.sections[0].level, 0);
    assert_eq!(split.sections[0].content, "Preface ");
    assert_eq!(split.main_heading, "Chapter");
}

#[test]
fn test_main_heading_survives_later_sections() {
    let split = split_into_sections("<h2>First</h2><p>1</p><h1>Second</h1><p>2</p>");
    assert_eq!(split.main_heading, "First");
}

#[test]
fn test_multiple_blocks_accumulate() {
    let split = split_into_sections(
        "<h2>Setup</h2><p>  Install  </p><ul><li>one</li><li>two</li></ul><pre>cargo run</pre>",
    );

    assert_eq!(split.sections.len(), 1);
    assert_eq!(split.sections[0].content, "Install onetwo cargo run ");
}

#[test]
fn test_whitespace_only_blocks_are_dropped() {
    let split = split_into_sections("<h1>Only</h1><p>   </p><div>\n</div>");
    assert!(split.sections.is_empty());
    assert_eq!(split.main_heading, "Only");
}
