//! Export tests for HTML format (tagup → HTML)
//!
//! These tests verify that tagup markup is correctly converted to HTML
//! by checking the resulting HTML structure.

use tagup::encode;

// ============================================================================
// BASIC ELEMENT TESTS
// ============================================================================

#[test]
fn test_plain_text_passes_through() {
    assert_eq!(encode("just plain text"), "just plain text");
}

#[test]
fn test_empty_string() {
    assert_eq!(encode(""), "");
}

#[test]
fn test_bold() {
    assert_eq!(encode("[b]Hello[/b]"), "<strong>Hello</strong>");
}

#[test]
fn test_italic() {
    assert_eq!(encode("[i]Hello[/i]"), "<em>Hello</em>");
}

#[test]
fn test_underline() {
    assert_eq!(encode("[u]Hello[/u]"), "<u>Hello</u>");
}

#[test]
fn test_mixed_nested_emphasis() {
    assert_eq!(
        encode("[u][b]bold [i]and italic[/i][/b][/u]"),
        "<u><strong>bold <em>and italic</em></strong></u>"
    );
}

#[test]
fn test_newlines_become_breaks() {
    assert_eq!(encode("line one\nline two"), "line one<br>line two");
}

#[test]
fn test_alignment_blocks() {
    assert_eq!(
        encode("[center]middle[/center]"),
        "<div style=\"text-align: center\">middle</div>"
    );
    assert_eq!(
        encode("[left]start[/left]"),
        "<div style=\"text-align: left\">start</div>"
    );
    assert_eq!(
        encode("[right]end[/right]"),
        "<div style=\"text-align: right\">end</div>"
    );
}

#[test]
fn test_link() {
    assert_eq!(
        encode("[url=https://example.com]click[/url]"),
        "<a href=\"https://example.com\">click</a>"
    );
}

#[test]
fn test_image() {
    assert_eq!(encode("[img]photo.png[/img]"), "<img src=\"photo.png\">");
}

#[test]
fn test_attachment_placeholder() {
    let html = encode("[pdf]notes.pdf[/pdf]");
    assert!(html.contains("class=\"tagup-attachment\""));
    assert!(html.contains("data-src=\"notes.pdf\""));
    assert!(html.contains(">notes.pdf<"));
}

// ============================================================================
// LIST TESTS
// ============================================================================

#[test]
fn test_unordered_list() {
    let html = encode("[list]\n[*]A\n[*]B\n[/list]");
    assert_eq!(html, "<ul><li>A</li><li>B</li></ul>");
}

#[test]
fn test_ordered_list() {
    let html = encode("[list=1]\n[*]first\n[*]second\n[/list]");
    assert_eq!(html, "<ol><li>first</li><li>second</li></ol>");
}

#[test]
fn test_list_stray_blank_lines_produce_no_empty_items() {
    let html = encode("[list]\n[*]A\n\n\n[*]B\n\n[/list]");
    assert_eq!(html, "<ul><li>A</li><li>B</li></ul>");
}

#[test]
fn test_emphasis_inside_list_items() {
    let html = encode("[list]\n[*][b]A[/b] item\n[/list]");
    assert_eq!(html, "<ul><li><strong>A</strong> item</li></ul>");
}

// ============================================================================
// DEGRADATION TESTS
// ============================================================================

#[test]
fn test_unmatched_open_tag_stays_verbatim() {
    assert_eq!(encode("say [b]loud"), "say [b]loud");
}

#[test]
fn test_unknown_tag_stays_verbatim() {
    assert_eq!(encode("[blink]hey[/blink]"), "[blink]hey[/blink]");
}

#[test]
fn test_stray_close_tag_stays_verbatim() {
    assert_eq!(encode("oops[/b]"), "oops[/b]");
}

#[test]
fn test_unmatched_inner_tag_degrades_locally() {
    assert_eq!(encode("[b][i]x[/b]"), "<strong>[i]x</strong>");
}

#[test]
fn test_literal_brackets_are_escaped_safely() {
    // Plain brackets pass through; angle brackets are entity-escaped.
    assert_eq!(encode("a [ b ] <c>"), "a [ b ] &lt;c&gt;");
}

#[test]
fn test_unclosed_list_stays_verbatim() {
    assert_eq!(encode("[list][*]A"), "[list][*]A");
}
