//! Import tests for HTML format (HTML → tagup)
//!
//! These tests feed HTML strings to the decoder and verify the resulting
//! markup, in particular the degradation and cleanup rules.

use tagup::{decode, decode_with_rules, CleanupRules};

// ============================================================================
// BASIC ELEMENT TESTS
// ============================================================================

#[test]
fn test_plain_text() {
    assert_eq!(decode("just plain text"), "just plain text");
}

#[test]
fn test_empty_string() {
    assert_eq!(decode(""), "");
}

#[test]
fn test_bold_variants() {
    assert_eq!(decode("<strong>Hello</strong>"), "[b]Hello[/b]");
    assert_eq!(decode("<b>Hello</b>"), "[b]Hello[/b]");
    assert_eq!(
        decode(r#"<span style="font-weight: bold">Hello</span>"#),
        "[b]Hello[/b]"
    );
    assert_eq!(
        decode(r#"<span style="font-weight: 600">Hello</span>"#),
        "[b]Hello[/b]"
    );
}

#[test]
fn test_italic_variants() {
    assert_eq!(decode("<em>x</em>"), "[i]x[/i]");
    assert_eq!(decode("<i>x</i>"), "[i]x[/i]");
    assert_eq!(
        decode(r#"<span style="font-style: italic">x</span>"#),
        "[i]x[/i]"
    );
}

#[test]
fn test_underline_variants() {
    assert_eq!(decode("<u>x</u>"), "[u]x[/u]");
    assert_eq!(decode("<ins>x</ins>"), "[u]x[/u]");
    assert_eq!(
        decode(r#"<span style="text-decoration: underline">x</span>"#),
        "[u]x[/u]"
    );
    assert_eq!(
        decode(r#"<span style="text-decoration-line: underline">x</span>"#),
        "[u]x[/u]"
    );
}

#[test]
fn test_nested_emphasis() {
    assert_eq!(
        decode("<strong>bold <em>both</em></strong>"),
        "[b]bold [i]both[/i][/b]"
    );
}

#[test]
fn test_anchor() {
    assert_eq!(
        decode(r#"<a href="https://example.com">click</a>"#),
        "[url=https://example.com]click[/url]"
    );
}

#[test]
fn test_anchor_without_href_unwraps() {
    assert_eq!(decode("<a>click</a>"), "click");
}

#[test]
fn test_image() {
    assert_eq!(decode(r#"<img src="photo.png">"#), "[img]photo.png[/img]");
}

#[test]
fn test_attachment_placeholder() {
    assert_eq!(
        decode(r#"<div class="tagup-attachment" data-src="notes.pdf">notes.pdf</div>"#),
        "[pdf]notes.pdf[/pdf]"
    );
}

#[test]
fn test_alignment_divs() {
    assert_eq!(
        decode(r#"<div style="text-align: center">mid</div>"#),
        "[center]mid[/center]"
    );
    assert_eq!(
        decode(r#"<p style="text-align: right">end</p>"#),
        "[right]end[/right]"
    );
}

#[test]
fn test_lists() {
    assert_eq!(
        decode("<ul><li>A</li><li>B</li></ul>"),
        "[list]\n[*] A\n[*] B\n[/list]"
    );
    assert_eq!(
        decode("<ol><li>one</li></ol>"),
        "[list=1]\n[*] one\n[/list]"
    );
}

#[test]
fn test_line_breaks() {
    assert_eq!(decode("a<br>b"), "a\nb");
}

// ============================================================================
// DEGRADATION AND CLEANUP TESTS
// ============================================================================

#[test]
fn test_plain_span_unwraps_to_children() {
    assert_eq!(decode(r#"<span class="editor-junk">kept</span>"#), "kept");
    assert_eq!(decode("<font>kept</font>"), "kept");
}

#[test]
fn test_unrecognized_element_keeps_text() {
    assert_eq!(decode("<custom-widget>inner text</custom-widget>"), "inner text");
}

#[test]
fn test_empty_emphasis_pairs_are_stripped() {
    assert_eq!(decode("a<strong> </strong>b"), "a b");
    assert_eq!(decode("<em></em>"), "");
}

#[test]
fn test_nbsp_becomes_space() {
    assert_eq!(decode("a&nbsp;b"), "a b");
}

#[test]
fn test_empty_paragraph_runs_collapse() {
    // Three empty paragraphs leave at most one blank line.
    assert_eq!(
        decode("<p>a</p><p></p><p></p><p></p><p>b</p>"),
        "a\n\nb"
    );
}

#[test]
fn test_empty_list_is_stripped() {
    assert_eq!(decode("<ul></ul>"), "");
    assert_eq!(decode("<ol><li> </li></ol>"), "");
    assert_eq!(decode("<p>a</p><ul></ul><p>b</p>"), "a\nb");
}

#[test]
fn test_edges_are_trimmed() {
    assert_eq!(decode("  <p> hello </p>  "), "hello");
}

#[test]
fn test_scripts_and_styles_are_dropped() {
    assert_eq!(
        decode("<script>alert(1)</script><p>kept</p><style>p{}</style>"),
        "kept"
    );
}

#[test]
fn test_full_document_decodes_body() {
    assert_eq!(
        decode("<html><head><title>T</title></head><body><b>hi</b></body></html>"),
        "[b]hi[/b]"
    );
}

#[test]
fn test_custom_cleanup_rules() {
    let rules = CleanupRules {
        max_blank_lines: 0,
        trim_edges: true,
        convert_nbsp: true,
    };
    assert_eq!(
        decode_with_rules("<p>a</p><p></p><p></p><p>b</p>", &rules),
        "a\nb"
    );
}
