//! Tagup serialization (document tree → markup string)
//!
//! Emits the bracketed tag syntax from a document tree, then runs the
//! cleanup pass over the result. Tags whose content serializes to nothing
//! but whitespace are dropped rather than emitted as empty pairs.

use crate::ir::nodes::{Document, Node};
use crate::vocabulary::{self, TagSpec};

use super::cleanup_rules::CleanupRules;

/// Serialize a document to tagup markup with the default cleanup rules.
pub fn serialize_markup(doc: &Document) -> String {
    serialize_with_rules(doc, &CleanupRules::default())
}

/// Serialize a document to tagup markup with the given cleanup rules.
pub fn serialize_with_rules(doc: &Document, rules: &CleanupRules) -> String {
    let raw = collect(&doc.children);
    cleanup(&raw, rules)
}

fn collect(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::LineBreak => out.push('\n'),
        Node::Bold(children) => write_wrapped(out, &vocabulary::BOLD, children),
        Node::Italic(children) => write_wrapped(out, &vocabulary::ITALIC, children),
        Node::Underline(children) => write_wrapped(out, &vocabulary::UNDERLINE, children),
        Node::Align {
            direction,
            children,
        } => write_wrapped(out, vocabulary::align_spec(*direction), children),
        Node::Link { href, children } => {
            let content = collect(children);
            let content = content.trim();
            if content.is_empty() {
                return;
            }
            out.push_str(&format!(
                "[{name}={href}]{content}[/{name}]",
                name = vocabulary::LINK.name
            ));
        }
        Node::Image { src } => {
            if !src.is_empty() {
                let name = vocabulary::IMAGE.name;
                out.push_str(&format!("[{name}]{src}[/{name}]"));
            }
        }
        Node::Attachment { src } => {
            if !src.is_empty() {
                let name = vocabulary::ATTACHMENT.name;
                out.push_str(&format!("[{name}]{src}[/{name}]"));
            }
        }
        Node::List { ordered, items } => {
            let mut lines = Vec::new();
            for item in items {
                let content = collect(&item.children);
                let content = content.trim();
                if !content.is_empty() {
                    lines.push(format!("[{}] {content}\n", vocabulary::LIST_ITEM_TOKEN));
                }
            }
            // A list with no surviving items is an empty pair; drop it.
            if lines.is_empty() {
                return;
            }
            let name = vocabulary::LIST.name;
            if *ordered {
                out.push_str(&format!("[{name}={}]\n", vocabulary::ORDERED_LIST_VALUE));
            } else {
                out.push_str(&format!("[{name}]\n"));
            }
            for line in &lines {
                out.push_str(line);
            }
            out.push_str(&format!("[/{name}]\n"));
        }
    }
}

/// Emit `[name]content[/name]`, dropping the pair (but keeping the content)
/// when the content is only whitespace.
fn write_wrapped(out: &mut String, spec: &TagSpec, children: &[Node]) {
    let content = collect(children);
    if content.trim().is_empty() {
        out.push_str(&content);
        return;
    }
    out.push_str(&format!(
        "[{name}]{content}[/{name}]",
        name = spec.name
    ));
}

/// Normalization pass over generated markup.
fn cleanup(markup: &str, rules: &CleanupRules) -> String {
    let mut out = if rules.convert_nbsp {
        markup.replace('\u{a0}', " ")
    } else {
        markup.to_string()
    };

    // Collapse runs of blank lines that exceed the limit.
    let over = "\n".repeat(rules.max_blank_lines + 2);
    let capped = "\n".repeat(rules.max_blank_lines + 1);
    while out.contains(&over) {
        out = out.replace(&over, &capped);
    }

    if rules.trim_edges {
        out.trim().to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Alignment, ListItem};

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(serialize_markup(&Document::default()), "");
    }

    #[test]
    fn test_bold_wrap() {
        let doc = Document::new(vec![Node::Bold(vec![text("Hello")])]);
        assert_eq!(serialize_markup(&doc), "[b]Hello[/b]");
    }

    #[test]
    fn test_nested_emphasis() {
        let doc = Document::new(vec![Node::Bold(vec![
            text("bold "),
            Node::Italic(vec![text("both")]),
        ])]);
        assert_eq!(serialize_markup(&doc), "[b]bold [i]both[/i][/b]");
    }

    #[test]
    fn test_empty_pair_dropped() {
        let doc = Document::new(vec![
            text("a"),
            Node::Bold(vec![text("  ")]),
            text("b"),
        ]);
        assert_eq!(serialize_markup(&doc), "a  b");
    }

    #[test]
    fn test_alignment() {
        let doc = Document::new(vec![Node::Align {
            direction: Alignment::Right,
            children: vec![text("end")],
        }]);
        assert_eq!(serialize_markup(&doc), "[right]end[/right]");
    }

    #[test]
    fn test_link() {
        let doc = Document::new(vec![Node::Link {
            href: "https://example.com".to_string(),
            children: vec![text(" click ")],
        }]);
        assert_eq!(serialize_markup(&doc), "[url=https://example.com]click[/url]");
    }

    #[test]
    fn test_link_with_empty_label_dropped() {
        let doc = Document::new(vec![Node::Link {
            href: "https://example.com".to_string(),
            children: vec![],
        }]);
        assert_eq!(serialize_markup(&doc), "");
    }

    #[test]
    fn test_image_and_attachment() {
        let doc = Document::new(vec![
            Node::Image {
                src: "photo.png".to_string(),
            },
            Node::LineBreak,
            Node::Attachment {
                src: "notes.pdf".to_string(),
            },
        ]);
        assert_eq!(serialize_markup(&doc), "[img]photo.png[/img]\n[pdf]notes.pdf[/pdf]");
    }

    #[test]
    fn test_unordered_list_layout() {
        let doc = Document::new(vec![Node::List {
            ordered: false,
            items: vec![
                ListItem::from_nodes(vec![text("A")]).unwrap(),
                ListItem::from_nodes(vec![text("B")]).unwrap(),
            ],
        }]);
        assert_eq!(serialize_markup(&doc), "[list]\n[*] A\n[*] B\n[/list]");
    }

    #[test]
    fn test_ordered_list_layout() {
        let doc = Document::new(vec![Node::List {
            ordered: true,
            items: vec![ListItem::from_nodes(vec![text("first")]).unwrap()],
        }]);
        assert_eq!(serialize_markup(&doc), "[list=1]\n[*] first\n[/list]");
    }

    #[test]
    fn test_list_with_no_surviving_items_dropped() {
        let doc = Document::new(vec![
            text("a\n"),
            Node::List {
                ordered: false,
                items: vec![],
            },
            text("b"),
        ]);
        assert_eq!(serialize_markup(&doc), "a\nb");
    }

    #[test]
    fn test_nbsp_converted() {
        let doc = Document::new(vec![text("a\u{a0}b")]);
        assert_eq!(serialize_markup(&doc), "a b");
    }

    #[test]
    fn test_blank_lines_collapsed() {
        let doc = Document::new(vec![text("a\n\n\n\n\nb")]);
        assert_eq!(serialize_markup(&doc), "a\n\nb");
    }

    #[test]
    fn test_edges_trimmed() {
        let doc = Document::new(vec![text("  \n hi \n ")]);
        assert_eq!(serialize_markup(&doc), "hi");
    }

    #[test]
    fn test_custom_rules() {
        let rules = CleanupRules {
            max_blank_lines: 2,
            trim_edges: false,
            convert_nbsp: false,
        };
        let doc = Document::new(vec![text(" a\u{a0}\n\n\n\nb ")]);
        assert_eq!(serialize_with_rules(&doc, &rules), " a\u{a0}\n\n\nb ");
    }
}
