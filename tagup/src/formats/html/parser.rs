//! HTML parsing (HTML import → document tree)
//!
//! Parses arbitrary HTML with html5ever and maps the resulting DOM onto the
//! document tree. Import never fails: html5ever repairs malformed input, and
//! every element with no mapping simply contributes its children. Formatting
//! the tree cannot express (colors, sizes, scripts) is dropped, text content
//! is kept.

use crate::ir::nodes::{Alignment, Document, ListItem, Node as IrNode};
use crate::vocabulary;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Elements nested deeper than this lose their structure: the subtree is
/// flattened to its text content. Keeps the walk's recursion bounded on
/// adversarial input.
const MAX_NESTING_DEPTH: usize = 128;

/// Parse an HTML string into a document tree.
pub fn parse_from_html(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);

    // html5ever always builds html/head/body around a fragment.
    let Some(body) = find_body(&dom.document) else {
        return Document::default();
    };

    Document::new(decode_children(&body, 0))
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn decode_children(handle: &Handle, depth: usize) -> Vec<IrNode> {
    let mut nodes = Vec::new();
    for child in handle.children.borrow().iter() {
        decode_node(child, depth, &mut nodes);
    }
    nodes
}

fn decode_node(handle: &Handle, depth: usize, out: &mut Vec<IrNode>) {
    match handle.data {
        NodeData::Text { ref contents } => {
            let text = contents.borrow().to_string();
            if !text.is_empty() {
                out.push(IrNode::Text(text));
            }
        }
        NodeData::Element { .. } => decode_element(handle, depth, out),
        // Comments, doctypes and processing instructions carry no content.
        _ => {}
    }
}

fn decode_element(handle: &Handle, depth: usize, out: &mut Vec<IrNode>) {
    let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    else {
        return;
    };
    let tag = name.local.as_ref();
    let style = attr_value(&attrs.borrow(), "style").unwrap_or_default();

    match tag {
        "br" => {
            out.push(IrNode::LineBreak);
            return;
        }
        "img" => {
            if let Some(src) = attr_value(&attrs.borrow(), "src") {
                if !src.is_empty() {
                    out.push(IrNode::Image { src });
                }
            }
            return;
        }
        // Non-content subtrees are dropped entirely.
        "script" | "style" | "head" | "template" | "title" | "meta" | "link" => return,
        _ => {}
    }

    // Past the nesting cap, structure is dropped and text kept.
    if depth >= MAX_NESTING_DEPTH {
        let text = text_content(handle);
        if !text.is_empty() {
            out.push(IrNode::Text(text));
        }
        return;
    }

    if is_bold(tag, &style) {
        out.push(IrNode::Bold(decode_children(handle, depth + 1)));
        return;
    }
    if is_italic(tag, &style) {
        out.push(IrNode::Italic(decode_children(handle, depth + 1)));
        return;
    }
    if is_underline(tag, &style) {
        out.push(IrNode::Underline(decode_children(handle, depth + 1)));
        return;
    }

    match tag {
        "a" => {
            let children = decode_children(handle, depth + 1);
            match attr_value(&attrs.borrow(), "href") {
                Some(href) if !href.is_empty() => out.push(IrNode::Link { href, children }),
                // An anchor without a target is just its text.
                _ => out.extend(children),
            }
        }

        "ul" => out.push(decode_list(handle, false, depth)),
        "ol" => out.push(decode_list(handle, true, depth)),
        // A li outside any list contributes its content as a line.
        "li" => {
            out.extend(decode_children(handle, depth + 1));
            out.push(IrNode::LineBreak);
        }

        "div" if is_attachment(&attrs.borrow()) => {
            let src = attr_value(&attrs.borrow(), "data-src")
                .unwrap_or_else(|| text_content(handle).trim().to_string());
            if !src.is_empty() {
                out.push(IrNode::Attachment { src });
            }
        }

        "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "section"
        | "article" | "header" | "footer" | "main" | "figure" | "figcaption" | "pre"
        | "table" | "tr" | "td" | "th" => {
            let mut children = decode_children(handle, depth + 1);
            match style_property(&style, "text-align").and_then(|v| Alignment::from_css(&v)) {
                Some(direction) => out.push(IrNode::Align {
                    direction,
                    children,
                }),
                None => {
                    // Block elements end their line. Empty blocks still
                    // contribute a newline; the cleanup pass collapses runs.
                    if !ends_with_break(&children) {
                        children.push(IrNode::LineBreak);
                    }
                    out.extend(children);
                }
            }
        }

        // Neutral inline wrappers and anything unrecognized: keep the
        // content, drop the element.
        _ => out.extend(decode_children(handle, depth + 1)),
    }
}

fn decode_list(handle: &Handle, ordered: bool, depth: usize) -> IrNode {
    let mut items = Vec::new();
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Element { ref name, .. } if name.local.as_ref() == "li" => {
                items.extend(ListItem::from_nodes(decode_children(child, depth + 1)));
            }
            // Whitespace and stray nodes between items are dropped.
            _ => {}
        }
    }
    IrNode::List { ordered, items }
}

fn ends_with_break(nodes: &[IrNode]) -> bool {
    match nodes.last() {
        None => false,
        Some(IrNode::LineBreak) => true,
        Some(IrNode::Text(text)) => text.ends_with('\n'),
        Some(IrNode::List { .. }) => true,
        Some(IrNode::Align { .. }) => true,
        _ => false,
    }
}

fn attr_value(attrs: &[html5ever::Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

fn is_attachment(attrs: &[html5ever::Attribute]) -> bool {
    let has_class = attr_value(attrs, "class")
        .map(|class| {
            class
                .split_ascii_whitespace()
                .any(|c| c == vocabulary::ATTACHMENT_CLASS)
        })
        .unwrap_or(false);
    has_class || attr_value(attrs, "data-src").is_some()
}

fn is_bold(tag: &str, style: &str) -> bool {
    if vocabulary::BOLD_HTML_TAGS.contains(&tag) {
        return true;
    }
    match style_property(style, "font-weight") {
        Some(weight) => weight == "bold" || weight.parse::<u32>().is_ok_and(|w| w >= 600),
        None => false,
    }
}

fn is_italic(tag: &str, style: &str) -> bool {
    vocabulary::ITALIC_HTML_TAGS.contains(&tag)
        || style_property(style, "font-style").as_deref() == Some("italic")
}

fn is_underline(tag: &str, style: &str) -> bool {
    if vocabulary::UNDERLINE_HTML_TAGS.contains(&tag) {
        return true;
    }
    ["text-decoration", "text-decoration-line"]
        .iter()
        .any(|prop| {
            style_property(style, prop)
                .is_some_and(|value| value.split_whitespace().any(|part| part == "underline"))
        })
}

/// Look up one property in an inline style attribute. Values are lowercased.
fn style_property(style: &str, property: &str) -> Option<String> {
    for declaration in style.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(property) {
            return Some(value.trim().to_ascii_lowercase());
        }
    }
    None
}

/// Concatenated text of a subtree. Iterative so depth does not matter.
fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    let mut pending = vec![handle.clone()];
    while let Some(node) = pending.pop() {
        if let NodeData::Text { ref contents } = node.data {
            text.push_str(&contents.borrow());
        }
        for child in node.children.borrow().iter().rev() {
            pending.push(child.clone());
        }
    }
    text
}
