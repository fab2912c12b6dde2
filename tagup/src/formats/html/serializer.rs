//! HTML serialization (document tree → HTML export)
//!
//! Pipeline: document tree → RcDom → HTML string. The html5ever serializer
//! handles entity escaping and attribute quoting, so generated markup never
//! needs manual escaping.

use crate::error::ConvertError;
use crate::ir::nodes::{Document, Node as IrNode};
use crate::vocabulary;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Serialize a document to an HTML fragment.
pub fn serialize_to_html(doc: &Document) -> Result<String, ConvertError> {
    let dom = build_html_dom(doc);
    serialize_dom(&dom)
}

/// Wrap an HTML fragment in a minimal standalone page.
pub fn wrap_in_document(body_html: &str, title: &str) -> String {
    let escaped_title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{escaped_title}</title>
  <style>
{PAGE_CSS}
  </style>
</head>
<body>
{body_html}
</body>
</html>"#
    )
}

/// Stylesheet for the standalone page wrapper. Mostly a placeholder look
/// for the attachment block, which has no visual form of its own.
const PAGE_CSS: &str = r#"    body { max-width: 46em; margin: 2em auto; font-family: sans-serif; }
    img { max-width: 100%; }
    .tagup-attachment { border: 1px dashed #999; padding: 0.5em; color: #555; }"#;

/// Build an HTML DOM tree from the document tree
fn build_html_dom(doc: &Document) -> RcDom {
    let dom = RcDom::default();

    // Container holding the fragment; only its children are serialized.
    let container = create_element("div", vec![]);
    for node in &doc.children {
        append_node(&container, node);
    }

    dom.document.children.borrow_mut().push(container);
    dom
}

fn append_node(parent: &Handle, node: &IrNode) {
    match node {
        IrNode::Text(text) => append_text_with_breaks(parent, text),

        IrNode::LineBreak => {
            let br = create_element("br", vec![]);
            parent.children.borrow_mut().push(br);
        }

        IrNode::Bold(children) => append_wrapped(parent, vocabulary::BOLD.html_tag, children),
        IrNode::Italic(children) => append_wrapped(parent, vocabulary::ITALIC.html_tag, children),
        IrNode::Underline(children) => {
            append_wrapped(parent, vocabulary::UNDERLINE.html_tag, children)
        }

        IrNode::Align {
            direction,
            children,
        } => {
            let style = format!("text-align: {}", direction.css_value());
            let div = create_element(
                vocabulary::align_spec(*direction).html_tag,
                vec![("style", &style)],
            );
            parent.children.borrow_mut().push(div.clone());
            for child in children {
                append_node(&div, child);
            }
        }

        IrNode::Link { href, children } => {
            let anchor = create_element(vocabulary::LINK.html_tag, vec![("href", href)]);
            parent.children.borrow_mut().push(anchor.clone());
            for child in children {
                append_node(&anchor, child);
            }
        }

        IrNode::Image { src } => {
            let img = create_element(vocabulary::IMAGE.html_tag, vec![("src", src)]);
            parent.children.borrow_mut().push(img);
        }

        IrNode::Attachment { src } => {
            let div = create_element(
                vocabulary::ATTACHMENT.html_tag,
                vec![
                    ("class", vocabulary::ATTACHMENT_CLASS),
                    ("data-src", src),
                ],
            );
            let label = create_text(src);
            div.children.borrow_mut().push(label);
            parent.children.borrow_mut().push(div);
        }

        IrNode::List { ordered, items } => {
            let tag = if *ordered {
                vocabulary::ORDERED_LIST_HTML_TAG
            } else {
                vocabulary::LIST.html_tag
            };
            let list = create_element(tag, vec![]);
            parent.children.borrow_mut().push(list.clone());
            for item in items {
                let li = create_element("li", vec![]);
                list.children.borrow_mut().push(li.clone());
                for child in &item.children {
                    append_node(&li, child);
                }
            }
        }
    }
}

/// Append text, turning embedded newlines into `<br>` elements.
fn append_text_with_breaks(parent: &Handle, text: &str) {
    let mut first = true;
    for segment in text.split('\n') {
        if !first {
            let br = create_element("br", vec![]);
            parent.children.borrow_mut().push(br);
        }
        first = false;
        if !segment.is_empty() {
            let text_node = create_text(segment);
            parent.children.borrow_mut().push(text_node);
        }
    }
}

fn append_wrapped(parent: &Handle, tag: &str, children: &[IrNode]) {
    let element = create_element(tag, vec![]);
    parent.children.borrow_mut().push(element.clone());
    for child in children {
        append_node(&element, child);
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the container's content)
fn serialize_dom(dom: &RcDom) -> Result<String, ConvertError> {
    let mut output = Vec::new();

    let container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| ConvertError::SerializationError("Empty document".to_string()))?
        .clone();

    // TraversalScope::IncludeNode serializes each element AND its children.
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            ConvertError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| ConvertError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Alignment, ListItem};

    fn text(s: &str) -> IrNode {
        IrNode::Text(s.to_string())
    }

    #[test]
    fn test_plain_text() {
        let doc = Document::new(vec![text("hello")]);
        assert_eq!(serialize_to_html(&doc).unwrap(), "hello");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(serialize_to_html(&Document::default()).unwrap(), "");
    }

    #[test]
    fn test_emphasis_tags() {
        let doc = Document::new(vec![
            IrNode::Bold(vec![text("b")]),
            IrNode::Italic(vec![text("i")]),
            IrNode::Underline(vec![text("u")]),
        ]);
        assert_eq!(
            serialize_to_html(&doc).unwrap(),
            "<strong>b</strong><em>i</em><u>u</u>"
        );
    }

    #[test]
    fn test_newlines_become_br() {
        let doc = Document::new(vec![text("a\nb\n\nc")]);
        assert_eq!(serialize_to_html(&doc).unwrap(), "a<br>b<br><br>c");
    }

    #[test]
    fn test_alignment_style() {
        let doc = Document::new(vec![IrNode::Align {
            direction: Alignment::Center,
            children: vec![text("mid")],
        }]);
        assert_eq!(
            serialize_to_html(&doc).unwrap(),
            "<div style=\"text-align: center\">mid</div>"
        );
    }

    #[test]
    fn test_link() {
        let doc = Document::new(vec![IrNode::Link {
            href: "https://example.com".to_string(),
            children: vec![text("go")],
        }]);
        assert_eq!(
            serialize_to_html(&doc).unwrap(),
            "<a href=\"https://example.com\">go</a>"
        );
    }

    #[test]
    fn test_image() {
        let doc = Document::new(vec![IrNode::Image {
            src: "photo.png".to_string(),
        }]);
        assert_eq!(serialize_to_html(&doc).unwrap(), "<img src=\"photo.png\">");
    }

    #[test]
    fn test_attachment_placeholder() {
        let doc = Document::new(vec![IrNode::Attachment {
            src: "notes.pdf".to_string(),
        }]);
        let html = serialize_to_html(&doc).unwrap();
        assert!(html.contains("class=\"tagup-attachment\""));
        assert!(html.contains("data-src=\"notes.pdf\""));
        assert!(html.contains(">notes.pdf<"));
    }

    #[test]
    fn test_lists() {
        let doc = Document::new(vec![IrNode::List {
            ordered: false,
            items: vec![
                ListItem::from_nodes(vec![text("A")]).unwrap(),
                ListItem::from_nodes(vec![text("B")]).unwrap(),
            ],
        }]);
        assert_eq!(
            serialize_to_html(&doc).unwrap(),
            "<ul><li>A</li><li>B</li></ul>"
        );

        let doc = Document::new(vec![IrNode::List {
            ordered: true,
            items: vec![ListItem::from_nodes(vec![text("one")]).unwrap()],
        }]);
        assert_eq!(serialize_to_html(&doc).unwrap(), "<ol><li>one</li></ol>");
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = Document::new(vec![text("a < b & c")]);
        assert_eq!(serialize_to_html(&doc).unwrap(), "a &lt; b &amp; c");
    }

    #[test]
    fn test_wrap_in_document() {
        let page = wrap_in_document("<p>hi</p>", "My <Lesson>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>My &lt;Lesson&gt;</title>"));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.contains(".tagup-attachment"));
    }
}
