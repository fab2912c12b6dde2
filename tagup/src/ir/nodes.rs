//! Core data structures for the document tree.

use serde::Serialize;

/// A parsed rich-text document: an ordered sequence of nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A single node in the document tree.
///
/// Inline emphasis and alignment carry children, so nesting of mixed tag
/// types (italic inside bold inside underline) is represented exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Text(String),
    LineBreak,
    Bold(Vec<Node>),
    Italic(Vec<Node>),
    Underline(Vec<Node>),
    Align {
        direction: Alignment,
        children: Vec<Node>,
    },
    Link {
        href: String,
        children: Vec<Node>,
    },
    Image {
        src: String,
    },
    Attachment {
        src: String,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
}

/// One item of a list block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

impl ListItem {
    /// Builds an item from raw content nodes: edge whitespace is trimmed
    /// and items that end up with no content at all are rejected, so stray
    /// blank lines between `[*]` delimiters never become empty items.
    pub fn from_nodes(mut nodes: Vec<Node>) -> Option<ListItem> {
        if let Some(Node::Text(first)) = nodes.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(Node::Text(last)) = nodes.last_mut() {
            *last = last.trim_end().to_string();
        }
        nodes.retain(|node| !matches!(node, Node::Text(text) if text.is_empty()));
        if nodes.is_empty() {
            None
        } else {
            Some(ListItem { children: nodes })
        }
    }
}

/// Block alignment direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// The value used in a `text-align` style declaration.
    pub fn css_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    pub fn from_css(value: &str) -> Option<Alignment> {
        match value {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_item_trims_edge_whitespace() {
        let item = ListItem::from_nodes(vec![Node::Text("  hello  ".to_string())]).unwrap();
        assert_eq!(item.children, vec![Node::Text("hello".to_string())]);
    }

    #[test]
    fn list_item_rejects_blank_content() {
        assert!(ListItem::from_nodes(vec![Node::Text("\n  \n".to_string())]).is_none());
        assert!(ListItem::from_nodes(vec![]).is_none());
    }

    #[test]
    fn list_item_keeps_inner_nodes() {
        let item = ListItem::from_nodes(vec![
            Node::Text("\n".to_string()),
            Node::Bold(vec![Node::Text("x".to_string())]),
            Node::Text(" \n".to_string()),
        ])
        .unwrap();
        assert_eq!(item.children.len(), 1);
    }

    #[test]
    fn alignment_css_round_trip() {
        for direction in [Alignment::Left, Alignment::Center, Alignment::Right] {
            assert_eq!(Alignment::from_css(direction.css_value()), Some(direction));
        }
        assert_eq!(Alignment::from_css("justify"), None);
    }
}
