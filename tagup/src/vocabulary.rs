//! The tag vocabulary shared by both conversion directions.
//!
//! This table is the single source of truth for what a tag is called in
//! markup and what HTML element it maps to. The tagup parser, the tagup
//! serializer, and both sides of the HTML format consult it, so extending
//! the dialect means adding one entry here (plus a tree variant) rather
//! than touching two independent code paths.

use crate::ir::nodes::Alignment;

/// Semantic role of a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    Bold,
    Italic,
    Underline,
    Align(Alignment),
    Link,
    Image,
    Attachment,
    List,
}

/// One entry of the vocabulary: markup syntax on one side, HTML
/// serialization on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    /// Name used in markup: `[name]...[/name]`.
    pub name: &'static str,
    /// HTML element the tag exports to.
    pub html_tag: &'static str,
    /// Whether the opening tag requires an `=value` parameter.
    pub takes_value: bool,
    pub role: TagRole,
}

pub const BOLD: TagSpec = TagSpec {
    name: "b",
    html_tag: "strong",
    takes_value: false,
    role: TagRole::Bold,
};

pub const ITALIC: TagSpec = TagSpec {
    name: "i",
    html_tag: "em",
    takes_value: false,
    role: TagRole::Italic,
};

pub const UNDERLINE: TagSpec = TagSpec {
    name: "u",
    html_tag: "u",
    takes_value: false,
    role: TagRole::Underline,
};

pub const ALIGN_LEFT: TagSpec = TagSpec {
    name: "left",
    html_tag: "div",
    takes_value: false,
    role: TagRole::Align(Alignment::Left),
};

pub const ALIGN_CENTER: TagSpec = TagSpec {
    name: "center",
    html_tag: "div",
    takes_value: false,
    role: TagRole::Align(Alignment::Center),
};

pub const ALIGN_RIGHT: TagSpec = TagSpec {
    name: "right",
    html_tag: "div",
    takes_value: false,
    role: TagRole::Align(Alignment::Right),
};

pub const LINK: TagSpec = TagSpec {
    name: "url",
    html_tag: "a",
    takes_value: true,
    role: TagRole::Link,
};

pub const IMAGE: TagSpec = TagSpec {
    name: "img",
    html_tag: "img",
    takes_value: false,
    role: TagRole::Image,
};

pub const ATTACHMENT: TagSpec = TagSpec {
    name: "pdf",
    html_tag: "div",
    takes_value: false,
    role: TagRole::Attachment,
};

pub const LIST: TagSpec = TagSpec {
    name: "list",
    html_tag: "ul",
    takes_value: false,
    role: TagRole::List,
};

/// All recognized tags, in dispatch order.
pub const TAGS: &[&TagSpec] = &[
    &BOLD,
    &ITALIC,
    &UNDERLINE,
    &ALIGN_LEFT,
    &ALIGN_CENTER,
    &ALIGN_RIGHT,
    &LINK,
    &IMAGE,
    &ATTACHMENT,
    &LIST,
];

/// HTML element used for ordered lists (`[list=1]`).
pub const ORDERED_LIST_HTML_TAG: &str = "ol";

/// The `=value` that switches a list block to ordered numbering.
pub const ORDERED_LIST_VALUE: &str = "1";

/// Item delimiter inside list blocks.
pub const LIST_ITEM_TOKEN: &str = "*";

/// HTML tag names accepted for each emphasis role on import.
pub const BOLD_HTML_TAGS: &[&str] = &["b", "strong"];
pub const ITALIC_HTML_TAGS: &[&str] = &["i", "em"];
pub const UNDERLINE_HTML_TAGS: &[&str] = &["u", "ins"];

/// Inline wrappers with no semantics of their own; unwrapped on import
/// unless one of the recognized inline styles is set on them.
pub const NEUTRAL_INLINE_TAGS: &[&str] = &["span", "font"];

/// Class marking the attachment placeholder block in exported HTML.
pub const ATTACHMENT_CLASS: &str = "tagup-attachment";

/// Looks up a tag by its markup name.
pub fn lookup(name: &str) -> Option<&'static TagSpec> {
    TAGS.iter().find(|spec| spec.name == name).copied()
}

/// The vocabulary entry for an alignment direction.
pub fn align_spec(direction: Alignment) -> &'static TagSpec {
    match direction {
        Alignment::Left => &ALIGN_LEFT,
        Alignment::Center => &ALIGN_CENTER,
        Alignment::Right => &ALIGN_RIGHT,
    }
}
