//! Bidirectional conversion between tagup markup and HTML
//!
//!     Tagup is the bracketed tag dialect used to store rich-text content
//!     (descriptions, messages) as plain strings: `[b]bold[/b]`,
//!     `[url=https://...]link[/url]`, `[list]` blocks with `[*]` items, and
//!     so on. Displaying that content requires HTML; editing surfaces hand
//!     back HTML that must be turned into markup again before it is saved.
//!     This crate owns both directions of that translation and nothing else:
//!     it never touches storage, rendering, or the editing surface.
//!
//! Architecture
//!
//!     Both directions meet in the middle at a small document tree
//!     (./ir/nodes.rs): tagged-variant nodes for text, emphasis, alignment,
//!     links, images, attachments, and lists. The tagup parser is a
//!     single-pass tokenizer over an explicit open-tag stack that builds
//!     this tree directly, which is what makes mixed nesting of inline tags
//!     well-defined: there is no pass ordering to get wrong, the tree simply
//!     nests. Both walks cap their nesting depth so adversarial input cannot
//!     exhaust the call stack.
//!
//!     The vocabulary of recognized tags lives in one table (./vocabulary.rs)
//!     consulted by every parser and serializer, so adding a tag means
//!     extending one table rather than touching two independent code paths.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── vocabulary.rs           # The shared tag table
//!     ├── formats
//!     │   ├── tagup
//!     │   │   ├── parser.rs       # markup string → tree
//!     │   │   ├── serializer.rs   # tree → markup string (+ cleanup pass)
//!     │   │   ├── cleanup_rules.rs
//!     │   │   └── mod.rs
//!     │   └── html
//!     │       ├── parser.rs       # HTML string → tree (import)
//!     │       ├── serializer.rs   # tree → HTML string (export)
//!     │       └── mod.rs
//!     ├── ir                      # The document tree
//!     └── lib.rs
//!
//! Failure philosophy
//!
//!     The engine never fails, it degrades. An unmatched or unrecognized
//!     markup tag stays in the output as literal text; an unrecognized HTML
//!     element decodes to its concatenated children, losing styling but
//!     never text; empty wrapper pairs left behind by editing artifacts are
//!     stripped. Every input, however malformed, produces some output
//!     string. The `Result` types on the Format trait exist for the
//!     registry/CLI seam (unknown format names), not for conversion itself.
//!
//! Library Choices
//!
//!     HTML parsing and serialization are offloaded to the html5ever +
//!     markup5ever_rcdom ecosystem (browser-grade, handles malformed HTML
//!     gracefully), so this crate only adapts between its own tree and the
//!     DOM. The tagup dialect has no external library, so its parser and
//!     serializer are written here.

pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;
pub mod vocabulary;

pub use error::ConvertError;
pub use format::Format;
pub use formats::tagup::cleanup_rules::CleanupRules;
pub use registry::FormatRegistry;

/// Converts a tagup markup string to an HTML fragment.
///
/// Never fails: tags that are unrecognized, unmatched, or malformed pass
/// through as literal text, and the empty string maps to the empty string.
pub fn encode(markup: &str) -> String {
    let doc = formats::tagup::parser::parse_markup(markup);
    match formats::html::serializer::serialize_to_html(&doc) {
        Ok(html) => html,
        // Serialization into an in-memory buffer cannot actually fail;
        // degrade to the stored markup rather than dropping content.
        Err(_) => markup.to_string(),
    }
}

/// Converts an HTML string (fragment or full document) back to tagup markup.
///
/// Never fails: unrecognized elements degrade to their concatenated text
/// content, losing only styling. Uses the default [`CleanupRules`].
pub fn decode(html: &str) -> String {
    decode_with_rules(html, &CleanupRules::default())
}

/// Converts HTML back to tagup markup with explicit cleanup rules.
pub fn decode_with_rules(html: &str, rules: &CleanupRules) -> String {
    let doc = formats::html::parser::parse_from_html(html);
    formats::tagup::serializer::serialize_with_rules(&doc, rules)
}
