//! HTML format implementation
//!
//! Bidirectional conversion between the document tree and HTML5.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `rcdom` ecosystem for HTML parsing and
//! serialization:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! This choice is based on:
//! - Complete solution for both parsing and serialization
//! - WHATWG HTML5 specification compliance
//! - Handles malformed HTML gracefully, which matches the never-fail
//!   contract of this crate: whatever an editor produces, import returns
//!   a markup string
//!
//! # Element Mapping Table
//!
//! | Tree node    | HTML export                                     | Import accepts                               |
//! |--------------|-------------------------------------------------|----------------------------------------------|
//! | Text         | text, newlines as `<br>`                        | text nodes, `<br>`                           |
//! | Bold         | `<strong>`                                      | `b`, `strong`, `font-weight` bold or ≥ 600   |
//! | Italic       | `<em>`                                          | `i`, `em`, `font-style: italic`              |
//! | Underline    | `<u>`                                           | `u`, `ins`, `text-decoration: underline`     |
//! | Align        | `<div style="text-align: …">`                   | any block with a `text-align` style          |
//! | Link         | `<a href="…">`                                  | `a` with `href`                              |
//! | Image        | `<img src="…">`                                 | `img` with `src`                             |
//! | Attachment   | `<div class="tagup-attachment" data-src="…">`   | that class, or any `div` with `data-src`     |
//! | List         | `<ul>`/`<ol>` with `<li>` items                 | `ul`/`ol`                                    |
//!
//! Everything else imports as its text content; see the parser module.
//!
//! # Output Format
//!
//! Export produces an HTML fragment by default — the calling application
//! owns the page the fragment is rendered into. The `wrap` option produces
//! a standalone page instead, with a small embedded stylesheet so the
//! attachment placeholder has a visible form.

pub mod parser;
pub mod serializer;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::Document;

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Wrap the fragment in a complete standalone HTML page
    pub wrap_document: bool,
    /// Page title used when wrapping
    pub title: Option<String>,
}

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5, fragment or standalone page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parser::parse_from_html(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        let fragment = serializer::serialize_to_html(doc)?;
        if self.options.wrap_document {
            let title = self.options.title.as_deref().unwrap_or("Document");
            Ok(serializer::wrap_in_document(&fragment, title))
        } else {
            Ok(fragment)
        }
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &std::collections::HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let mut effective = self.options.clone();
        for (key, value) in options {
            match key.as_str() {
                "wrap" => {
                    effective.wrap_document = match value.as_str() {
                        "true" | "1" | "yes" => true,
                        "false" | "0" | "no" => false,
                        other => {
                            return Err(ConvertError::NotSupported(format!(
                                "Invalid value '{other}' for option 'wrap'"
                            )))
                        }
                    };
                }
                "title" => effective.title = Some(value.clone()),
                other => {
                    return Err(ConvertError::NotSupported(format!(
                        "Unknown HTML option '{other}'"
                    )))
                }
            }
        }
        HtmlFormat::new(effective).serialize(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Node;
    use std::collections::HashMap;

    #[test]
    fn test_fragment_by_default() {
        let doc = Document::new(vec![Node::Text("hi".to_string())]);
        let html = HtmlFormat::default().serialize(&doc).unwrap();
        assert_eq!(html, "hi");
    }

    #[test]
    fn test_wrap_option() {
        let doc = Document::new(vec![Node::Text("hi".to_string())]);
        let format = HtmlFormat::default();

        let mut options = HashMap::new();
        options.insert("wrap".to_string(), "true".to_string());
        options.insert("title".to_string(), "Lesson 1".to_string());

        let html = format.serialize_with_options(&doc, &options).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Lesson 1</title>"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let doc = Document::default();
        let format = HtmlFormat::default();

        let mut options = HashMap::new();
        options.insert("theme".to_string(), "dark".to_string());

        assert!(format.serialize_with_options(&doc, &options).is_err());
    }

    #[test]
    fn test_invalid_wrap_value_rejected() {
        let doc = Document::default();
        let format = HtmlFormat::default();

        let mut options = HashMap::new();
        options.insert("wrap".to_string(), "maybe".to_string());

        assert!(format.serialize_with_options(&doc, &options).is_err());
    }

    #[test]
    fn test_parse_roundtrip_through_format_trait() {
        let format = HtmlFormat::default();
        let doc = format.parse("<strong>x</strong>").unwrap();
        assert_eq!(format.serialize(&doc).unwrap(), "<strong>x</strong>");
    }
}
