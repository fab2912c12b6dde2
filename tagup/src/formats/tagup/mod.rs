//! Tagup format implementation

pub mod cleanup_rules;
pub mod parser;
pub mod serializer;

pub use cleanup_rules::CleanupRules;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::Document;

/// The tagup markup format (bracketed tags, BBCode-style)
pub struct TagupFormat;

impl Format for TagupFormat {
    fn name(&self) -> &str {
        "tagup"
    }

    fn description(&self) -> &str {
        "Bracketed tag markup used for lesson and page content"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "tagup"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parser::parse_markup(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(serializer::serialize_markup(doc))
    }
}
