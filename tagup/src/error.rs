//! Error types for format operations

use std::fmt;

/// Errors that can occur at the format-selection seam.
///
/// Conversion itself never fails (malformed input degrades to literal
/// text), so these only surface from the registry and the Format trait:
/// asking for an unknown format or an unsupported direction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
