//! Format implementations
//!
//! This module contains the two format implementations that convert between
//! the document tree and its text representations.

pub mod html;
pub mod tagup;

pub use html::{HtmlFormat, HtmlOptions};
pub use tagup::TagupFormat;
