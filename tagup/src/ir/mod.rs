//! The document tree both conversion directions are built around.

pub mod nodes;

pub use nodes::{Alignment, Document, ListItem, Node};
