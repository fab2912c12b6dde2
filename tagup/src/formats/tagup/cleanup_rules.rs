//! Cleanup rules applied when generating tagup markup

use serde::{Deserialize, Serialize};

/// Controls the normalization pass that runs over generated markup.
///
/// Imported HTML tends to carry editor noise: non-breaking spaces, runs of
/// empty paragraphs, stray whitespace at the edges. These rules decide how
/// much of that survives into the markup output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupRules {
    /// Maximum number of consecutive blank lines kept in the output.
    /// Longer runs are collapsed down to this many.
    pub max_blank_lines: usize,
    /// Trim leading and trailing whitespace from the final output.
    pub trim_edges: bool,
    /// Replace non-breaking spaces with plain spaces.
    pub convert_nbsp: bool,
}

impl Default for CleanupRules {
    fn default() -> Self {
        CleanupRules {
            max_blank_lines: 1,
            trim_edges: true,
            convert_nbsp: true,
        }
    }
}
