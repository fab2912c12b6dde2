//! CLI-specific transforms
//!
//! This module defines the inspect transforms available in the CLI. A
//! transform takes source text plus its format name and renders the parsed
//! document tree in some debug representation.
//!
//! Available transforms:
//!
//! - `ast-json`:    document tree as pretty-printed JSON
//! - `ast-compact`: document tree as single-line JSON

use std::collections::HashMap;
use tagup::FormatRegistry;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ast-json", "ast-compact"];

/// Execute a named transform on source text.
///
/// `format` names the source format ("tagup" or "html"); `params` carries
/// extra settings. `pretty=false` switches `ast-json` to compact output.
pub fn execute_transform(
    source: &str,
    format: &str,
    transform_name: &str,
    params: &HashMap<String, String>,
) -> Result<String, String> {
    let registry = FormatRegistry::default();
    let doc = registry
        .parse(source, format)
        .map_err(|e| format!("Parse failed: {e}"))?;

    let pretty = match transform_name {
        "ast-json" => params
            .get("pretty")
            .map(|value| value != "false")
            .unwrap_or(true),
        "ast-compact" => false,
        other => return Err(format!("Unknown transform: {other}")),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    let mut output = json.map_err(|e| format!("JSON serialization failed: {e}"))?;
    output.push('\n');
    Ok(output)
}
