//! Shared configuration loader for the tagup toolchain.
//!
//! `defaults/tagup.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`TagupConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tagup::CleanupRules;

const DEFAULT_TOML: &str = include_str!("../defaults/tagup.default.toml");

/// Top-level configuration consumed by tagup applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TagupConfig {
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub tagup: CleanupConfig,
    pub html: HtmlConfig,
}

/// Mirrors the cleanup knobs of the tagup serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    pub max_blank_lines: usize,
    pub trim_edges: bool,
    pub convert_nbsp: bool,
}

impl From<CleanupConfig> for CleanupRules {
    fn from(config: CleanupConfig) -> Self {
        CleanupRules {
            max_blank_lines: config.max_blank_lines,
            trim_edges: config.trim_edges,
            convert_nbsp: config.convert_nbsp,
        }
    }
}

impl From<&CleanupConfig> for CleanupRules {
    fn from(config: &CleanupConfig) -> Self {
        CleanupRules {
            max_blank_lines: config.max_blank_lines,
            trim_edges: config.trim_edges,
            convert_nbsp: config.convert_nbsp,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub wrap_document: bool,
    pub title: String,
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TagupConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TagupConfig, ConfigError> {
    Loader::new().build()
}
