//! Shared configuration loader for the mo-indent toolchain.
//!
//! `defaults/mo-indent.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MoIndentConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mo_indent::indent::IndentStyle;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mo-indent.default.toml");

/// Top-level configuration consumed by mo-indent applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MoIndentConfig {
    pub indentation: IndentStyle,
    pub auto_edit: AutoEditConfig,
}

/// Knobs for the editor strategies.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoEditConfig {
    pub close_blocks: bool,
    pub block_keywords: Vec<String>,
}

/// Stacks configuration sources, later ones winning key by key.
///
/// The embedded defaults always come first, so a user file only needs the keys it
/// changes. `[auto_edit] close_blocks = false` alone keeps the default `[indentation]`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Stack a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Stack a TOML file if it exists, such as a per-project `mo-indent.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Set one dotted key, e.g. `auto_edit.close_blocks`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Whitespace for one level, replacing `indentation.indent_string`.
    pub fn with_indent_string(self, indent: &str) -> Result<Self, ConfigError> {
        self.set_override("indentation.indent_string", indent)
    }

    pub fn build(self) -> Result<MoIndentConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<MoIndentConfig, ConfigError> {
    Loader::new().build()
}
