//! Shared configuration loader for the adf2adoc toolchain.
//!
//! `defaults/adf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AdfConfig`].

use adf_babel::RenderOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Top-level configuration consumed by adf2adoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub convert: ConvertConfig,
    pub upload: UploadConfig,
}

/// Settings of the ADF to AsciiDoc conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub base_url: String,
    pub jira_base_url: String,
    pub images_dir: String,
    pub default_image_extension: String,
}

impl From<&ConvertConfig> for RenderOptions {
    fn from(config: &ConvertConfig) -> Self {
        RenderOptions::new()
            .with_base_url(config.base_url.clone())
            .with_jira_base_url(config.jira_base_url.clone())
            .with_images_dir(config.images_dir.clone())
            .with_default_image_extension(config.default_image_extension.clone())
    }
}

impl From<ConvertConfig> for RenderOptions {
    fn from(config: ConvertConfig) -> Self {
        RenderOptions::from(&config)
    }
}

/// Settings of the passes run before a document is uploaded again.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_image_width: u64,
}

impl UploadConfig {
    /// The clamping width, `None` when clamping is disabled.
    pub fn max_image_width(&self) -> Option<u64> {
        (self.max_image_width > 0).then_some(self.max_image_width)
    }
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
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}
