//! Shared configuration loader for the quire toolchain.
//!
//! `defaults/quire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuireConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quire_babel::formats::Archiver;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/quire.default.toml");

/// Name of the per-project file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "quire.toml";

/// Top-level configuration consumed by quire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    pub convert: ConvertConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
    pub docx: DocxConfig,
    pub pdf: PdfConfig,
}

impl ConvertConfig {
    /// Export options for `format`, in the key vocabulary the formats accept.
    ///
    /// Formats without configurable knobs get an empty map.
    pub fn options_for(&self, format: &str) -> HashMap<String, String> {
        let mut options = HashMap::new();
        match format {
            "html" => {
                options.insert(
                    "include-styles".to_string(),
                    self.html.include_styles.to_string(),
                );
                if let Some(path) = self.html.custom_css_path() {
                    options.insert("css-path".to_string(), path.to_string());
                }
            }
            "docx" => {
                options.insert(
                    "archiver".to_string(),
                    Archiver::from(self.docx.archiver).as_str().to_string(),
                );
            }
            "pdf" => {
                options.insert(
                    "base-font-size".to_string(),
                    self.pdf.base_font_size.to_string(),
                );
            }
            _ => {}
        }
        options
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub include_styles: bool,
    #[serde(default)]
    pub custom_css: String,
}

impl HtmlConfig {
    /// The extra stylesheet path, if one is configured.
    pub fn custom_css_path(&self) -> Option<&str> {
        let path = self.custom_css.trim();
        (!path.is_empty()).then_some(path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    pub archiver: ArchiverKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ArchiverKind {
    #[serde(rename = "builtin")]
    Builtin,
    #[serde(rename = "system")]
    System,
}

impl From<ArchiverKind> for Archiver {
    fn from(kind: ArchiverKind) -> Self {
        match kind {
            ArchiverKind::Builtin => Archiver::Builtin,
            ArchiverKind::System => Archiver::System,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub base_font_size: f64,
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
    pub fn build(self) -> Result<QuireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuireConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.convert.html.include_styles);
        assert_eq!(config.convert.html.custom_css_path(), None);
        assert_eq!(config.convert.docx.archiver, ArchiverKind::Builtin);
        assert_eq!(config.convert.pdf.base_font_size, 11.0);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.docx.archiver", "system")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.convert.docx.archiver, ArchiverKind::System);
    }

    #[test]
    fn rejects_unknown_archiver() {
        let result = Loader::new()
            .set_override("convert.docx.archiver", "7z")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        fs::write(&path, "[convert.pdf]\nbase_font_size = 14.0\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.convert.pdf.base_font_size, 14.0);
        assert!(config.convert.html.include_styles);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = Loader::new()
            .with_file(dir.path().join("absent.toml"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .unwrap();
        assert_eq!(config.convert.docx.archiver, ArchiverKind::Builtin);
    }

    #[test]
    fn archiver_kind_converts_to_archiver() {
        assert_eq!(Archiver::from(ArchiverKind::Builtin), Archiver::Builtin);
        assert_eq!(Archiver::from(ArchiverKind::System), Archiver::System);
    }

    #[test]
    fn options_use_format_keys() {
        let config = Loader::new()
            .set_override("convert.html.custom_css", "extra.css")
            .unwrap()
            .build()
            .unwrap();

        let html = config.convert.options_for("html");
        assert_eq!(html["include-styles"], "true");
        assert_eq!(html["css-path"], "extra.css");

        let docx = config.convert.options_for("docx");
        assert_eq!(docx["archiver"], "builtin");

        let pdf = config.convert.options_for("pdf");
        assert_eq!(pdf["base-font-size"], "11");

        assert!(config.convert.options_for("rtf").is_empty());
    }
}
