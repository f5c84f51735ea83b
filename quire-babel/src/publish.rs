//! Document publishing pipeline.
//!
//! The export boundary: picks the format from the registry, serializes, and
//! writes the result when an output path is given. Every failure on the way
//! is folded into a single [`ExportFailure`] naming the target format.
//!
//! Use this for "Export to DOCX"-style commands where one call should handle
//! format selection, serialization and the file write. For more control over
//! the conversion process, use [`FormatRegistry`] directly.

use crate::error::{ExportFailure, FormatError};
use crate::format::SerializedDocument;
use crate::formats::html::DEFAULT_TITLE;
use crate::formats::markdown::parse_markdown;
use crate::model::Document;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "docx")
///     .with_output_path("notes.docx")
///     .with_option("title", "Notes");
/// ```
///
/// If no output path is provided, text formats return in-memory content.
/// Binary formats (DOCX, PDF) require an explicit output path.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The parsed document to convert.
    pub document: &'a Document,
    /// Target format name (e.g., "html", "docx", "pdf").
    pub format: &'a str,
    /// Optional file path for writing output. Required for binary formats.
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., title, archiver).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    /// Creates a new publish specification for the given document and format.
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a format-specific option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Adds every option in `options`, replacing existing keys.
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (for text formats without an output path).
    InMemory(String),
    /// Path to the written file (when output path was specified).
    File(PathBuf),
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    /// The published artifact (in-memory content or file path).
    pub artifact: PublishArtifact,
}

/// Publishes a document as described by `spec`.
///
/// # Errors
///
/// Returns [`ExportFailure`] if the format is unknown, serialization fails,
/// the output cannot be written, or a binary format has no output path.
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, ExportFailure> {
    let format = spec.format;
    publish_inner(spec).map_err(|reason| {
        log::debug!("{format} export failed: {reason}");
        ExportFailure::new(format, reason)
    })
}

fn publish_inner(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    let registry = FormatRegistry::with_defaults();
    let serialized = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    match serialized {
        SerializedDocument::Text(text) => write_or_return_text(text, spec.output),
        SerializedDocument::Binary(bytes) => write_binary(bytes, spec.output),
    }
}

/// Decode, parse and publish raw Markdown source.
///
/// `suggested_name` is the source file name; its stem becomes the default
/// document title for formats that show one.
pub fn export_source(
    source: &[u8],
    suggested_name: &str,
    format: &str,
    output: Option<&Path>,
    options: HashMap<String, String>,
) -> Result<PublishResult, ExportFailure> {
    let text = std::str::from_utf8(source).map_err(|e| {
        ExportFailure::new(
            format,
            FormatError::EncodingFailure(format!("input is not valid UTF-8: {e}")),
        )
    })?;
    let document = parse_markdown(text);

    let mut spec = PublishSpec::new(&document, format);
    if format != "html" && !options.contains_key("title") {
        spec = spec.with_option("title", default_title(suggested_name));
    }
    spec = spec.with_options(options);
    if let Some(path) = output {
        spec = spec.with_output_path(path);
    }
    publish(spec)
}

/// Stem of the suggested file name, or "Untitled".
pub fn default_title(suggested_name: &str) -> String {
    Path::new(suggested_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

/// Default output file name: the source extension replaced by the format's.
///
/// `notes.md` → `notes.docx`; an empty name becomes `Untitled.<ext>`.
pub fn default_output_name(suggested_name: &str, format: &str) -> Result<String, ExportFailure> {
    let extension = FormatRegistry::with_defaults()
        .primary_extension(format)
        .map_err(|reason| ExportFailure::new(format, reason))?;
    Ok(format!("{}.{extension}", default_title(suggested_name)))
}

fn write_or_return_text(
    text: String,
    output: Option<PathBuf>,
) -> Result<PublishResult, FormatError> {
    if let Some(path) = output {
        write_to_path(path, text.into_bytes()).map(|path| PublishResult {
            artifact: PublishArtifact::File(path),
        })
    } else {
        Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        })
    }
}

fn write_binary(bytes: Vec<u8>, output: Option<PathBuf>) -> Result<PublishResult, FormatError> {
    let path = output.ok_or_else(|| {
        FormatError::NotSupported("binary formats require an explicit output path".to_string())
    })?;
    write_to_path(path, bytes).map(|path| PublishResult {
        artifact: PublishArtifact::File(path),
    })
}

fn write_to_path(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, FormatError> {
    fs::write(&path, &bytes)
        .map(|_| path.clone())
        .map_err(|err| FormatError::file_system(format!("writing {}", path.display()), err))
}
