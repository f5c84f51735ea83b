//! Format trait definition
//!
//! This module defines the core Format trait that all output formats implement.
//! Input is always Markdown (see [`crate::formats::markdown`]); formats only
//! serialize the parsed [`Document`].

use crate::error::FormatError;
use crate::model::Document;
use std::collections::HashMap;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedDocument {
    /// UTF-8 text output (e.g., HTML, RTF)
    Text(String),
    /// Binary output (e.g., DOCX, PDF)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }
}

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct PlainFormat;
///
/// impl Format for PlainFormat {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(format!("{} blocks", doc.blocks.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html", "docx")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// The first entry is the extension used for default output file names.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether the output is binary and must go to a file
    fn is_binary(&self) -> bool {
        false
    }

    /// Serialize a Document into text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not produce text output",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Text formats without options can rely on the default implementation,
    /// which delegates to [`Format::serialize`]. Binary formats override this
    /// method to return [`SerializedDocument::Binary`].
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            self.serialize(doc).map(SerializedDocument::Text)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
