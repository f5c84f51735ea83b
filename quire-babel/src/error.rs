//! Error types for export operations

use std::io;
use thiserror::Error;

/// Errors that can occur while serializing or exporting a document.
///
/// Parsing never fails; every variant here belongs to an output path.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Format does not support the requested operation or option
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Text could not be represented in the required byte encoding
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),
    /// An intermediate rich-text conversion produced no result
    #[error("Conversion failure: {0}")]
    ConversionFailure(String),
    /// Temporary staging or the final write failed
    #[error("File system failure ({context}): {source}")]
    FileSystemFailure {
        context: String,
        #[source]
        source: io::Error,
    },
    /// The packaging step could not be invoked or exited unsuccessfully
    #[error("Archive failure: {0}")]
    ArchiveFailure(String),
}

impl FormatError {
    pub fn file_system(context: impl Into<String>, source: io::Error) -> Self {
        FormatError::FileSystemFailure {
            context: context.into(),
            source,
        }
    }
}

/// A failed export, as shown to the user: the target format plus the reason.
#[derive(Debug, Error)]
#[error("{} export failed: {reason}", .format.to_uppercase())]
pub struct ExportFailure {
    pub format: String,
    #[source]
    pub reason: FormatError,
}

impl ExportFailure {
    pub fn new(format: impl Into<String>, reason: FormatError) -> Self {
        Self {
            format: format.into(),
            reason,
        }
    }
}
