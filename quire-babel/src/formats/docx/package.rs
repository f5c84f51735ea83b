//! Package staging and archiving.
//!
//! Parts are written to a temporary directory laid out exactly like the final
//! package, then archived. The directory is removed when the [`TempDir`] guard
//! drops, whether archiving succeeded or not.

use crate::error::FormatError;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;
use zip::write::{SimpleFileOptions, ZipWriter};

#[cfg(feature = "native-export")]
use std::path::PathBuf;
#[cfg(feature = "native-export")]
use std::process::Command;

/// Environment variable overriding the `zip` binary used by [`Archiver::System`].
pub const ZIP_BIN_ENV: &str = "QUIRE_ZIP_BIN";

const STAGE_DIR: &str = "package";
const ARCHIVE_NAME: &str = "package.docx";

/// How the staged package is turned into a ZIP archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Archiver {
    /// In-process ZIP writer
    #[default]
    Builtin,
    /// External `zip` binary
    System,
}

impl Archiver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archiver::Builtin => "builtin",
            Archiver::System => "system",
        }
    }

    pub fn parse(value: &str) -> Result<Self, FormatError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Archiver::Builtin),
            "system" => Ok(Archiver::System),
            other => Err(FormatError::NotSupported(format!(
                "Unknown archiver '{other}' (expected 'builtin' or 'system')"
            ))),
        }
    }
}

/// One part of the package: its path inside the archive and its content.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagePart {
    pub path: &'static str,
    pub content: String,
}

impl PackagePart {
    pub fn new(path: &'static str, content: String) -> Self {
        Self { path, content }
    }
}

/// Stage `parts` on disk and archive them.
pub fn build_package(parts: &[PackagePart], archiver: Archiver) -> Result<Vec<u8>, FormatError> {
    let temp = TempDir::new()
        .map_err(|e| FormatError::file_system("creating staging directory", e))?;
    let stage = temp.path().join(STAGE_DIR);
    stage_parts(&stage, parts)?;
    log::debug!(
        "staged {} package parts in {}",
        parts.len(),
        stage.display()
    );

    match archiver {
        Archiver::Builtin => zip_builtin(&stage, parts),
        Archiver::System => zip_system(&stage, &temp.path().join(ARCHIVE_NAME)),
    }
}

fn stage_parts(stage: &Path, parts: &[PackagePart]) -> Result<(), FormatError> {
    for part in parts {
        let path = stage.join(part.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FormatError::file_system(format!("creating {}", parent.display()), e)
            })?;
        }
        fs::write(&path, part.content.as_bytes())
            .map_err(|e| FormatError::file_system(format!("staging {}", part.path), e))?;
    }
    Ok(())
}

/// Archive the staged files in part order, so `[Content_Types].xml` leads.
fn zip_builtin(stage: &Path, parts: &[PackagePart]) -> Result<Vec<u8>, FormatError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for part in parts {
        let bytes = fs::read(stage.join(part.path))
            .map_err(|e| FormatError::file_system(format!("reading staged {}", part.path), e))?;
        writer
            .start_file(part.path, options)
            .map_err(|e| FormatError::ArchiveFailure(format!("adding {}: {e}", part.path)))?;
        writer
            .write_all(&bytes)
            .map_err(|e| FormatError::ArchiveFailure(format!("writing {}: {e}", part.path)))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| FormatError::ArchiveFailure(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(feature = "native-export")]
fn zip_system(stage: &Path, archive: &Path) -> Result<Vec<u8>, FormatError> {
    let zip = resolve_zip_binary()?;
    run_zip(&zip, stage, archive)
}

#[cfg(not(feature = "native-export"))]
fn zip_system(_stage: &Path, _archive: &Path) -> Result<Vec<u8>, FormatError> {
    Err(FormatError::ArchiveFailure(
        "the system archiver requires the native-export feature".to_string(),
    ))
}

/// Run `zip -X -r <archive> .` inside `stage` and read the result back.
#[cfg(feature = "native-export")]
pub(crate) fn run_zip(zip: &Path, stage: &Path, archive: &Path) -> Result<Vec<u8>, FormatError> {
    log::debug!("archiving with {}", zip.display());
    let status = Command::new(zip)
        .arg("-X")
        .arg("-r")
        .arg(archive)
        .arg(".")
        .current_dir(stage)
        .status()
        .map_err(|e| {
            FormatError::ArchiveFailure(format!("failed to launch {}: {e}", zip.display()))
        })?;

    if !status.success() {
        let code = status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(FormatError::ArchiveFailure(format!(
            "zip exited with status {code}"
        )));
    }

    fs::read(archive).map_err(|e| FormatError::file_system("reading archive", e))
}

#[cfg(feature = "native-export")]
fn resolve_zip_binary() -> Result<PathBuf, FormatError> {
    if let Some(path) = std::env::var_os(ZIP_BIN_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    which::which("zip").map_err(|_| {
        FormatError::ArchiveFailure(format!(
            "Unable to locate a zip binary. Set {ZIP_BIN_ENV} to override the detection."
        ))
    })
}
