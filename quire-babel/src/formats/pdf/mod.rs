//! PDF export
//!
//! The document is laid out into one continuous block of styled lines
//! ([`layout`]), sliced into pages by [`crate::pagination::paginate`] and
//! drawn with the standard Type 1 fonts ([`render`]). No external renderer
//! is involved.
//!
//! Pages are US Letter (8.5 × 11 in) with 0.75 in margins on every side.
//!
//! # Options
//!
//! - `title`: document information title (defaults to the first heading)
//! - `base-font-size`: body text size in points (default 11)

pub mod layout;
pub mod render;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{reject_unknown_options, string_option};
use crate::formats::html::DEFAULT_TITLE;
use crate::model::Document;
use crate::pagination::paginate;
use layout::{layout_document, LayoutOptions};
use std::collections::HashMap;

pub use render::encode_win_ansi;

/// Page width in points.
pub const PAGE_WIDTH: f64 = 612.0;
/// Page height in points.
pub const PAGE_HEIGHT: f64 = 792.0;
pub const MARGIN: f64 = 54.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
pub const CONTENT_HEIGHT: f64 = PAGE_HEIGHT - 2.0 * MARGIN;

pub const DEFAULT_BASE_FONT_SIZE: f64 = 11.0;

const OPTION_KEYS: &[&str] = &["title", "base-font-size"];

fn layout_options(base_font_size: f64) -> LayoutOptions {
    LayoutOptions {
        content_width: CONTENT_WIDTH,
        base_font_size,
    }
}

/// Render a document to PDF bytes.
pub fn to_pdf(doc: &Document, title: &str, base_font_size: f64) -> Result<Vec<u8>, FormatError> {
    let layout = layout_document(doc, &layout_options(base_font_size));
    render::render_pdf(&layout, title)
}

/// Page offsets the document would be split at.
pub fn page_offsets(doc: &Document, base_font_size: f64) -> Vec<f64> {
    let layout = layout_document(doc, &layout_options(base_font_size));
    paginate(layout.total_height, CONTENT_HEIGHT)
}

/// Parse a base font size option value, in points.
pub fn parse_font_size(value: &str) -> Result<f64, FormatError> {
    match value.parse::<f64>() {
        Ok(size) if (4.0..=72.0).contains(&size) => Ok(size),
        _ => Err(FormatError::NotSupported(format!(
            "Invalid base-font-size '{value}' (expected a number of points between 4 and 72)"
        ))),
    }
}

/// Format implementation for PDF
#[derive(Debug)]
pub struct PdfFormat {
    base_font_size: f64,
}

impl Default for PdfFormat {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_FONT_SIZE)
    }
}

impl PdfFormat {
    pub fn new(base_font_size: f64) -> Self {
        Self { base_font_size }
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "Paginated PDF (US Letter)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, OPTION_KEYS)?;
        let base_font_size = match string_option(options, "base-font-size") {
            Some(value) => parse_font_size(value)?,
            None => self.base_font_size,
        };
        let title = string_option(options, "title")
            .map(str::to_string)
            .or_else(|| doc.first_heading())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        to_pdf(doc, &title, base_font_size).map(SerializedDocument::Binary)
    }
}
