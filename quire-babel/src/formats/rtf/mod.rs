//! RTF export
//!
//! RTF is produced from the HTML serializer's output rather than from the
//! document model: the page is rendered without styles, parsed back into a
//! DOM and converted (see [`converter`]). The document model and the HTML
//! serializer carry no RTF-specific logic.
//!
//! # Options
//!
//! - `title`: document title stored in the `\info` group

pub mod converter;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{reject_unknown_options, string_option};
use crate::formats::html::{serialize_to_html_with_options, HtmlOptions};
use crate::model::Document;
use std::collections::HashMap;

pub use converter::{escape_rtf, html_to_rtf};

const OPTION_KEYS: &[&str] = &["title"];

/// Render a document to RTF through its unstyled HTML form.
pub fn to_rtf(doc: &Document, title: Option<&str>) -> Result<String, FormatError> {
    let mut options = HtmlOptions::new(false);
    if let Some(title) = title {
        options = options.with_title(title);
    }
    let html = serialize_to_html_with_options(doc, &options)?;
    html_to_rtf(&html)
}

/// Format implementation for RTF
#[derive(Debug, Default)]
pub struct RtfFormat;

impl RtfFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Format for RtfFormat {
    fn name(&self) -> &str {
        "rtf"
    }

    fn description(&self) -> &str {
        "Rich Text Format (converted from HTML)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rtf"]
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_rtf(doc, None)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, OPTION_KEYS)?;
        to_rtf(doc, string_option(options, "title")).map(SerializedDocument::Text)
    }
}
