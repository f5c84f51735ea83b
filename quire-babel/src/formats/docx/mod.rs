//! DOCX (OOXML word-processing package) export
//!
//! # Package layout
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! word/document.xml
//! word/styles.xml
//! word/numbering.xml
//! word/settings.xml
//! word/header1.xml
//! word/footer1.xml
//! word/_rels/document.xml.rels
//! ```
//!
//! # Element Mapping Table
//!
//! | Block          | OOXML                                              |
//! |----------------|----------------------------------------------------|
//! | Heading        | paragraph with `HeadingN` style                    |
//! | Paragraph      | plain paragraph                                    |
//! | ListItem       | `ListParagraph` + `numPr` (ilvl = level)           |
//! | CodeBlock      | one shaded monospace paragraph per line            |
//! | Blockquote     | left-bordered, indented italic paragraph           |
//! | Table          | fixed-width `w:tbl`, header fill, zebra body rows  |
//! | HorizontalRule | empty paragraph with a bottom border               |
//! | Link span      | `w:hyperlink` with an external relationship        |
//!
//! Bullet lists share `numId 1`. Every ordered list run gets its own numbering
//! instance restarting at 1, so two lists separated by a paragraph both count
//! from 1.
//!
//! # Options
//!
//! - `title`: header text (defaults to the first heading, then "Untitled")
//! - `archiver`: `builtin` (default) or `system`

mod body;
mod numbering;
mod package;
mod parts;
mod relationships;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{reject_unknown_options, string_option};
use crate::formats::html::DEFAULT_TITLE;
use crate::model::Document;
use std::collections::HashMap;

pub use body::{render_document, BodyPart, HyperlinkRel, BULLET_NUM_ID};
pub use package::{Archiver, PackagePart, ZIP_BIN_ENV};

pub(crate) const PAGE_WIDTH_TWIPS: u32 = 12240;
pub(crate) const PAGE_HEIGHT_TWIPS: u32 = 15840;
pub(crate) const MARGIN_TWIPS: u32 = 1440;
/// Page width minus both margins.
pub(crate) const CONTENT_WIDTH_TWIPS: u32 = PAGE_WIDTH_TWIPS - 2 * MARGIN_TWIPS;

pub(crate) const ACCENT_COLOR: &str = "9E3A5B";
pub(crate) const HEADER_FILL: &str = "F2D7E0";
pub(crate) const ZEBRA_FILL: &str = "F7F7F7";
pub(crate) const CODE_FILL: &str = "F4F4F4";

pub(crate) const NUMBERING_REL_ID: &str = "rId1";
pub(crate) const STYLES_REL_ID: &str = "rId2";
pub(crate) const SETTINGS_REL_ID: &str = "rId3";
pub(crate) const HEADER_REL_ID: &str = "rId4";
pub(crate) const FOOTER_REL_ID: &str = "rId5";
/// Hyperlink ids start after the five reserved part relationships.
pub(crate) const FIRST_HYPERLINK_REL: usize = 6;

const OPTION_KEYS: &[&str] = &["title", "archiver"];

/// Generate every package part, in archive order.
pub fn render_parts(doc: &Document, title: &str) -> Vec<PackagePart> {
    let body = render_document(doc);
    log::debug!(
        "docx body: {} hyperlinks, {} numbered lists",
        body.hyperlinks.len(),
        body.numbered_list_group_count
    );

    vec![
        PackagePart::new("[Content_Types].xml", parts::render_content_types()),
        PackagePart::new("_rels/.rels", relationships::render_package_rels()),
        PackagePart::new("word/document.xml", body.xml),
        PackagePart::new("word/styles.xml", parts::render_styles()),
        PackagePart::new(
            "word/numbering.xml",
            numbering::render_numbering(body.numbered_list_group_count),
        ),
        PackagePart::new("word/settings.xml", parts::render_settings()),
        PackagePart::new("word/header1.xml", parts::render_header(title)),
        PackagePart::new("word/footer1.xml", parts::render_footer()),
        PackagePart::new(
            "word/_rels/document.xml.rels",
            relationships::render_document_rels(&body.hyperlinks),
        ),
    ]
}

/// Build a DOCX archive with the in-process archiver.
pub fn to_docx_package(doc: &Document, title: &str) -> Result<Vec<u8>, FormatError> {
    to_docx_package_with(doc, title, Archiver::Builtin)
}

/// Build a DOCX archive with the given archiver.
pub fn to_docx_package_with(
    doc: &Document,
    title: &str,
    archiver: Archiver,
) -> Result<Vec<u8>, FormatError> {
    package::build_package(&render_parts(doc, title), archiver)
}

/// Format implementation for DOCX
#[derive(Debug, Default)]
pub struct DocxFormat {
    archiver: Archiver,
}

impl DocxFormat {
    pub fn new(archiver: Archiver) -> Self {
        Self { archiver }
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document (OOXML package)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "DOCX serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, OPTION_KEYS)?;
        let archiver = match string_option(options, "archiver") {
            Some(value) => Archiver::parse(value)?,
            None => self.archiver,
        };
        let title = string_option(options, "title")
            .map(str::to_string)
            .or_else(|| doc.first_heading())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        to_docx_package_with(doc, &title, archiver).map(SerializedDocument::Binary)
    }
}
