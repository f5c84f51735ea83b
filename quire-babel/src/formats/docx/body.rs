//! `word/document.xml` generation.
//!
//! The body pass is the first of two passes: while emitting paragraphs it
//! records every hyperlink target and every ordered list run it meets. The
//! relationship and numbering parts are generated afterwards from that
//! state, so every `r:id` and `w:numId` in the body has a declaration.

use super::{
    ACCENT_COLOR, CODE_FILL, CONTENT_WIDTH_TWIPS, FIRST_HYPERLINK_REL, FOOTER_REL_ID,
    HEADER_FILL, HEADER_REL_ID, MARGIN_TWIPS, PAGE_HEIGHT_TWIPS, PAGE_WIDTH_TWIPS, ZEBRA_FILL,
};
use crate::formats::common::escape_xml;
use crate::inline::{tokenize, InlineSpan};
use crate::model::{Block, Document, ListGroupId};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Numbering instance used by every bullet list.
pub const BULLET_NUM_ID: u32 = 1;

const MONO_FONT: &str = "Courier New";

/// A hyperlink relationship collected during the body pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperlinkRel {
    pub id: String,
    pub target: String,
}

/// Output of the body pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPart {
    pub xml: String,
    /// Hyperlink relationships in emission order, ids ascending from `rId6`.
    pub hyperlinks: Vec<HyperlinkRel>,
    /// Number of independent ordered list runs; run `n` uses `numId n + 2`.
    pub numbered_list_group_count: u32,
}

/// Run-level formatting applied on top of span styling.
#[derive(Debug, Clone, Copy, Default)]
struct RunStyle {
    bold: bool,
    italic: bool,
    mono: bool,
}

/// Render the main document part.
pub fn render_document(doc: &Document) -> BodyPart {
    let mut writer = BodyWriter::default();
    for block in &doc.blocks {
        writer.block(block);
    }

    let mut xml = String::with_capacity(writer.out.len() + 1024);
    xml.push_str(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        "<w:body>"
    ));
    if writer.out.is_empty() {
        xml.push_str("<w:p/>");
    } else {
        xml.push_str(&writer.out);
    }
    let _ = write!(
        xml,
        concat!(
            "<w:sectPr>",
            r#"<w:headerReference w:type="default" r:id="{header}"/>"#,
            r#"<w:footerReference w:type="default" r:id="{footer}"/>"#,
            r#"<w:pgSz w:w="{w}" w:h="{h}"/>"#,
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            "</w:sectPr></w:body></w:document>"
        ),
        header = HEADER_REL_ID,
        footer = FOOTER_REL_ID,
        w = PAGE_WIDTH_TWIPS,
        h = PAGE_HEIGHT_TWIPS,
        m = MARGIN_TWIPS,
    );

    BodyPart {
        xml,
        hyperlinks: writer.hyperlinks,
        numbered_list_group_count: writer.ordered_groups.len() as u32,
    }
}

#[derive(Default)]
struct BodyWriter {
    out: String,
    hyperlinks: Vec<HyperlinkRel>,
    /// Ordered list run → numId, assigned in order of first appearance.
    ordered_groups: HashMap<ListGroupId, u32>,
}

impl BodyWriter {
    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, text } => {
                let style = format!("Heading{}", (*level).clamp(1, 4));
                self.paragraph(&pstyle(&style), text, RunStyle::default());
            }
            Block::Paragraph { text } => self.paragraph("", text, RunStyle::default()),
            Block::ListItem {
                text,
                ordered,
                level,
                ordinal_group,
            } => {
                let num_id = if *ordered {
                    self.num_id_for(*ordinal_group)
                } else {
                    BULLET_NUM_ID
                };
                let props = format!(
                    "{}<w:numPr><w:ilvl w:val=\"{}\"/><w:numId w:val=\"{num_id}\"/></w:numPr>",
                    pstyle("ListParagraph"),
                    (*level).min(2)
                );
                self.paragraph(&props, text, RunStyle::default());
            }
            Block::CodeBlock { lines, .. } => self.code_block(lines),
            Block::Blockquote { text } => {
                let props = format!(
                    "<w:pBdr><w:left w:val=\"single\" w:sz=\"18\" w:space=\"8\" w:color=\"{ACCENT_COLOR}\"/></w:pBdr><w:ind w:left=\"720\"/>"
                );
                self.paragraph(
                    &props,
                    text,
                    RunStyle {
                        italic: true,
                        ..RunStyle::default()
                    },
                );
            }
            Block::Table {
                rows,
                header_row_present,
            } => self.table(rows, *header_row_present),
            Block::HorizontalRule => self.out.push_str(
                "<w:p><w:pPr><w:pBdr><w:bottom w:val=\"single\" w:sz=\"6\" w:space=\"1\" w:color=\"BFBFBF\"/></w:pBdr></w:pPr></w:p>",
            ),
            Block::Blank => {}
        }
    }

    fn num_id_for(&mut self, group: ListGroupId) -> u32 {
        let next = self.ordered_groups.len() as u32 + BULLET_NUM_ID + 1;
        *self.ordered_groups.entry(group).or_insert(next)
    }

    fn paragraph(&mut self, props: &str, text: &str, base: RunStyle) {
        self.out.push_str("<w:p>");
        if !props.is_empty() {
            let _ = write!(self.out, "<w:pPr>{props}</w:pPr>");
        }
        self.inline(text, base);
        self.out.push_str("</w:p>");
    }

    fn inline(&mut self, text: &str, base: RunStyle) {
        for span in tokenize(text) {
            match span {
                InlineSpan::Plain { text } => push_run(&mut self.out, &text, base, None),
                InlineSpan::Bold { text } => push_run(
                    &mut self.out,
                    &text,
                    RunStyle { bold: true, ..base },
                    None,
                ),
                InlineSpan::Italic { text } => push_run(
                    &mut self.out,
                    &text,
                    RunStyle {
                        italic: true,
                        ..base
                    },
                    None,
                ),
                InlineSpan::Code { text } => {
                    push_run(&mut self.out, &text, RunStyle { mono: true, ..base }, None)
                }
                InlineSpan::Link { text, url } => {
                    let id = format!("rId{}", FIRST_HYPERLINK_REL + self.hyperlinks.len());
                    let _ = write!(self.out, "<w:hyperlink r:id=\"{id}\">");
                    push_run(&mut self.out, &text, base, Some("Hyperlink"));
                    self.out.push_str("</w:hyperlink>");
                    self.hyperlinks.push(HyperlinkRel { id, target: url });
                }
            }
        }
    }

    fn code_block(&mut self, lines: &[String]) {
        let empty = [String::new()];
        let lines = if lines.is_empty() { &empty[..] } else { lines };
        let mono = RunStyle {
            mono: true,
            ..RunStyle::default()
        };
        for line in lines {
            let _ = write!(
                self.out,
                "<w:p><w:pPr><w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{CODE_FILL}\"/><w:spacing w:before=\"0\" w:after=\"0\"/></w:pPr>"
            );
            push_run(&mut self.out, line, mono, None);
            self.out.push_str("</w:p>");
        }
    }

    fn table(&mut self, rows: &[Vec<String>], header_row_present: bool) {
        // A w:tbl needs at least one w:tr.
        if rows.is_empty() {
            return;
        }
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let width = CONTENT_WIDTH_TWIPS / columns as u32;

        let _ = write!(
            self.out,
            "<w:tbl><w:tblPr><w:tblW w:w=\"{CONTENT_WIDTH_TWIPS}\" w:type=\"dxa\"/><w:tblBorders>"
        );
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            let _ = write!(
                self.out,
                "<w:{edge} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"D9D9D9\"/>"
            );
        }
        self.out
            .push_str("</w:tblBorders><w:tblLayout w:type=\"fixed\"/></w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            let _ = write!(self.out, "<w:gridCol w:w=\"{width}\"/>");
        }
        self.out.push_str("</w:tblGrid>");

        for (index, row) in rows.iter().enumerate() {
            let is_header = header_row_present && index == 0;
            let fill = if is_header {
                Some(HEADER_FILL)
            } else if header_row_present && (index - 1) % 2 == 1 {
                Some(ZEBRA_FILL)
            } else {
                None
            };

            self.out.push_str("<w:tr>");
            if is_header {
                self.out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
            }
            for column in 0..columns {
                let _ = write!(
                    self.out,
                    "<w:tc><w:tcPr><w:tcW w:w=\"{width}\" w:type=\"dxa\"/>"
                );
                if let Some(fill) = fill {
                    let _ = write!(
                        self.out,
                        "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{fill}\"/>"
                    );
                }
                self.out.push_str("</w:tcPr><w:p>");
                let cell = row.get(column).map(String::as_str).unwrap_or("");
                self.inline(
                    cell,
                    RunStyle {
                        bold: is_header,
                        ..RunStyle::default()
                    },
                );
                self.out.push_str("</w:p></w:tc>");
            }
            self.out.push_str("</w:tr>");
        }
        // A table may not end the body or touch another table directly.
        self.out.push_str("</w:tbl><w:p/>");
    }
}

fn pstyle(style: &str) -> String {
    format!("<w:pStyle w:val=\"{style}\"/>")
}

fn push_run(out: &mut String, text: &str, style: RunStyle, char_style: Option<&str>) {
    if text.is_empty() && char_style.is_none() {
        return;
    }
    out.push_str("<w:r>");
    if style.bold || style.italic || style.mono || char_style.is_some() {
        out.push_str("<w:rPr>");
        if let Some(char_style) = char_style {
            let _ = write!(out, "<w:rStyle w:val=\"{char_style}\"/>");
        }
        if style.mono {
            let _ = write!(
                out,
                "<w:rFonts w:ascii=\"{MONO_FONT}\" w:hAnsi=\"{MONO_FONT}\" w:cs=\"{MONO_FONT}\"/>"
            );
        }
        if style.bold {
            out.push_str("<w:b/>");
        }
        if style.italic {
            out.push_str("<w:i/>");
        }
        if style.mono {
            out.push_str("<w:sz w:val=\"20\"/>");
        }
        out.push_str("</w:rPr>");
    }
    let _ = write!(
        out,
        "<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        escape_xml(text)
    );
}
