//! Core data structures for the document model.

use serde::Serialize;

/// Unparsed inline text. Markers such as `**bold**` stay in place until a
/// serializer tokenizes them.
pub type InlineRun = String;

/// One table row: raw cell text, inline-parsed at serialization time.
pub type Row = Vec<String>;

/// Identifier shared by all items of one contiguous, independently numbered
/// list run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListGroupId(pub u32);

/// A parsed Markdown document: blocks in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|block| matches!(block, Block::Blank))
    }

    /// Plain text of the first heading, with inline markers removed.
    pub fn first_heading(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { text, .. } => Some(crate::inline::plain_text(text)),
            _ => None,
        })
    }
}

/// A top-level structural unit of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Heading with level 1..=4.
    Heading { level: u8, text: InlineRun },
    Paragraph { text: InlineRun },
    /// List item. `level` is the nesting depth, 0..=2.
    ListItem {
        text: InlineRun,
        ordered: bool,
        level: u8,
        ordinal_group: ListGroupId,
    },
    /// Fenced code. Lines are kept verbatim, never inline-parsed.
    CodeBlock {
        lines: Vec<String>,
        language: Option<String>,
    },
    Blockquote { text: InlineRun },
    /// Rows include the header row when `header_row_present` is set. All rows
    /// have the same length.
    Table {
        rows: Vec<Row>,
        header_row_present: bool,
    },
    HorizontalRule,
    /// List/paragraph terminator. Never rendered.
    Blank,
}

impl Block {
    /// Number of columns of a table block, zero for everything else.
    pub fn column_count(&self) -> usize {
        match self {
            Block::Table { rows, .. } => rows.iter().map(Vec::len).max().unwrap_or(0),
            _ => 0,
        }
    }
}
