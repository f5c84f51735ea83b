//! Markdown input
//!
//! Markdown is the only input format. The parser is hand-written and
//! deliberately small: it understands the subset of Markdown the exporters
//! render and nothing more.
//!
//! # Element Mapping Table
//!
//! | Markdown                         | Block                        | Notes                                        |
//! |----------------------------------|------------------------------|----------------------------------------------|
//! | ```` ```lang ````                | `CodeBlock`                  | Lines verbatim, unterminated fence allowed   |
//! | `> text`                         | `Blockquote`                 | One block per line, no nesting               |
//! | `\| a \| b \|`                   | `Table`                      | Separator row sets `header_row_present`      |
//! | `#` .. `####`                    | `Heading`                    | Five or more `#` is a paragraph              |
//! | `- `, `* `, `+ `                 | `ListItem { ordered: false }`| Level = min(indent / 2, 2)                   |
//! | `1. `                            | `ListItem { ordered: true }` | Source numbers ignored                       |
//! | `---`, `___`, `***`              | `HorizontalRule`             |                                              |
//! | anything else                    | `Paragraph`                  | One paragraph per line                       |
//!
//! # Limits
//!
//! - No nested block quotes.
//! - At most three list levels; deeper indentation clamps to level 2.
//! - No nested inline styles (see [`crate::inline`]).

pub mod parser;

pub use parser::{parse_markdown, MAX_HEADING_LEVEL, MAX_LIST_LEVEL};

/// File extensions recognized as Markdown input.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "txt"];

/// Whether `filename` looks like a Markdown source file.
pub fn is_markdown_filename(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
