//! Markdown parsing (Markdown → document model)
//!
//! Single forward pass over physical lines. Each line is classified against
//! its trimmed form in a fixed precedence order: code fence, blockquote,
//! table, heading, bullet item, numbered item, horizontal rule, blank,
//! paragraph. The only lookahead is the table scan, which consumes every
//! following pipe-wrapped line.
//!
//! Parsing is total: ragged tables are padded, an unterminated fence closes at
//! end of input and unknown constructs fall back to paragraphs.

use crate::model::{Block, Document, ListGroupId, Row};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+").expect("numbered item pattern compiles"));

static SEPARATOR_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("separator cell pattern compiles"));

/// Deepest supported list nesting level (three levels: 0, 1, 2).
pub const MAX_LIST_LEVEL: u8 = 2;

/// Deepest supported heading level.
pub const MAX_HEADING_LEVEL: usize = 4;

/// Parse Markdown text into a document.
pub fn parse_markdown(source: &str) -> Document {
    let lines: Vec<&str> = source.lines().collect();
    let mut parser = LineParser::default();
    let mut index = 0;

    while index < lines.len() {
        index = parser.consume(&lines, index);
    }

    let document = parser.finish();
    log::debug!(
        "parsed {} lines into {} blocks",
        lines.len(),
        document.blocks.len()
    );
    document
}

/// Parser state carried across lines.
#[derive(Default)]
struct LineParser {
    blocks: Vec<Block>,
    code: Option<OpenCodeBlock>,
    /// Open list runs keyed by (ordered, level). Cleared by any non-list,
    /// non-blank block; blank lines leave them open.
    open_groups: HashMap<(bool, u8), ListGroupId>,
    group_counter: u32,
}

struct OpenCodeBlock {
    lines: Vec<String>,
    language: Option<String>,
}

impl LineParser {
    /// Consume the line at `index` (plus any lookahead) and return the index
    /// of the next unconsumed line.
    fn consume(&mut self, lines: &[&str], index: usize) -> usize {
        let raw = lines[index];
        let trimmed = raw.trim();

        if trimmed.starts_with("```") {
            self.toggle_fence(trimmed);
            return index + 1;
        }

        if let Some(code) = self.code.as_mut() {
            code.lines.push(raw.to_string());
            return index + 1;
        }

        if let Some(quoted) = trimmed.strip_prefix("> ") {
            self.push_block(Block::Blockquote {
                text: quoted.trim().to_string(),
            });
            return index + 1;
        }
        if trimmed == ">" {
            // Empty quote line: separates quote paragraphs, emits nothing.
            return index + 1;
        }

        if is_table_line(trimmed) {
            return self.consume_table(lines, index);
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            self.push_block(Block::Heading {
                level,
                text: text.to_string(),
            });
            return index + 1;
        }

        let indent = leading_whitespace(raw);
        if let Some(text) = strip_bullet(trimmed) {
            self.push_list_item(text, false, indent);
            return index + 1;
        }

        if let Some(found) = NUMBERED_ITEM.find(trimmed) {
            self.push_list_item(&trimmed[found.end()..], true, indent);
            return index + 1;
        }

        if is_horizontal_rule(trimmed) {
            self.push_block(Block::HorizontalRule);
            return index + 1;
        }

        if trimmed.is_empty() {
            return index + 1;
        }

        self.push_block(Block::Paragraph {
            text: trimmed.to_string(),
        });
        index + 1
    }

    fn toggle_fence(&mut self, trimmed: &str) {
        match self.code.take() {
            Some(open) => self.push_block(Block::CodeBlock {
                lines: open.lines,
                language: open.language,
            }),
            None => {
                let info = trimmed.trim_start_matches('`').trim();
                self.code = Some(OpenCodeBlock {
                    lines: Vec::new(),
                    language: (!info.is_empty()).then(|| info.to_string()),
                });
            }
        }
    }

    fn consume_table(&mut self, lines: &[&str], start: usize) -> usize {
        let mut rows: Vec<Row> = Vec::new();
        let mut header_row_present = false;
        let mut index = start;

        while index < lines.len() {
            let trimmed = lines[index].trim();
            if !is_table_line(trimmed) {
                break;
            }
            let cells = split_cells(trimmed);
            if is_separator_row(&cells) {
                // Only a separator directly under the first row marks a header.
                if rows.len() == 1 {
                    header_row_present = true;
                }
            } else {
                rows.push(cells);
            }
            index += 1;
        }

        if rows.is_empty() {
            // Separator lines alone are not a table.
            for line in &lines[start..index] {
                self.push_block(Block::Paragraph {
                    text: line.trim().to_string(),
                });
            }
            return index;
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            if row.len() < columns {
                log::warn!("padding table row from {} to {columns} cells", row.len());
                row.resize(columns, String::new());
            }
        }

        self.push_block(Block::Table {
            rows,
            header_row_present,
        });
        index
    }

    fn push_list_item(&mut self, text: &str, ordered: bool, indent: usize) {
        let level = ((indent / 2).min(MAX_LIST_LEVEL as usize)) as u8;
        let key = (ordered, level);
        // Returning to a shallower level ends the runs nested below it.
        self.open_groups.retain(|(_, open_level), _| *open_level <= level);
        let group = match self.open_groups.get(&key) {
            Some(group) => *group,
            None => {
                self.group_counter += 1;
                let group = ListGroupId(self.group_counter);
                self.open_groups.insert(key, group);
                group
            }
        };
        self.blocks.push(Block::ListItem {
            text: text.trim().to_string(),
            ordered,
            level,
            ordinal_group: group,
        });
    }

    /// Push a non-list block. Breaks every open list run.
    fn push_block(&mut self, block: Block) {
        self.open_groups.clear();
        self.blocks.push(block);
    }

    fn finish(mut self) -> Document {
        if let Some(open) = self.code.take() {
            log::warn!(
                "unterminated code fence closed at end of input ({} lines)",
                open.lines.len()
            );
            self.push_block(Block::CodeBlock {
                lines: open.lines,
                language: open.language,
            });
        }
        Document::new(self.blocks)
    }
}

fn is_table_line(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn split_cells(trimmed: &str) -> Row {
    let inner = &trimmed[1..trimmed.len() - 1];
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| SEPARATOR_CELL.is_match(cell))
}

fn parse_heading(trimmed: &str) -> Option<(u8, &str)> {
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = trimmed[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest.trim()))
}

fn strip_bullet(trimmed: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
}

fn is_horizontal_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first @ ('-' | '_' | '*')) => trimmed.len() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}

fn leading_whitespace(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(source: &str) -> Vec<Block> {
        parse_markdown(source).blocks
    }

    #[test]
    fn headings_up_to_level_four() {
        assert_eq!(
            blocks("# One\n#### Four\n##### Five\n#NoSpace"),
            vec![
                Block::Heading {
                    level: 1,
                    text: "One".to_string()
                },
                Block::Heading {
                    level: 4,
                    text: "Four".to_string()
                },
                Block::Paragraph {
                    text: "##### Five".to_string()
                },
                Block::Paragraph {
                    text: "#NoSpace".to_string()
                },
            ]
        );
    }

    #[test]
    fn list_levels_follow_indentation() {
        let parsed = blocks("- a\n  - b\n    - c\n          - d");
        let levels: Vec<u8> = parsed
            .iter()
            .map(|b| match b {
                Block::ListItem { level, .. } => *level,
                other => panic!("unexpected block {other:?}"),
            })
            .collect();
        assert_eq!(levels, vec![0, 1, 2, 2]);
    }

    #[test]
    fn bullet_markers() {
        for source in ["- item", "* item", "+ item"] {
            assert_eq!(
                blocks(source),
                vec![Block::ListItem {
                    text: "item".to_string(),
                    ordered: false,
                    level: 0,
                    ordinal_group: ListGroupId(1),
                }]
            );
        }
    }

    #[test]
    fn paragraph_between_ordered_lists_starts_new_group() {
        let parsed = blocks("1. a\n2. b\n\nBreak\n\n3. c\n");
        let groups: Vec<ListGroupId> = parsed
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { ordinal_group, .. } => Some(*ordinal_group),
                _ => None,
            })
            .collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], groups[1]);
        assert_ne!(groups[1], groups[2]);
    }

    #[test]
    fn blank_lines_do_not_split_a_list_run() {
        let parsed = blocks("1. a\n\n2. b\n");
        match (&parsed[0], &parsed[1]) {
            (
                Block::ListItem {
                    ordinal_group: first,
                    ..
                },
                Block::ListItem {
                    ordinal_group: second,
                    ..
                },
            ) => assert_eq!(first, second),
            other => panic!("unexpected blocks {other:?}"),
        }
    }

    #[test]
    fn nested_run_restarts_under_next_parent() {
        let parsed = blocks("1. a\n   1. x\n2. b\n   1. y\n");
        let groups: Vec<ListGroupId> = parsed
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { ordinal_group, .. } => Some(*ordinal_group),
                _ => None,
            })
            .collect();
        assert_eq!(groups[0], groups[2]);
        assert_ne!(groups[1], groups[3]);
    }

    #[test]
    fn source_numbers_are_ignored() {
        let parsed = blocks("7. Foo\n3. Jump");
        assert!(matches!(
            &parsed[1],
            Block::ListItem { text, ordered: true, .. } if text == "Jump"
        ));
    }

    #[test]
    fn fenced_code_keeps_lines_verbatim() {
        assert_eq!(
            blocks("```rust\nfn main() {\n\n    **not bold**\n}\n```\nafter"),
            vec![
                Block::CodeBlock {
                    lines: vec![
                        "fn main() {".to_string(),
                        "".to_string(),
                        "    **not bold**".to_string(),
                        "}".to_string(),
                    ],
                    language: Some("rust".to_string()),
                },
                Block::Paragraph {
                    text: "after".to_string()
                },
            ]
        );
    }

    #[test]
    fn unterminated_fence_closes_at_end_of_input() {
        assert_eq!(
            blocks("```\nline one\n# not a heading"),
            vec![Block::CodeBlock {
                lines: vec!["line one".to_string(), "# not a heading".to_string()],
                language: None,
            }]
        );
    }

    #[test]
    fn blockquote_lines_are_separate_blocks() {
        assert_eq!(
            blocks("> first\n> second"),
            vec![
                Block::Blockquote {
                    text: "first".to_string()
                },
                Block::Blockquote {
                    text: "second".to_string()
                },
            ]
        );
    }

    #[test]
    fn table_with_header_separator() {
        assert_eq!(
            blocks("| a | b |\n|---|---|\n| 1 | 2 |\nafter"),
            vec![
                Block::Table {
                    rows: vec![
                        vec!["a".to_string(), "b".to_string()],
                        vec!["1".to_string(), "2".to_string()],
                    ],
                    header_row_present: true,
                },
                Block::Paragraph {
                    text: "after".to_string()
                },
            ]
        );
    }

    #[test]
    fn ragged_table_rows_are_padded() {
        let parsed = blocks("| a |\n| b | c | d |\n| e | f |");
        match &parsed[0] {
            Block::Table {
                rows,
                header_row_present,
            } => {
                assert!(!header_row_present);
                assert!(rows.iter().all(|row| row.len() == 3));
                assert_eq!(rows[0], vec!["a", "", ""]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn aligned_separator_cells() {
        let parsed = blocks("| h |\n| :---: |\n| v |");
        assert!(matches!(
            &parsed[0],
            Block::Table {
                header_row_present: true,
                rows
            } if rows.len() == 2
        ));
    }

    #[test]
    fn separator_after_second_row_is_not_a_header() {
        let parsed = blocks("| h1 |\n| h2 |\n|---|\n| body |");
        assert_eq!(
            parsed,
            vec![Block::Table {
                rows: vec![
                    vec!["h1".to_string()],
                    vec!["h2".to_string()],
                    vec!["body".to_string()],
                ],
                header_row_present: false,
            }]
        );
    }

    #[test]
    fn leading_separator_is_not_a_header() {
        let parsed = blocks("|---|---|\n| a | b |");
        assert_eq!(
            parsed,
            vec![Block::Table {
                rows: vec![vec!["a".to_string(), "b".to_string()]],
                header_row_present: false,
            }]
        );
    }

    #[test]
    fn separator_only_lines_become_paragraphs() {
        assert_eq!(
            blocks("|---|---|\n|:-:|\nafter"),
            vec![
                Block::Paragraph {
                    text: "|---|---|".to_string()
                },
                Block::Paragraph {
                    text: "|:-:|".to_string()
                },
                Block::Paragraph {
                    text: "after".to_string()
                },
            ]
        );
    }

    #[test]
    fn horizontal_rules() {
        for source in ["---", "___", "*****"] {
            assert_eq!(blocks(source), vec![Block::HorizontalRule]);
        }
        assert_eq!(
            blocks("-*-"),
            vec![Block::Paragraph {
                text: "-*-".to_string()
            }]
        );
    }

    #[test]
    fn blank_lines_are_never_emitted() {
        assert!(blocks("\n\n   \n").is_empty());
        assert!(parse_markdown("").is_empty());
    }
}
