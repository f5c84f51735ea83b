//! Inspect transforms
//!
//! Each transform renders one internal view of a Markdown file:
//!
//! - `model-json`: the parsed document model as JSON (default)
//! - `model-debug`: the model as an indented block tree
//! - `inline-json`: the inline spans of every block that carries inline text
//! - `pages`: PDF page offsets for the document
//!
//! Transforms accept extra parameters via `--extra-<name> [value]`:
//!
//! - `base-font-size`: body size in points used by `pages`
//!
//! Example: `quire inspect notes.md pages --extra-base-font-size 14`

use quire_babel::formats::pdf::{self, DEFAULT_BASE_FONT_SIZE};
use quire_babel::inline::tokenize;
use quire_babel::model::{Block, Document};
use quire_babel::parse;
use serde_json::json;
use std::collections::HashMap;

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["model-json", "model-debug", "inline-json", "pages"];

/// Transform used when none is named
pub const DEFAULT_TRANSFORM: &str = "model-json";

/// Execute a named transform on Markdown source
///
/// ```ignore
/// let output = execute_transform("# Title", "model-debug", &HashMap::new())?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse(source);
    match transform_name {
        "model-json" => serde_json::to_string_pretty(&doc)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "model-debug" => Ok(model_to_tree(&doc)),
        "inline-json" => serde_json::to_string_pretty(&inline_spans_to_json(&doc))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "pages" => {
            let size = match extra_params.get("base-font-size") {
                Some(raw) => pdf::parse_font_size(raw).map_err(|e| e.to_string())?,
                None => DEFAULT_BASE_FONT_SIZE,
            };
            Ok(pages_to_text(&pdf::page_offsets(&doc, size)))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn model_to_tree(doc: &Document) -> String {
    let mut out = format!("Document ({} blocks)\n", doc.blocks.len());
    for block in &doc.blocks {
        match block {
            Block::Heading { level, text } => {
                out.push_str(&format!("├─ Heading[{level}] {text:?}\n"));
            }
            Block::Paragraph { text } => out.push_str(&format!("├─ Paragraph {text:?}\n")),
            Block::ListItem {
                text,
                ordered,
                level,
                ordinal_group,
            } => {
                let indent = "  ".repeat(usize::from(*level));
                let kind = if *ordered { "ordered" } else { "bullet" };
                out.push_str(&format!(
                    "├─ {indent}ListItem[{kind}, group {}] {text:?}\n",
                    ordinal_group.0
                ));
            }
            Block::CodeBlock { lines, language } => {
                let lang = language.as_deref().unwrap_or("-");
                out.push_str(&format!("├─ CodeBlock[{lang}] ({} lines)\n", lines.len()));
                for line in lines {
                    out.push_str(&format!("│    {line}\n"));
                }
            }
            Block::Blockquote { text } => out.push_str(&format!("├─ Blockquote {text:?}\n")),
            Block::Table {
                rows,
                header_row_present,
            } => {
                out.push_str(&format!(
                    "├─ Table ({} rows × {} cols, header: {header_row_present})\n",
                    rows.len(),
                    block.column_count()
                ));
                for row in rows {
                    out.push_str(&format!("│    | {} |\n", row.join(" | ")));
                }
            }
            Block::HorizontalRule => out.push_str("├─ HorizontalRule\n"),
            Block::Blank => out.push_str("├─ Blank\n"),
        }
    }
    out
}

fn inline_spans_to_json(doc: &Document) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = doc
        .blocks
        .iter()
        .enumerate()
        .flat_map(|(index, block)| {
            inline_texts(block)
                .into_iter()
                .map(move |text| json!({ "block": index, "spans": tokenize(text) }))
        })
        .collect();
    json!(entries)
}

fn inline_texts(block: &Block) -> Vec<&str> {
    match block {
        Block::Heading { text, .. }
        | Block::Paragraph { text }
        | Block::ListItem { text, .. }
        | Block::Blockquote { text } => vec![text.as_str()],
        Block::Table { rows, .. } => rows.iter().flatten().map(String::as_str).collect(),
        Block::CodeBlock { .. } | Block::HorizontalRule | Block::Blank => Vec::new(),
    }
}

fn pages_to_text(offsets: &[f64]) -> String {
    let mut out = format!("{} page(s)\n", offsets.len());
    for (index, offset) in offsets.iter().enumerate() {
        out.push_str(&format!("page {}: offset {offset:.2}\n", index + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, transform: &str) -> String {
        execute_transform(source, transform, &HashMap::new()).unwrap()
    }

    #[test]
    fn model_json_tags_block_kinds() {
        let output = run("# Title\n\nBody\n", "model-json");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["blocks"][0]["kind"], "heading");
        assert_eq!(value["blocks"][0]["level"], 1);
        assert_eq!(value["blocks"][1]["kind"], "paragraph");
    }

    #[test]
    fn model_debug_lists_blocks() {
        let output = run("- a\n- b\n\n---\n", "model-debug");
        assert!(output.starts_with("Document (3 blocks)"));
        assert!(output.contains("ListItem[bullet, group"));
        assert!(output.contains("HorizontalRule"));
    }

    #[test]
    fn inline_json_tokenizes_table_cells() {
        let output = run("| **a** | b |\n", "inline-json");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["block"], 0);
        assert_eq!(value[0]["spans"][0]["kind"], "bold");
        assert_eq!(value[1]["spans"][0]["kind"], "plain");
    }

    #[test]
    fn pages_reports_a_single_page_for_empty_input() {
        assert_eq!(run("", "pages"), "1 page(s)\npage 1: offset 0.00\n");
    }

    #[test]
    fn pages_rejects_bad_font_size() {
        let mut params = HashMap::new();
        params.insert("base-font-size".to_string(), "huge".to_string());
        assert!(execute_transform("text", "pages", &params).is_err());
    }

    #[test]
    fn unknown_transform_is_an_error() {
        let err = execute_transform("", "ast-tag", &HashMap::new()).unwrap_err();
        assert_eq!(err, "Unknown transform: ast-tag");
    }
}
