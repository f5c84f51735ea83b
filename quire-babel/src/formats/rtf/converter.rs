//! HTML → RTF conversion
//!
//! Parses HTML with html5ever into an `RcDom` and walks the tree, emitting
//! RTF control words for the element shapes the HTML serializer produces.
//! Unknown elements are descended into and their text kept.

use crate::error::FormatError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::fmt::Write as _;

const CONTENT_WIDTH_TWIPS: usize = 9360;
const LIST_INDENT: usize = 720;

const HEADER: &str = concat!(
    r"{\rtf1\ansi\ansicpg1252\deff0",
    "\n",
    r"{\fonttbl{\f0\fswiss\fcharset0 Helvetica;}{\f1\fmodern\fcharset0 Courier New;}}",
    "\n",
    r"{\colortbl;\red158\green58\blue91;\red5\green99\blue193;\red244\green244\blue244;}",
    "\n"
);

/// Convert an HTML document to RTF.
///
/// Fails with [`FormatError::ConversionFailure`] when the parsed tree has no
/// `<body>` to convert.
pub fn html_to_rtf(html: &str) -> Result<String, FormatError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let body = find_element(&dom.document, "body").ok_or_else(|| {
        FormatError::ConversionFailure("HTML conversion produced no document body".to_string())
    })?;
    let title = find_element(&dom.document, "title").map(|node| text_content(&node));

    let mut out = String::from(HEADER);
    if let Some(title) = title.filter(|title| !title.trim().is_empty()) {
        let _ = writeln!(out, r"{{\info{{\title {}}}}}", escape_rtf(title.trim()));
    }
    out.push_str(r"\paperw12240\paperh15840\margl1440\margr1440\margt1440\margb1440");
    out.push_str("\n\\f0\\fs22\n");

    let mut writer = RtfWriter { out };
    writer.blocks(&body, &Context::default());
    writer.out.push_str("}\n");
    Ok(writer.out)
}

/// Paragraph-level state inherited by nested blocks.
#[derive(Debug, Clone, Default)]
struct Context {
    indent: usize,
    italic: bool,
}

struct RtfWriter {
    out: String,
}

impl RtfWriter {
    fn blocks(&mut self, parent: &Handle, ctx: &Context) {
        for child in parent.children.borrow().iter() {
            self.block(child, ctx);
        }
    }

    fn block(&mut self, node: &Handle, ctx: &Context) {
        let tag = match element_name(node) {
            Some(tag) => tag,
            None => {
                // Stray text directly under a block container.
                let text = text_content(node);
                if !text.trim().is_empty() {
                    self.paragraph(ctx, "\\sa160", |w| w.text(text.trim()));
                }
                return;
            }
        };

        match tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let size = match tag.as_str() {
                    "h1" => 40,
                    "h2" => 32,
                    "h3" => 28,
                    _ => 24,
                };
                let props = format!("\\sb240\\sa120\\keepn\\b\\fs{size}\\cf1");
                self.paragraph(ctx, &props, |w| w.inlines(node));
            }
            "p" => self.paragraph(ctx, "\\sa160", |w| w.inlines(node)),
            "ul" | "ol" => self.list(node, tag == "ol", 0, ctx),
            "pre" => {
                let text = text_content(node);
                self.paragraph(ctx, "\\sa160\\f1\\fs20\\cbpat3", |w| {
                    for (index, line) in text.split('\n').enumerate() {
                        if index > 0 {
                            w.out.push_str("\\line ");
                        }
                        w.out.push_str(&escape_rtf(line));
                    }
                });
            }
            "blockquote" => {
                let inner = Context {
                    indent: ctx.indent + LIST_INDENT,
                    italic: true,
                };
                self.blocks(node, &inner);
            }
            "table" => self.table(node),
            "hr" => self
                .out
                .push_str("{\\pard\\brdrb\\brdrs\\brdrw10\\brsp20 \\par}\n"),
            "head" | "style" | "script" | "title" => {}
            _ => self.blocks(node, ctx),
        }
    }

    fn paragraph(&mut self, ctx: &Context, props: &str, body: impl FnOnce(&mut Self)) {
        self.out.push_str("{\\pard");
        if ctx.indent > 0 {
            let _ = write!(self.out, "\\li{}", ctx.indent);
        }
        if ctx.italic {
            self.out.push_str("\\i");
        }
        self.out.push_str(props);
        self.out.push(' ');
        body(self);
        self.out.push_str("\\par}\n");
    }

    fn list(&mut self, list: &Handle, ordered: bool, depth: usize, ctx: &Context) {
        let mut number = 0;
        for item in list.children.borrow().iter() {
            if element_name(item).as_deref() != Some("li") {
                continue;
            }
            number += 1;
            let marker = if ordered {
                format!("{number}.")
            } else {
                "\\u8226?".to_string()
            };
            let indent = ctx.indent + LIST_INDENT * (depth + 1);

            let (inline_children, nested): (Vec<Handle>, Vec<Handle>) =
                item.children.borrow().iter().cloned().partition(|child| {
                    !matches!(element_name(child).as_deref(), Some("ul") | Some("ol"))
                });

            let _ = write!(
                self.out,
                "{{\\pard\\li{indent}\\fi-360\\sa60{} {marker}\\tab ",
                if ctx.italic { "\\i" } else { "" }
            );
            for child in &inline_children {
                self.inline(child);
            }
            self.out.push_str("\\par}\n");

            for sublist in nested {
                let sub_ordered = element_name(&sublist).as_deref() == Some("ol");
                self.list(&sublist, sub_ordered, depth + 1, ctx);
            }
        }
    }

    fn table(&mut self, table: &Handle) {
        let mut rows = Vec::new();
        collect_elements(table, "tr", &mut rows);
        let columns = rows
            .iter()
            .map(|row| cells(row).len())
            .max()
            .unwrap_or(0)
            .max(1);
        let width = CONTENT_WIDTH_TWIPS / columns;

        for row in &rows {
            self.out.push_str("\\trowd\\trgaph108");
            for column in 0..columns {
                let _ = write!(
                    self.out,
                    "\\clbrdrt\\brdrs\\clbrdrl\\brdrs\\clbrdrb\\brdrs\\clbrdrr\\brdrs\\cellx{}",
                    width * (column + 1)
                );
            }
            self.out.push('\n');
            let row_cells = cells(row);
            for column in 0..columns {
                self.out.push_str("\\pard\\intbl ");
                if let Some(cell) = row_cells.get(column) {
                    let header = element_name(cell).as_deref() == Some("th");
                    if header {
                        self.out.push_str("{\\b ");
                    }
                    self.inlines(cell);
                    if header {
                        self.out.push('}');
                    }
                }
                self.out.push_str("\\cell\n");
            }
            self.out.push_str("\\row\n");
        }
        self.out.push_str("\\pard\\par\n");
    }

    fn inlines(&mut self, parent: &Handle) {
        for child in parent.children.borrow().iter() {
            self.inline(child);
        }
    }

    fn inline(&mut self, node: &Handle) {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow();
                // Newline-only nodes are serializer layout, not content.
                if text.contains('\n') && text.trim().is_empty() {
                    return;
                }
                self.text(&text.replace('\n', " "));
            }
            NodeData::Element { name, attrs, .. } => match &*name.local {
                "strong" | "b" => self.group("\\b", node),
                "em" | "i" => self.group("\\i", node),
                "code" => self.group("\\f1", node),
                "a" => {
                    let href = attrs
                        .borrow()
                        .iter()
                        .find(|attr| &*attr.name.local == "href")
                        .map(|attr| attr.value.to_string())
                        .unwrap_or_default();
                    let _ = write!(
                        self.out,
                        "{{\\field{{\\*\\fldinst{{HYPERLINK \"{}\"}}}}{{\\fldrslt{{\\ul\\cf2 ",
                        escape_rtf(&href).replace('"', "\\'22")
                    );
                    self.inlines(node);
                    self.out.push_str("}}}");
                }
                "br" => self.out.push_str("\\line "),
                _ => self.inlines(node),
            },
            _ => {}
        }
    }

    fn group(&mut self, control: &str, node: &Handle) {
        let _ = write!(self.out, "{{{control} ");
        self.inlines(node);
        self.out.push('}');
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(&escape_rtf(text));
    }
}

/// Escape text for an RTF document body. Non-ASCII characters become
/// `\uN?` with N the signed 16-bit UTF-16 code unit.
pub fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\t' => out.push_str("\\tab "),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_ascii() => {}
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{}?", *unit as i16);
                }
            }
        }
    }
    out
}

fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if element_name(node).as_deref() == Some(tag) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn collect_elements(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if element_name(child).as_deref() == Some(tag) {
            found.push(child.clone());
        } else {
            collect_elements(child, tag, found);
        }
    }
}

fn cells(row: &Handle) -> Vec<Handle> {
    row.children
        .borrow()
        .iter()
        .filter(|child| matches!(element_name(child).as_deref(), Some("td") | Some("th")))
        .cloned()
        .collect()
}

fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

fn push_text(node: &Handle, text: &mut String) {
    match &node.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                push_text(child, text);
            }
        }
    }
}
