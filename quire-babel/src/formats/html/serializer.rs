//! HTML serialization (document model → HTML export)
//!
//! Pipeline: Document → RcDom (HTML DOM tree) → HTML string → complete page.
//!
//! Blocks become DOM nodes in document order, one fixed tag shape per
//! variant. Contiguous list items are folded into nested `<ul>`/`<ol>` trees.
//! html5ever serializes the tree; text nodes additionally get `"` and `'`
//! escaped so every HTML-significant character leaves as an entity.

use crate::error::FormatError;
use crate::formats::common::escape_html;
use crate::inline::{tokenize, InlineSpan};
use crate::model::{Block, Document, ListGroupId};
use html5ever::serialize::{
    AttrRef, HtmlSerializer, Serialize, SerializeOpts, Serializer, TraversalScope,
};
use html5ever::{ns, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

const BASELINE_CSS: &str = include_str!("../../../css/quire.css");

/// Title used when neither an explicit title nor a heading is available.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Embed the stylesheet in a `<style>` block in the head
    pub include_styles: bool,
    /// Explicit document title; falls back to the first heading
    pub title: Option<String>,
    /// Optional custom CSS appended after the built-in stylesheet
    pub custom_css: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            include_styles: true,
            title: None,
            custom_css: None,
        }
    }
}

impl HtmlOptions {
    pub fn new(include_styles: bool) -> Self {
        Self {
            include_styles,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// The embedded stylesheet.
pub fn default_css() -> &'static str {
    BASELINE_CSS
}

/// Serialize a document to a standalone HTML page.
pub fn to_html(doc: &Document, include_styles: bool) -> Result<String, FormatError> {
    serialize_to_html_with_options(doc, &HtmlOptions::new(include_styles))
}

/// Serialize a document to HTML with full options
pub fn serialize_to_html_with_options(
    doc: &Document,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let title = options
        .title
        .clone()
        .or_else(|| doc.first_heading())
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let body = render_body(doc)?;
    Ok(wrap_in_document(&body, &title, options))
}

/// Render only the body markup, without the surrounding document.
pub fn render_body(doc: &Document) -> Result<String, FormatError> {
    let dom = build_html_dom(doc);
    let container = dom.document.children.borrow().first().cloned();
    match container {
        Some(container) => serialize_children(&container),
        None => Ok(String::new()),
    }
}

/// Render an inline run to escaped HTML.
pub fn render_inline(run: &str) -> Result<String, FormatError> {
    let container = create_element("span", vec![]);
    add_inline_to_node(&container, run);
    serialize_children(&container)
}

/// Build an HTML DOM tree holding the body content in one container element.
fn build_html_dom(doc: &Document) -> RcDom {
    let dom = RcDom::default();
    let mut builder = DomBuilder {
        container: create_element("div", vec![]),
        lists: Vec::new(),
    };
    for block in &doc.blocks {
        builder.block(block);
    }
    dom.document.children.borrow_mut().push(builder.container);
    dom
}

fn add_inline_to_node(parent: &Handle, run: &str) {
    for span in tokenize(run) {
        match span {
            InlineSpan::Plain { text } => append(parent, create_text(&text)),
            InlineSpan::Bold { text } => append(parent, wrap_text("strong", vec![], &text)),
            InlineSpan::Italic { text } => append(parent, wrap_text("em", vec![], &text)),
            InlineSpan::Code { text } => append(parent, wrap_text("code", vec![], &text)),
            InlineSpan::Link { text, url } => {
                append(parent, wrap_text("a", vec![("href", url.as_str())], &text))
            }
        }
    }
}

struct OpenList {
    ordered: bool,
    level: u8,
    group: ListGroupId,
    list: Handle,
    /// The list's last `<li>`, where deeper lists nest.
    item: Handle,
}

struct DomBuilder {
    container: Handle,
    lists: Vec<OpenList>,
}

impl DomBuilder {
    /// Append a block element to the container, one per line.
    fn push_block(&self, node: Handle) {
        append(&self.container, node);
        append(&self.container, create_text("\n"));
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::ListItem {
                text,
                ordered,
                level,
                ordinal_group,
            } => {
                self.list_item(text, *ordered, *level, *ordinal_group);
                return;
            }
            Block::Blank => return,
            _ => self.lists.clear(),
        }

        match block {
            Block::Heading { level, text } => {
                let tag = format!("h{}", (*level).clamp(1, 4));
                let heading = create_element(&tag, vec![]);
                add_inline_to_node(&heading, text);
                self.push_block(heading);
            }
            Block::Paragraph { text } => self.push_block(paragraph(text)),
            Block::Blockquote { text } => {
                let quote = create_element("blockquote", vec![]);
                append(&quote, paragraph(text));
                self.push_block(quote);
            }
            Block::CodeBlock { lines, language } => {
                let class = language.as_ref().map(|lang| format!("language-{lang}"));
                let attrs = match &class {
                    Some(class) => vec![("class", class.as_str())],
                    None => vec![],
                };
                let pre = create_element("pre", vec![]);
                append(&pre, wrap_text("code", attrs, &lines.join("\n")));
                self.push_block(pre);
            }
            Block::Table {
                rows,
                header_row_present,
            } => {
                if !rows.is_empty() {
                    self.push_block(table(rows, *header_row_present));
                }
            }
            Block::HorizontalRule => self.push_block(create_element("hr", vec![])),
            Block::ListItem { .. } | Block::Blank => {}
        }
    }

    fn list_item(&mut self, text: &str, ordered: bool, level: u8, group: ListGroupId) {
        while let Some(top) = self.lists.last() {
            let deeper = top.level > level;
            let other_run =
                top.level == level && (top.ordered != ordered || top.group != group);
            if deeper || other_run {
                self.lists.pop();
            } else {
                break;
            }
        }

        let item = create_element("li", vec![]);
        add_inline_to_node(&item, text);

        if let Some(top) = self.lists.last_mut().filter(|top| top.level == level) {
            append(&top.list, item.clone());
            append(&top.list, create_text("\n"));
            top.item = item;
            return;
        }

        let list = create_element(if ordered { "ol" } else { "ul" }, vec![]);
        append(&list, create_text("\n"));
        append(&list, item.clone());
        append(&list, create_text("\n"));
        match self.lists.last() {
            Some(parent) => {
                append(&parent.item, list.clone());
                append(&parent.item, create_text("\n"));
            }
            None => self.push_block(list.clone()),
        }
        self.lists.push(OpenList {
            ordered,
            level,
            group,
            list,
            item,
        });
    }
}

fn paragraph(text: &str) -> Handle {
    let p = create_element("p", vec![]);
    add_inline_to_node(&p, text);
    p
}

fn table(rows: &[Vec<String>], header_row_present: bool) -> Handle {
    let attrs = if header_row_present {
        vec![("class", "quire-striped")]
    } else {
        vec![]
    };
    let table = create_element("table", attrs);
    append(&table, create_text("\n"));

    let mut body_rows = rows;
    if header_row_present {
        if let Some((header, rest)) = rows.split_first() {
            append(&table, section("thead", std::slice::from_ref(header), "th"));
            append(&table, create_text("\n"));
            body_rows = rest;
        }
    }
    append(&table, section("tbody", body_rows, "td"));
    append(&table, create_text("\n"));
    table
}

fn section(tag: &str, rows: &[Vec<String>], cell_tag: &str) -> Handle {
    let section = create_element(tag, vec![]);
    append(&section, create_text("\n"));
    for row in rows {
        let tr = create_element("tr", vec![]);
        for cell in row {
            let td = create_element(cell_tag, vec![]);
            add_inline_to_node(&td, cell);
            append(&tr, td);
        }
        append(&section, tr);
        append(&section, create_text("\n"));
    }
    section
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

fn wrap_text(tag: &str, attrs: Vec<(&str, &str)>, text: &str) -> Handle {
    let element = create_element(tag, attrs);
    append(&element, create_text(text));
    element
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of `parent`, leaving out the parent's own tags.
fn serialize_children(parent: &Handle) -> Result<String, FormatError> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let mut serializer = EntitySerializer {
        inner: HtmlSerializer::new(Vec::new(), opts),
    };
    for child in parent.children.borrow().iter() {
        SerializableHandle::from(child.clone())
            .serialize(&mut serializer, TraversalScope::IncludeNode)
            .map_err(|e| FormatError::EncodingFailure(format!("HTML serialization failed: {e}")))?;
    }
    String::from_utf8(serializer.inner.writer)
        .map_err(|e| FormatError::EncodingFailure(format!("UTF-8 conversion failed: {e}")))
}

/// html5ever's serializer, with `"` and `'` in text nodes written as entities.
struct EntitySerializer<W: Write> {
    inner: HtmlSerializer<W>,
}

impl<W: Write> Serializer for EntitySerializer<W> {
    fn start_elem<'a, AttrIter>(&mut self, name: QualName, attrs: AttrIter) -> io::Result<()>
    where
        AttrIter: Iterator<Item = AttrRef<'a>>,
    {
        self.inner.start_elem(name, attrs)
    }

    fn end_elem(&mut self, name: QualName) -> io::Result<()> {
        self.inner.end_elem(name)
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut rest = text;
        while let Some(index) = rest.find(['"', '\'']) {
            self.inner.write_text(&rest[..index])?;
            let entity: &[u8] = if rest.as_bytes()[index] == b'"' {
                b"&quot;"
            } else {
                b"&#39;"
            };
            self.inner.writer.write_all(entity)?;
            rest = &rest[index + 1..];
        }
        self.inner.write_text(rest)
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_comment(text)
    }

    fn write_doctype(&mut self, name: &str) -> io::Result<()> {
        self.inner.write_doctype(name)
    }

    fn write_processing_instruction(&mut self, target: &str, data: &str) -> io::Result<()> {
        self.inner.write_processing_instruction(target, data)
    }
}

/// Wrap the body in a complete HTML document, embedding CSS when requested
fn wrap_in_document(body_html: &str, title: &str, options: &HtmlOptions) -> String {
    let escaped_title = escape_html(title);
    let style_block = if options.include_styles {
        let custom_css = options.custom_css.as_deref().unwrap_or("");
        format!("<style>\n{BASELINE_CSS}\n{custom_css}\n</style>\n")
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta name="generator" content="quire">
<title>{escaped_title}</title>
{style_block}</head>
<body>
{body_html}</body>
</html>
"#
    )
}

/// Read the custom CSS file named by the `css-path` option.
pub(crate) fn read_custom_css(path: &str) -> Result<String, FormatError> {
    std::fs::read_to_string(path)
        .map_err(|e| FormatError::file_system(format!("reading stylesheet '{path}'"), e))
}
