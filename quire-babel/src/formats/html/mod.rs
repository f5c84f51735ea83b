//! HTML format implementation
//!
//! Export only: the document model is rendered to a single self-contained
//! HTML5 page. The same output feeds the RTF converter, so it must stay valid
//! input for a standard HTML parser.
//!
//! # Element Mapping Table
//!
//! | Block            | HTML                                          | Notes                                    |
//! |------------------|-----------------------------------------------|------------------------------------------|
//! | Heading          | `<h1>`..`<h4>`                                |                                          |
//! | Paragraph        | `<p>`                                         |                                          |
//! | ListItem         | `<ul>`/`<ol>` + `<li>`                        | Contiguous items nest by level           |
//! | CodeBlock        | `<pre><code class="language-X">`              | Lines joined with `\n`, escaped verbatim |
//! | Blockquote       | `<blockquote><p>`                             | One element per source line              |
//! | Table            | `<table>` + optional `<thead>`, `<tbody>`     | `<thead>` only with a separator row      |
//! | HorizontalRule   | `<hr>`                                        |                                          |
//! | Blank            | nothing                                       |                                          |
//! | Inline spans:    |                                               |                                          |
//! |   Bold           | `<strong>`                                    |                                          |
//! |   Italic         | `<em>`                                        |                                          |
//! |   Code           | `<code>`                                      |                                          |
//! |   Link           | `<a href="url">`                              | `&` and `"` escaped in the URL           |
//!
//! # CSS
//!
//! With styles enabled, `css/quire.css` is embedded in a `<style>` block in
//! the head. Structure never depends on it: `include_styles = false` still
//! yields a complete, well-formed page.
//!
//! # Options
//!
//! - `include-styles` (bool, default `true`)
//! - `title` (string)
//! - `css-path` (path to extra CSS appended after the built-in sheet)

mod serializer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{parse_bool_option, reject_unknown_options, string_option};
use crate::model::Document;
use std::collections::HashMap;

pub use serializer::{
    default_css, render_body, render_inline, serialize_to_html_with_options, to_html,
    HtmlOptions, DEFAULT_TITLE,
};

const OPTION_KEYS: &[&str] = &["include-styles", "title", "css-path"];

/// Format implementation for HTML
pub struct HtmlFormat {
    include_styles: bool,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HtmlFormat {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    /// Resolve string options into [`HtmlOptions`].
    pub fn options_from_map(
        &self,
        options: &HashMap<String, String>,
    ) -> Result<HtmlOptions, FormatError> {
        reject_unknown_options(self.name(), options, OPTION_KEYS)?;
        let include_styles = parse_bool_option(options, "include-styles", self.include_styles)?;
        let mut html_options = HtmlOptions::new(include_styles);
        if let Some(title) = string_option(options, "title") {
            html_options = html_options.with_title(title);
        }
        if let Some(path) = string_option(options, "css-path") {
            html_options = html_options.with_custom_css(serializer::read_custom_css(path)?);
        }
        Ok(html_options)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 page with optional embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_html(doc, self.include_styles)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let html_options = self.options_from_map(options)?;
        serialize_to_html_with_options(doc, &html_options).map(SerializedDocument::Text)
    }
}
