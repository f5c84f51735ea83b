//! Inline span tokenizer.
//!
//! Turns a raw [`InlineRun`](crate::model::InlineRun) into an ordered,
//! gap-free sequence of [`InlineSpan`]s. One combined pattern is scanned left
//! to right; at any position the first alternative that matches wins, in the
//! order link, bold, italic, code. Inner text is never re-tokenized, so
//! `**a *b* c**` yields a single bold span containing the literal `*b*`.
//!
//! Concatenating the span texts reproduces the input minus the marker glyphs
//! (`[`, `](url)`, `**`, `*`, `` ` ``). Unmatched markers stay in `Plain` text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static INLINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)|\*\*([^*]+)\*\*|\*([^*]+)\*|`([^`]+)`")
        .expect("inline pattern compiles")
});

/// A styled fragment of inline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineSpan {
    Plain { text: String },
    Bold { text: String },
    Italic { text: String },
    Code { text: String },
    Link { text: String, url: String },
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan::Plain { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan::Italic { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        InlineSpan::Code { text: text.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineSpan::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    /// The visible text of the span.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain { text }
            | InlineSpan::Bold { text }
            | InlineSpan::Italic { text }
            | InlineSpan::Code { text }
            | InlineSpan::Link { text, .. } => text,
        }
    }
}

/// Tokenize `text` into inline spans.
///
/// Empty input yields no spans.
pub fn tokenize(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in INLINE_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(InlineSpan::plain(&text[cursor..whole.start()]));
        }

        let span = if let (Some(label), Some(url)) = (caps.get(1), caps.get(2)) {
            InlineSpan::link(label.as_str(), url.as_str())
        } else if let Some(inner) = caps.get(3) {
            InlineSpan::bold(inner.as_str())
        } else if let Some(inner) = caps.get(4) {
            InlineSpan::italic(inner.as_str())
        } else if let Some(inner) = caps.get(5) {
            InlineSpan::code(inner.as_str())
        } else {
            InlineSpan::plain(whole.as_str())
        };
        spans.push(span);
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(InlineSpan::plain(&text[cursor..]));
    }

    spans
}

/// The text of `run` with inline markers removed.
pub fn plain_text(run: &str) -> String {
    tokenize(run).iter().map(InlineSpan::text).collect()
}
