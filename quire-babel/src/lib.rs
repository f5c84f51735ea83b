//! Markdown document pipeline
//!
//!     This crate turns Markdown text into a format-agnostic document model and renders that
//!     model to HTML, DOCX, RTF and paginated PDF.
//!
//!     It is a pure lib: it powers the quire CLI but is shell agnostic. No code here prints,
//!     reads environment configuration or chooses output paths, with one exception: the
//!     system DOCX archiver looks up its `zip` binary (see formats/docx/package.rs).
//!
//! Architecture
//!
//!     raw text → Markdown parser → Document model → {HTML, DOCX, PDF}
//!                                                     HTML → RTF
//!
//!     The model (./model) is plain data. Inline markers stay unparsed in the model and are
//!     tokenized lazily by each serializer (./inline.rs), so the model carries no
//!     serializer-specific decisions. Each parse builds a fresh, owned value and every
//!     serializer keeps its bookkeeping (hyperlink ids, numbering ids, list counters) local
//!     to the call, which makes all of them re-entrant.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError and ExportFailure
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # Export boundary: serialize + write
//!     ├── pagination.rs           # Page slicing for PDF output
//!     ├── inline.rs               # Inline span tokenizer
//!     ├── model                   # Document model
//!     ├── formats
//!     │   ├── markdown            # The parser (input only)
//!     │   ├── html
//!     │   ├── docx
//!     │   ├── rtf                 # HTML → RTF via html5ever
//!     │   ├── pdf                 # layout + lopdf writer
//!     │   └── common              # Escaping and option helpers
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Limits
//!
//!     Parsing is total: any input produces a document. Nested inline styles, nested block
//!     quotes and list nesting past three levels are not supported; they degrade to plain
//!     text, single quotes and level 2 respectively.

pub mod error;
pub mod format;
pub mod formats;
pub mod inline;
pub mod model;
pub mod pagination;
pub mod publish;
pub mod registry;

pub use error::{ExportFailure, FormatError};
pub use format::{Format, SerializedDocument};
pub use inline::{tokenize, InlineSpan};
pub use model::{Block, Document};
pub use pagination::paginate;
pub use publish::{export_source, publish, PublishArtifact, PublishResult, PublishSpec};
pub use registry::FormatRegistry;

/// Parse Markdown into a document. Never fails.
pub fn parse(markdown: &str) -> Document {
    formats::markdown::parse_markdown(markdown)
}

/// Render a document to HTML, optionally embedding the stylesheet.
pub fn to_html(doc: &Document, include_styles: bool) -> Result<String, FormatError> {
    formats::html::to_html(doc, include_styles)
}

/// Build a DOCX package with the in-process archiver.
pub fn to_docx_package(doc: &Document, title: &str) -> Result<Vec<u8>, FormatError> {
    formats::docx::to_docx_package(doc, title)
}
