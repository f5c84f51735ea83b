//! Format implementations
//!
//! Markdown is the input format; everything else is an export target that
//! serializes the document model.

pub mod common;
pub mod docx;
pub mod html;
pub mod markdown;
pub mod pdf;
pub mod rtf;

pub use docx::{Archiver, DocxFormat};
pub use html::{default_css, HtmlFormat, HtmlOptions};
pub use pdf::PdfFormat;
pub use rtf::RtfFormat;
