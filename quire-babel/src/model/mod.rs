//! Document model shared by the parser and every serializer.
//!
//! The model is a flat, ordered sequence of blocks. Inline markup is kept as
//! raw text ([`InlineRun`]) and tokenized lazily by each consumer through
//! [`crate::inline::tokenize`], so HTML and DOCX can apply their own escaping
//! to the same span contract.

pub mod nodes;

pub use nodes::{Block, Document, InlineRun, ListGroupId, Row};
