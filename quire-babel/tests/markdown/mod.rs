//! Markdown parser and inline tokenizer tests

mod import;
mod inline;
mod lists;
mod table;
