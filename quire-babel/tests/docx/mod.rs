//! DOCX package tests
//!
//! Packages are reopened with `zip` and every part is checked with roxmltree.

mod numbering;
mod package;
mod table;

use quire_babel::{parse, to_docx_package};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

/// Export `markdown` and return every archive entry by name, in archive order.
pub(crate) fn export_parts(markdown: &str) -> Vec<(String, String)> {
    let bytes = to_docx_package(&parse(markdown), "Test").expect("docx export");
    read_parts(&bytes)
}

pub(crate) fn read_parts(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len())
        .map(|index| {
            let mut file = archive.by_index(index).expect("entry");
            let mut content = String::new();
            file.read_to_string(&mut content).expect("utf-8 part");
            (file.name().to_string(), content)
        })
        .collect()
}

pub(crate) fn part_map(parts: Vec<(String, String)>) -> BTreeMap<String, String> {
    parts.into_iter().collect()
}
