use super::{export_parts, part_map, read_parts};
use once_cell::sync::Lazy;
use quire_babel::formats::docx::{to_docx_package_with, Archiver};
use quire_babel::parse;
use regex::Regex;
use std::collections::BTreeSet;

static REL_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r#"r:id="(rId\d+)""#).unwrap());
static REL_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"Id="(rId\d+)""#).unwrap());

const KITCHEN_SINK: &str = "# Title & <Co>\n\nSee [one](https://a.example/?x=1&y=2) and [two](https://b.example).\n\n- bullet\n  - nested\n\n1. first\n2. second\n\n> quote\n\n```\ncode <here>\n```\n\n---\n\n| h1 | h2 |\n|----|----|\n| a | b |\n| c | d |\n";

#[test]
fn parts_follow_fixed_layout() {
    let names: Vec<String> = export_parts("").into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "word/settings.xml",
            "word/header1.xml",
            "word/footer1.xml",
            "word/_rels/document.xml.rels",
        ]
    );
}

#[test]
fn every_part_is_well_formed_xml() {
    for markdown in ["", KITCHEN_SINK] {
        for (name, content) in export_parts(markdown) {
            if let Err(err) = roxmltree::Document::parse(&content) {
                panic!("{name} is not well-formed: {err}");
            }
        }
    }
}

#[test]
fn empty_document_has_one_empty_paragraph() {
    let parts = part_map(export_parts(""));
    let document = &parts["word/document.xml"];
    assert!(document.contains("<w:body><w:p/><w:sectPr>"));
}

#[test]
fn every_body_reference_is_declared() {
    let parts = part_map(export_parts(KITCHEN_SINK));
    let declared: BTreeSet<&str> = REL_DECL
        .captures_iter(&parts["word/_rels/document.xml.rels"])
        .map(|caps| caps.get(1).unwrap().as_str())
        .collect();
    let referenced: BTreeSet<&str> = REL_REF
        .captures_iter(&parts["word/document.xml"])
        .map(|caps| caps.get(1).unwrap().as_str())
        .collect();

    assert!(referenced.contains("rId6"));
    assert!(referenced.contains("rId7"));
    assert!(referenced.is_subset(&declared));
}

#[test]
fn hyperlink_targets_are_external_and_escaped() {
    let parts = part_map(export_parts(KITCHEN_SINK));
    let rels = roxmltree::Document::parse(&parts["word/_rels/document.xml.rels"]).unwrap();
    let hyperlinks: Vec<(&str, &str)> = rels
        .descendants()
        .filter(|node| node.attribute("TargetMode") == Some("External"))
        .map(|node| {
            (
                node.attribute("Id").unwrap(),
                node.attribute("Target").unwrap(),
            )
        })
        .collect();
    assert_eq!(
        hyperlinks,
        vec![
            ("rId6", "https://a.example/?x=1&y=2"),
            ("rId7", "https://b.example")
        ]
    );
}

#[test]
fn header_carries_title_and_footer_a_page_field() {
    let bytes = quire_babel::to_docx_package(&parse("x"), "Q&A").unwrap();
    let parts = part_map(read_parts(&bytes));
    assert!(parts["word/header1.xml"].contains("Q&amp;A"));
    assert!(parts["word/footer1.xml"].contains("PAGE"));
}

#[test]
fn page_setup_is_us_letter_with_inch_margins() {
    let parts = part_map(export_parts("x"));
    let document = &parts["word/document.xml"];
    assert!(document.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
    assert!(document.contains(r#"w:top="1440""#));
    assert!(document.contains(r#"w:left="1440""#));
}

#[cfg(all(unix, feature = "native-export"))]
mod system_archiver {
    use super::*;
    use quire_babel::formats::docx::ZIP_BIN_ENV;
    use quire_babel::FormatError;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn failing_zip_is_an_archive_failure() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("zip");
        fs::write(&script, "#!/bin/sh\nexit 3\n").unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();

        std::env::set_var(ZIP_BIN_ENV, &script);
        let result = to_docx_package_with(&parse("x"), "T", Archiver::System);
        std::env::remove_var(ZIP_BIN_ENV);

        match result {
            Err(FormatError::ArchiveFailure(reason)) => assert!(reason.contains("status 3")),
            other => panic!("expected archive failure, got {other:?}"),
        }
    }
}
