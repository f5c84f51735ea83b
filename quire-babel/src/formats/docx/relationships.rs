//! Relationship parts: `_rels/.rels` and `word/_rels/document.xml.rels`.

use super::body::HyperlinkRel;
use super::{FOOTER_REL_ID, HEADER_REL_ID, NUMBERING_REL_ID, SETTINGS_REL_ID, STYLES_REL_ID};
use crate::formats::common::escape_xml;
use std::fmt::Write as _;

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub fn render_package_rels() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="{base}/officeDocument" Target="word/document.xml"/>"#,
            "</Relationships>"
        ),
        ns = REL_NS,
        base = REL_TYPE_BASE
    )
}

/// Fixed part relationships followed by one entry per collected hyperlink.
pub fn render_document_rels(hyperlinks: &[HyperlinkRel]) -> String {
    let mut xml = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Relationships xmlns="{}">"#
        ),
        REL_NS
    );
    for (id, kind, target) in [
        (NUMBERING_REL_ID, "numbering", "numbering.xml"),
        (STYLES_REL_ID, "styles", "styles.xml"),
        (SETTINGS_REL_ID, "settings", "settings.xml"),
        (HEADER_REL_ID, "header", "header1.xml"),
        (FOOTER_REL_ID, "footer", "footer1.xml"),
    ] {
        let _ = write!(
            xml,
            r#"<Relationship Id="{id}" Type="{REL_TYPE_BASE}/{kind}" Target="{target}"/>"#
        );
    }
    for link in hyperlinks {
        let _ = write!(
            xml,
            r#"<Relationship Id="{}" Type="{REL_TYPE_BASE}/hyperlink" Target="{}" TargetMode="External"/>"#,
            link.id,
            escape_xml(&link.target)
        );
    }
    xml.push_str("</Relationships>");
    xml
}
