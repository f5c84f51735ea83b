//! `word/numbering.xml`: one bullet definition shared by all bullet lists and
//! one decimal instance per ordered list run, each restarting at 1.

use super::body::BULLET_NUM_ID;
use std::fmt::Write as _;

const BULLET_ABSTRACT_ID: u32 = 0;
const DECIMAL_ABSTRACT_ID: u32 = 1;
const LEVELS: u32 = 3;
const BULLET_GLYPHS: [&str; 3] = ["\u{2022}", "\u{25E6}", "\u{25AA}"];

pub fn render_numbering(numbered_list_group_count: u32) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#
    ));

    let _ = write!(
        xml,
        "<w:abstractNum w:abstractNumId=\"{BULLET_ABSTRACT_ID}\"><w:multiLevelType w:val=\"hybridMultilevel\"/>"
    );
    for level in 0..LEVELS {
        let _ = write!(
            xml,
            "<w:lvl w:ilvl=\"{level}\"><w:start w:val=\"1\"/><w:numFmt w:val=\"bullet\"/><w:lvlText w:val=\"{}\"/><w:lvlJc w:val=\"left\"/>{}</w:lvl>",
            BULLET_GLYPHS[level as usize],
            indent(level)
        );
    }
    xml.push_str("</w:abstractNum>");

    let _ = write!(
        xml,
        "<w:abstractNum w:abstractNumId=\"{DECIMAL_ABSTRACT_ID}\"><w:multiLevelType w:val=\"hybridMultilevel\"/>"
    );
    for level in 0..LEVELS {
        let _ = write!(
            xml,
            "<w:lvl w:ilvl=\"{level}\"><w:start w:val=\"1\"/><w:numFmt w:val=\"decimal\"/><w:lvlText w:val=\"%{}.\"/><w:lvlJc w:val=\"left\"/>{}</w:lvl>",
            level + 1,
            indent(level)
        );
    }
    xml.push_str("</w:abstractNum>");

    let _ = write!(
        xml,
        "<w:num w:numId=\"{BULLET_NUM_ID}\"><w:abstractNumId w:val=\"{BULLET_ABSTRACT_ID}\"/></w:num>"
    );
    for group in 0..numbered_list_group_count {
        let num_id = BULLET_NUM_ID + 1 + group;
        let _ = write!(
            xml,
            "<w:num w:numId=\"{num_id}\"><w:abstractNumId w:val=\"{DECIMAL_ABSTRACT_ID}\"/>"
        );
        for level in 0..LEVELS {
            let _ = write!(
                xml,
                "<w:lvlOverride w:ilvl=\"{level}\"><w:startOverride w:val=\"1\"/></w:lvlOverride>"
            );
        }
        xml.push_str("</w:num>");
    }

    xml.push_str("</w:numbering>");
    xml
}

fn indent(level: u32) -> String {
    format!(
        "<w:pPr><w:ind w:left=\"{}\" w:hanging=\"360\"/></w:pPr>",
        720 * (level + 1)
    )
}
