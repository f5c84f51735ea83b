//! Fixed package parts: content types, styles, settings, header and footer.

use super::ACCENT_COLOR;
use crate::formats::common::escape_xml;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const WML_CT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";

pub fn render_content_types() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="{ct}.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="{ct}.styles+xml"/>"#,
            r#"<Override PartName="/word/numbering.xml" ContentType="{ct}.numbering+xml"/>"#,
            r#"<Override PartName="/word/settings.xml" ContentType="{ct}.settings+xml"/>"#,
            r#"<Override PartName="/word/header1.xml" ContentType="{ct}.header+xml"/>"#,
            r#"<Override PartName="/word/footer1.xml" ContentType="{ct}.footer+xml"/>"#,
            "</Types>"
        ),
        ct = WML_CT
    )
}

pub fn render_styles() -> String {
    let mut xml = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:styles xmlns:w="{ns}">"#,
            "<w:docDefaults><w:rPrDefault><w:rPr>",
            r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#,
            r#"<w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/>"#,
            "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
            r#"<w:spacing w:after="160" w:line="276" w:lineRule="auto"/>"#,
            "</w:pPr></w:pPrDefault></w:docDefaults>",
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#
        ),
        ns = W_NS
    );

    for (level, size) in [(1, 40), (2, 32), (3, 28), (4, 24)] {
        xml.push_str(&format!(
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{level}">"#,
                r#"<w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:color w:val="{accent}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#,
                "</w:style>"
            ),
            level = level,
            outline = level - 1,
            accent = ACCENT_COLOR,
            size = size
        ));
    }

    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:styleId="ListParagraph">"#,
        r#"<w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/>"#,
        r#"<w:pPr><w:spacing w:after="60"/><w:contextualSpacing/></w:pPr></w:style>"#,
        r#"<w:style w:type="character" w:styleId="Hyperlink">"#,
        r#"<w:name w:val="Hyperlink"/><w:rPr><w:color w:val="0563C1"/><w:u w:val="single"/></w:rPr></w:style>"#,
        "</w:styles>"
    ));
    xml
}

pub fn render_settings() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:settings xmlns:w="{}">"#,
            r#"<w:defaultTabStop w:val="720"/><w:characterSpacingControl w:val="doNotCompress"/><w:compat/>"#,
            "</w:settings>"
        ),
        W_NS
    )
}

/// Header with the document title, right-aligned.
pub fn render_header(title: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:hdr xmlns:w="{ns}"><w:p><w:pPr><w:jc w:val="right"/></w:pPr>"#,
            r#"<w:r><w:rPr><w:color w:val="808080"/><w:sz w:val="18"/></w:rPr><w:t xml:space="preserve">{title}</w:t></w:r>"#,
            "</w:p></w:hdr>"
        ),
        ns = W_NS,
        title = escape_xml(title)
    )
}

/// Footer with a centered PAGE field.
pub fn render_footer() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:ftr xmlns:w="{}"><w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#,
            r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#,
            r#"<w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r>"#,
            r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#,
            "<w:r><w:t>1</w:t></w:r>",
            r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#,
            "</w:p></w:ftr>"
        ),
        W_NS
    )
}
