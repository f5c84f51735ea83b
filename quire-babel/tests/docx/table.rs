use super::{export_parts, part_map};

fn document_xml(markdown: &str) -> String {
    part_map(export_parts(markdown)).remove("word/document.xml").unwrap()
}

#[test]
fn header_table_is_striped() {
    let xml = document_xml("| h | i |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n| 5 | 6 |\n");
    assert!(xml.contains("<w:tblHeader/>"));
    assert_eq!(xml.matches(r#"w:fill="F2D7E0""#).count(), 2);
    assert_eq!(xml.matches(r#"w:fill="F7F7F7""#).count(), 2);
}

#[test]
fn table_without_header_is_not_striped() {
    let xml = document_xml("| 1 | 2 |\n| 3 | 4 |\n| 5 | 6 |\n");
    assert!(!xml.contains("<w:tblHeader/>"));
    assert!(!xml.contains("F2D7E0"));
    assert!(!xml.contains("F7F7F7"));
}

#[test]
fn column_widths_divide_content_width() {
    let xml = document_xml("| a | b | c |\n");
    assert!(xml.contains(r#"<w:tblW w:w="9360" w:type="dxa"/>"#));
    assert_eq!(xml.matches(r#"<w:gridCol w:w="3120"/>"#).count(), 3);
}
