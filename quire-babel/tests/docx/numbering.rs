use super::{export_parts, part_map};

#[test]
fn separate_ordered_lists_get_independent_numbering() {
    let parts = part_map(export_parts("1. a\n2. b\n\nBetween\n\n1. c\n2. d\n"));
    let numbering = roxmltree::Document::parse(&parts["word/numbering.xml"]).unwrap();

    let decimal_nums: Vec<roxmltree::Node> = numbering
        .descendants()
        .filter(|node| node.has_tag_name(("http://schemas.openxmlformats.org/wordprocessingml/2006/main", "num")))
        .filter(|node| {
            node.children()
                .any(|child| child.tag_name().name() == "abstractNumId" && attr(child, "val") == Some("1"))
        })
        .collect();
    assert_eq!(decimal_nums.len(), 2);

    for num in &decimal_nums {
        let starts: Vec<&str> = num
            .descendants()
            .filter(|node| node.tag_name().name() == "startOverride")
            .filter_map(|node| attr(node, "val"))
            .collect();
        assert!(!starts.is_empty());
        assert!(starts.iter().all(|value| *value == "1"));
    }

    let document = &parts["word/document.xml"];
    assert_eq!(document.matches(r#"<w:numId w:val="2"/>"#).count(), 2);
    assert_eq!(document.matches(r#"<w:numId w:val="3"/>"#).count(), 2);
}

#[test]
fn bullets_share_the_bullet_definition() {
    let parts = part_map(export_parts("- a\n\nBreak\n\n- b\n"));
    let document = &parts["word/document.xml"];
    assert_eq!(document.matches(r#"<w:numId w:val="1"/>"#).count(), 2);
    assert_eq!(parts["word/numbering.xml"].matches("<w:num ").count(), 1);
}

#[test]
fn nesting_level_maps_to_ilvl() {
    let parts = part_map(export_parts("- a\n  - b\n    - c\n"));
    let document = &parts["word/document.xml"];
    for level in 0..3 {
        assert!(document.contains(&format!(r#"<w:ilvl w:val="{level}"/>"#)));
    }
}

fn attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attribute| attribute.name() == name)
        .map(|attribute| attribute.value())
}
