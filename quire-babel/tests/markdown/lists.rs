use quire_babel::model::{Block, ListGroupId};
use quire_babel::parse;

fn groups(source: &str) -> Vec<(bool, u8, ListGroupId)> {
    parse(source)
        .blocks
        .into_iter()
        .filter_map(|block| match block {
            Block::ListItem {
                ordered,
                level,
                ordinal_group,
                ..
            } => Some((ordered, level, ordinal_group)),
            _ => None,
        })
        .collect()
}

#[test]
fn ordered_lists_split_by_paragraph_get_distinct_groups() {
    let items = groups("1. a\n2. b\n\nBetween\n\n1. c\n2. d\n");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].2, items[1].2);
    assert_eq!(items[2].2, items[3].2);
    assert_ne!(items[0].2, items[2].2);
}

#[test]
fn blank_line_does_not_split_a_run() {
    let items = groups("1. a\n\n2. b\n");
    assert_eq!(items[0].2, items[1].2);
}

#[test]
fn indentation_maps_to_capped_levels() {
    let items = groups("- a\n  - b\n    - c\n          - d\n");
    let levels: Vec<u8> = items.iter().map(|(_, level, _)| *level).collect();
    assert_eq!(levels, vec![0, 1, 2, 2]);
}

#[test]
fn list_markers() {
    let items = groups("- a\n* b\n+ c\n12. d\n");
    let kinds: Vec<bool> = items.iter().map(|(ordered, _, _)| *ordered).collect();
    assert_eq!(kinds, vec![false, false, false, true]);
}

#[test]
fn item_text_excludes_marker() {
    let doc = parse("7. Foo\n3. Jump\n");
    let texts: Vec<&str> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::ListItem { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["Foo", "Jump"]);
}
