use quire_babel::model::Block;
use quire_babel::parse;

#[test]
fn separator_row_marks_header() {
    let doc = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");

    assert_eq!(
        doc.blocks,
        vec![Block::Table {
            rows: vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ],
            header_row_present: true,
        }]
    );
}

#[test]
fn table_without_separator_has_no_header() {
    let doc = parse("| a | b |\n| 1 | 2 |\n");
    match &doc.blocks[0] {
        Block::Table {
            header_row_present, ..
        } => assert!(!header_row_present),
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn ragged_rows_are_padded() {
    let doc = parse("| a | b | c |\n|:--|:-:|--:|\n| 1 |\n| 1 | 2 |\n");
    match &doc.blocks[0] {
        Block::Table { rows, .. } => {
            assert!(rows.iter().all(|row| row.len() == 3));
            assert_eq!(rows[1], vec!["1".to_string(), String::new(), String::new()]);
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn parsing_resumes_after_table() {
    let doc = parse("| a |\n| b |\nAfter\n");
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(
        doc.blocks[1],
        Block::Paragraph {
            text: "After".to_string()
        }
    );
}
