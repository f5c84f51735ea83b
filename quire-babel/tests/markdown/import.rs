use quire_babel::model::Block;
use quire_babel::parse;

#[test]
fn unterminated_fence_keeps_remaining_lines() {
    let doc = parse("Intro\n\n```python\nprint('a')\n\n# not a heading\n");

    assert_eq!(doc.blocks.len(), 2);
    match &doc.blocks[1] {
        Block::CodeBlock { lines, language } => {
            assert_eq!(language.as_deref(), Some("python"));
            assert_eq!(
                lines,
                &vec![
                    "print('a')".to_string(),
                    String::new(),
                    "# not a heading".to_string()
                ]
            );
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn headings_past_level_four_are_paragraphs() {
    let doc = parse("#### Four\n##### Five\n#Nospace\n");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading {
                level: 4,
                text: "Four".to_string()
            },
            Block::Paragraph {
                text: "##### Five".to_string()
            },
            Block::Paragraph {
                text: "#Nospace".to_string()
            },
        ]
    );
}

#[test]
fn blockquote_lines_stay_separate() {
    let doc = parse("> first\n> second\n");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Blockquote {
                text: "first".to_string()
            },
            Block::Blockquote {
                text: "second".to_string()
            },
        ]
    );
}

#[test]
fn rules_of_each_glyph() {
    let doc = parse("---\n***\n___\n-- \n");
    assert_eq!(
        &doc.blocks[..3],
        &[
            Block::HorizontalRule,
            Block::HorizontalRule,
            Block::HorizontalRule
        ]
    );
    assert_eq!(doc.blocks.len(), 4);
}

#[test]
fn blank_lines_are_never_emitted() {
    let doc = parse("\n\n\nText\n\n\n");
    assert_eq!(
        doc.blocks,
        vec![Block::Paragraph {
            text: "Text".to_string()
        }]
    );
}

#[test]
fn parsing_is_total_on_odd_input() {
    for input in ["|", "||", "| |\n|-|", "```", "> ", "1.", "- ", "* * *", "[x](", "**"] {
        let _ = parse(input);
    }
}
