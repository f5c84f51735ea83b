use proptest::prelude::*;
use quire_babel::inline::{plain_text, tokenize, InlineSpan};

#[test]
fn five_kinds_in_order() {
    let spans = tokenize("`code` and **bold** and *italic* and [link](http://x)");
    assert_eq!(
        spans,
        vec![
            InlineSpan::code("code"),
            InlineSpan::plain(" and "),
            InlineSpan::bold("bold"),
            InlineSpan::plain(" and "),
            InlineSpan::italic("italic"),
            InlineSpan::plain(" and "),
            InlineSpan::link("link", "http://x"),
        ]
    );
}

#[test]
fn unmatched_markers_stay_plain() {
    assert_eq!(
        tokenize("2 * 3 and **open"),
        vec![InlineSpan::plain("2 * 3 and **open")]
    );
}

#[test]
fn inner_markers_are_not_retokenized() {
    assert_eq!(tokenize("`**x**`"), vec![InlineSpan::code("**x**")]);
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.]{1,12}"
}

#[derive(Debug, Clone)]
enum Piece {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link(String, String),
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        word().prop_map(Piece::Plain),
        word().prop_map(Piece::Bold),
        word().prop_map(Piece::Italic),
        word().prop_map(Piece::Code),
        (word(), "[a-z]{1,8}").prop_map(|(text, host)| Piece::Link(text, format!("https://{host}"))),
    ]
}

impl Piece {
    fn source(&self) -> String {
        match self {
            Piece::Plain(text) => text.clone(),
            Piece::Bold(text) => format!("**{text}**"),
            Piece::Italic(text) => format!("*{text}*"),
            Piece::Code(text) => format!("`{text}`"),
            Piece::Link(text, url) => format!("[{text}]({url})"),
        }
    }

    fn stripped(&self) -> &str {
        match self {
            Piece::Plain(text)
            | Piece::Bold(text)
            | Piece::Italic(text)
            | Piece::Code(text)
            | Piece::Link(text, _) => text,
        }
    }
}

proptest! {
    #[test]
    fn span_text_is_input_without_markers(pieces in prop::collection::vec(piece(), 0..8)) {
        let source: String = pieces.iter().map(Piece::source).collect();
        let expected: String = pieces.iter().map(Piece::stripped).collect();
        prop_assert_eq!(plain_text(&source), expected);
    }

    #[test]
    fn marker_free_text_is_one_plain_span(text in "[^*`\\[]{1,40}") {
        prop_assert_eq!(tokenize(&text), vec![InlineSpan::plain(text.clone())]);
    }
}
