use proptest::prelude::*;
use quire_babel::formats::common::escape_html;
use quire_babel::formats::html::render_inline;

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[test]
fn markup_in_plain_text_is_escaped() {
    assert_eq!(
        render_inline("<b>x</b> & 'y' \"z\"").unwrap(),
        "&lt;b&gt;x&lt;/b&gt; &amp; &#39;y&#39; &quot;z&quot;"
    );
}

#[test]
fn non_breaking_space_stays_visible() {
    assert_eq!(render_inline("a\u{a0}b").unwrap(), "a&nbsp;b");
}

#[test]
fn link_urls_are_escaped() {
    assert_eq!(
        render_inline("[a&b](http://x?a=1&b=2)").unwrap(),
        "<a href=\"http://x?a=1&amp;b=2\">a&amp;b</a>"
    );
}

#[test]
fn entities_in_source_are_not_decoded() {
    assert_eq!(render_inline("&amp;").unwrap(), "&amp;amp;");
}

proptest! {
    #[test]
    fn escaping_round_trips_without_double_escaping(text in ".{0,60}") {
        let escaped = escape_html(&text);
        prop_assert_eq!(escape_html(&unescape(&escaped)), escaped.clone());
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
    }

    #[test]
    fn inline_output_never_leaks_markup(text in "[a-z<>&\"' *`]{0,40}") {
        let html = render_inline(&text).unwrap();
        let stripped = html
            .replace("<strong>", "")
            .replace("</strong>", "")
            .replace("<em>", "")
            .replace("</em>", "")
            .replace("<code>", "")
            .replace("</code>", "");
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
        prop_assert!(!stripped.contains('"'));
        prop_assert!(!stripped.contains('\''));
    }
}
