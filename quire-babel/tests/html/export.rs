use once_cell::sync::Lazy;
use quire_babel::formats::html::{serialize_to_html_with_options, HtmlOptions};
use quire_babel::{parse, to_html};
use regex::Regex;

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>([^<]*)</title>").unwrap());

fn title_of(html: &str) -> String {
    TITLE.captures(html).unwrap()[1].to_string()
}

#[test]
fn empty_document_is_a_complete_page() {
    let html = to_html(&parse(""), false).unwrap();
    insta::assert_snapshot!(html, @r###"
    <!DOCTYPE html>
    <html lang="en">
    <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="quire">
    <title>Untitled</title>
    </head>
    <body>
    </body>
    </html>
    "###);
}

#[test]
fn styles_are_additive() {
    let doc = parse("# Notes\n\nBody\n");
    let styled = to_html(&doc, true).unwrap();
    let plain = to_html(&doc, false).unwrap();

    assert!(styled.contains("<style>"));
    assert!(styled.contains("#9e3a5b"));
    assert!(!plain.contains("<style>"));
    assert!(!plain.contains("style=\""));
    assert_eq!(
        styled.split("<body>").nth(1),
        plain.split("<body>").nth(1)
    );
}

#[test]
fn title_prefers_option_then_first_heading() {
    let doc = parse("Intro\n\n## **Second** heading\n\n# Later\n");
    assert_eq!(title_of(&to_html(&doc, false).unwrap()), "Second heading");

    let options = HtmlOptions::new(false).with_title("Given <title>");
    assert_eq!(
        title_of(&serialize_to_html_with_options(&doc, &options).unwrap()),
        "Given &lt;title&gt;"
    );
}

#[test]
fn custom_css_follows_builtin_sheet() {
    let options = HtmlOptions::new(true).with_custom_css(".extra { color: red; }".to_string());
    let html = serialize_to_html_with_options(&parse("x"), &options).unwrap();
    let builtin = html.find("#9e3a5b").unwrap();
    let extra = html.find(".extra").unwrap();
    assert!(builtin < extra);
}

#[test]
fn nested_lists_nest_inside_items() {
    let html = to_html(&parse("- a\n  1. b\n  2. c\n- d\n"), false).unwrap();
    assert!(html.contains(
        "<ul>\n<li>a<ol>\n<li>b</li>\n<li>c</li>\n</ol>\n</li>\n<li>d</li>\n</ul>\n"
    ));
}

#[test]
fn separate_ordered_runs_are_separate_lists() {
    let html = to_html(&parse("1. a\n\nBreak\n\n1. b\n"), false).unwrap();
    assert_eq!(html.matches("<ol>").count(), 2);
}

#[test]
fn code_block_language_and_verbatim_lines() {
    let html = to_html(&parse("```rust\nlet x = a < b && **c**;\n```\n"), false).unwrap();
    assert!(html.contains(
        "<pre><code class=\"language-rust\">let x = a &lt; b &amp;&amp; **c**;</code></pre>"
    ));
}

#[test]
fn block_shapes() {
    let html = to_html(&parse("> quoted *text*\n\n---\n"), false).unwrap();
    assert!(html.contains("<blockquote><p>quoted <em>text</em></p></blockquote>"));
    assert!(html.contains("<hr>"));
}
