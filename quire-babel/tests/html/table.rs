use quire_babel::{parse, to_html};

#[test]
fn header_row_goes_to_thead() {
    let html = to_html(&parse("| a | b |\n|---|---|\n| 1 | **2** |\n"), false).unwrap();
    insta::assert_snapshot!(html.split("<body>\n").nth(1).unwrap(), @r###"
    <table class="quire-striped">
    <thead>
    <tr><th>a</th><th>b</th></tr>
    </thead>
    <tbody>
    <tr><td>1</td><td><strong>2</strong></td></tr>
    </tbody>
    </table>
    </body>
    </html>
    "###);
}

#[test]
fn table_without_separator_has_no_thead() {
    let html = to_html(&parse("| a | b |\n| 1 | 2 |\n"), false).unwrap();
    assert!(!html.contains("<thead>"));
    assert!(!html.contains("quire-striped"));
    assert_eq!(html.matches("<tr>").count(), 2);
}
