//! Helpers shared by the output formats: entity escaping and option parsing.

use crate::error::FormatError;
use std::collections::HashMap;

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape text for an XML text node or attribute, dropping characters that
/// XML 1.0 does not allow.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            other => out.push(other),
        }
    }
    out
}

/// Read a boolean option. A present-but-empty value counts as `true`.
pub fn parse_bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    match options.get(key) {
        None => Ok(default),
        Some(value) if value.is_empty() => Ok(true),
        Some(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            other => Err(FormatError::NotSupported(format!(
                "Invalid boolean value '{other}' for option '{key}'"
            ))),
        },
    }
}

/// Read a non-empty string option.
pub fn string_option<'a>(options: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    options
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Reject option keys the format does not understand.
pub fn reject_unknown_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not support option(s): {}",
        unknown.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_covers_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom's & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#39;s &amp; Jerry&lt;/a&gt;"
        );
    }

    #[test]
    fn xml_escape_drops_control_characters() {
        assert_eq!(escape_xml("a\u{1}b\tc<"), "ab\tc&lt;");
    }

    #[test]
    fn bool_options() {
        let mut options = HashMap::new();
        assert!(parse_bool_option(&options, "flag", true).unwrap());
        options.insert("flag".to_string(), String::new());
        assert!(parse_bool_option(&options, "flag", false).unwrap());
        options.insert("flag".to_string(), "No".to_string());
        assert!(!parse_bool_option(&options, "flag", true).unwrap());
        options.insert("flag".to_string(), "maybe".to_string());
        assert!(parse_bool_option(&options, "flag", true).is_err());
    }

    #[test]
    fn unknown_options_are_named() {
        let mut options = HashMap::new();
        options.insert("title".to_string(), "x".to_string());
        options.insert("zoom".to_string(), "2".to_string());
        let err = reject_unknown_options("html", &options, &["title"]).unwrap_err();
        assert!(err.to_string().contains("zoom"));
    }
}
