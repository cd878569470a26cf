//! Display formatting for lyrics and devotion prose.

use std::sync::LazyLock;

use regex::Regex;

use super::segment::{normalize_newlines, split_blocks};

#[allow(clippy::expect_used)]
static RE_LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\n]+").expect("valid regex: RE_LINE_BREAKS"));

#[allow(clippy::expect_used)]
static RE_SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex: RE_SPACE_RUNS"));

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Devotion paragraphs with wrapped lines flowed into single spaces.
pub fn devotion_paragraphs(text: &str) -> Vec<String> {
    split_blocks(text)
        .iter()
        .map(|p| {
            let flowed = RE_LINE_BREAKS.replace_all(p, " ");
            RE_SPACE_RUNS.replace_all(&flowed, " ").trim().to_string()
        })
        .collect()
}

/// Devotion text as a run of `<p>` elements; empty text renders nothing.
pub fn devotion_paragraphs_html(text: &str) -> String {
    devotion_paragraphs(text)
        .iter()
        .map(|p| format!("<p class=\"mb-4 last:mb-0\">{}</p>", escape_html(p)))
        .collect()
}

/// Lyrics for on-page display: blank lines dropped, one `<br>` per line.
pub fn lyrics_html(text: &str) -> String {
    let normalized = normalize_newlines(text);
    let cleaned = normalized
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    escape_html(&cleaned).replace('\n', "<br>\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn devotion_lines_flow_into_one_paragraph() {
        let text = "In the beginning\nwas the   Word,\tand the Word\n\n\nwas with God.";
        assert_eq!(
            devotion_paragraphs(text),
            vec![
                "In the beginning was the Word, and the Word".to_string(),
                "was with God.".to_string(),
            ]
        );
    }

    #[test]
    fn devotion_html_escapes_content() {
        let html = devotion_paragraphs_html("Faith & <works>");
        assert_eq!(html, "<p class=\"mb-4 last:mb-0\">Faith &amp; &lt;works&gt;</p>");
        assert_eq!(devotion_paragraphs_html("  \n "), "");
    }

    #[test]
    fn lyrics_html_drops_blank_lines() {
        let html = lyrics_html("Be thou my vision\r\n\r\nO Lord of my heart's");
        assert_eq!(html, "Be thou my vision<br>\nO Lord of my heart&#x27;s");
    }
}
