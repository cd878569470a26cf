//! Blank-line segmentation of lyric text.
//!
//! Content format:
//! - `\r\n` and lone `\r` are treated as `\n`
//! - One or more blank (or whitespace-only) lines separate blocks
//! - Single newlines inside a block are kept as line breaks

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching a paragraph break: a newline, then at least one blank line.
#[allow(clippy::expect_used)]
static RE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[^\S\n]*\n\s*").expect("valid regex: RE_BLANK_LINES")
});

/// Convert every line-ending style to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split lyric text into slide blocks.
///
/// Blocks are trimmed, empty blocks are dropped, and internal single
/// newlines are preserved. Empty or whitespace-only text yields no blocks.
pub fn split_blocks(text: &str) -> Vec<String> {
    let normalized = normalize_newlines(text);
    RE_BLANK_LINES
        .split(normalized.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split lyric text into print paragraphs, each a list of trimmed lines.
///
/// Uses the same block boundaries as [`split_blocks`]; lines inside a
/// paragraph are rendered with hard breaks between them.
pub fn print_paragraphs(text: &str) -> Vec<Vec<String>> {
    split_blocks(text)
        .iter()
        .map(|block| block.lines().map(|line| line.trim().to_string()).collect())
        .collect()
}

/// Rejoin blocks with blank lines; the inverse of [`split_blocks`] on
/// normalized text.
pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join("\n\n")
}
