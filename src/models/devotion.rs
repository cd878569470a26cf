//! Devotions: short prose readings shown as flowed paragraphs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lyrics::format::{devotion_paragraphs, devotion_paragraphs_html};

/// A devotion reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devotion {
    /// Display title.
    pub title: String,
    /// Publication date, if scheduled.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Body text; blank lines separate paragraphs.
    #[serde(default)]
    pub content: String,
}

impl Devotion {
    /// Body paragraphs with wrapped lines joined into single spaces.
    pub fn paragraphs(&self) -> Vec<String> {
        devotion_paragraphs(&self.content)
    }

    /// Body rendered as escaped HTML `<p>` elements.
    pub fn to_html(&self) -> String {
        devotion_paragraphs_html(&self.content)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn loads_without_date_and_renders_paragraphs() {
        let devotion: Devotion = serde_json::from_str(
            r#"{"title": "Morning", "content": "Be still,\nand know\n\nthat I am <God>"}"#,
        )
        .unwrap();

        assert_eq!(devotion.date, None);
        assert_eq!(devotion.paragraphs(), vec!["Be still, and know", "that I am <God>"]);
        assert_eq!(
            devotion.to_html(),
            "<p class=\"mb-4 last:mb-0\">Be still, and know</p>\
             <p class=\"mb-4 last:mb-0\">that I am &lt;God&gt;</p>"
        );
    }

    #[test]
    fn dated_devotion_parses_iso_date() {
        let devotion: Devotion =
            serde_json::from_str(r#"{"title": "Advent", "date": "2024-12-01"}"#).unwrap();
        assert_eq!(devotion.date, NaiveDate::from_ymd_opt(2024, 12, 1));
        assert!(devotion.paragraphs().is_empty());
        assert_eq!(devotion.to_html(), "");
    }
}
