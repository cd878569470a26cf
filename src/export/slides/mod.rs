//! Slide deck export.
//!
//! [`build_deck`] lays a song out as a title slide, a blank separator and one
//! slide per lyric block; [`Deck::to_pptx`] packages the result as a
//! PowerPoint presentation.

mod package;
mod parts;

use chrono::{DateTime, Utc};

use crate::constants::slides::{
    BACKGROUND, FONT_NAME, FOREGROUND, LYRICS_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::error::Result;
use crate::lyrics::expand_arrangement;
use crate::models::Song;

/// Slide generation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideOptions {
    /// Typeface for all slide text (default: Yu Gothic UI Semilight)
    pub font_name: String,
    /// Title slide size in points (default: 45)
    pub title_font_size: u32,
    /// Lyric slide size in points (default: 40)
    pub lyrics_font_size: u32,
    /// Background colour as RRGGBB (default: black)
    pub background: String,
    /// Text colour as RRGGBB (default: white)
    pub foreground: String,
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            font_name: FONT_NAME.to_string(),
            title_font_size: TITLE_FONT_SIZE,
            lyrics_font_size: LYRICS_FONT_SIZE,
            background: BACKGROUND.to_string(),
            foreground: FOREGROUND.to_string(),
        }
    }
}

/// Role of a slide within the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    /// Opening slide showing the song title.
    Title,
    /// Empty separator after the title.
    Blank,
    /// One lyric block.
    Lyrics,
}

/// A single slide: background plus optional centered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Role of this slide.
    pub kind: SlideKind,
    /// Lines of centered text; empty for the blank slide.
    pub lines: Vec<String>,
    /// Text size in points.
    pub font_size: u32,
}

impl Slide {
    fn text(kind: SlideKind, text: &str, font_size: u32) -> Self {
        Self {
            kind,
            lines: text.split('\n').map(|line| line.trim_end().to_string()).collect(),
            font_size,
        }
    }

    /// The slide text with lines joined by `\n`.
    pub fn text_content(&self) -> String {
        self.lines.join("\n")
    }
}

/// A laid-out presentation, ready to be packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Presentation title (the song title).
    pub title: String,
    /// Slides in display order.
    pub slides: Vec<Slide>,
    /// Options the deck was built with.
    pub options: SlideOptions,
}

impl Deck {
    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides (never true for a built deck).
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Package the deck as `.pptx` bytes.
    ///
    /// `generated_at` is recorded in the document properties; everything
    /// else is a pure function of the deck.
    pub fn to_pptx(&self, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
        package::write_pptx(self, generated_at)
    }
}

/// Lay out `song` as a deck: title, blank, then every lyric block of every
/// arrangement emission in order.
pub fn build_deck(song: &Song, options: &SlideOptions) -> Result<Deck> {
    let mut slides = vec![
        Slide::text(SlideKind::Title, &song.title, options.title_font_size),
        Slide {
            kind: SlideKind::Blank,
            lines: Vec::new(),
            font_size: options.lyrics_font_size,
        },
    ];

    for emission in expand_arrangement(song)? {
        slides.extend(
            emission
                .blocks
                .iter()
                .map(|block| Slide::text(SlideKind::Lyrics, block, options.lyrics_font_size)),
        );
    }

    tracing::debug!("Built {} slides for '{}'", slides.len(), song.title);

    Ok(Deck {
        title: song.title.clone(),
        slides,
        options: options.clone(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::SectionType;

    fn song() -> Song {
        Song::new("Great Is Thy Faithfulness")
            .with_section(
                "v1",
                SectionType::Verse,
                None,
                "Great is Thy faithfulness\nO God my Father\n\nThere is no shadow",
            )
            .with_section("c", SectionType::Chorus, None, "Morning by morning")
            .with_item("v1", 1, 1)
            .with_item("c", 2, 2)
    }

    #[test]
    fn empty_arrangement_has_title_and_blank() {
        let deck = build_deck(&Song::new("Silent Night"), &SlideOptions::default()).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides[0].kind, SlideKind::Title);
        assert_eq!(deck.slides[0].text_content(), "Silent Night");
        assert_eq!(deck.slides[0].font_size, TITLE_FONT_SIZE);
        assert_eq!(deck.slides[1].kind, SlideKind::Blank);
        assert!(deck.slides[1].lines.is_empty());
    }

    #[test]
    fn one_slide_per_block_per_repeat() {
        let deck = build_deck(&song(), &SlideOptions::default()).unwrap();
        let texts: Vec<String> = deck.slides[2..].iter().map(Slide::text_content).collect();
        assert_eq!(
            texts,
            vec![
                "Great is Thy faithfulness\nO God my Father",
                "There is no shadow",
                "Morning by morning",
                "Morning by morning",
            ]
        );
        assert!(deck.slides[2..].iter().all(|s| s.font_size == LYRICS_FONT_SIZE));
    }

    #[test]
    fn layout_is_deterministic() {
        let a = build_deck(&song(), &SlideOptions::default()).unwrap();
        let b = build_deck(&song(), &SlideOptions::default()).unwrap();
        assert_eq!(a, b);
    }
}
