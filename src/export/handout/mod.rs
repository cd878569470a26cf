//! Printable lyric handout.
//!
//! [`layout_handout`] flows every arranged section into two columns under a
//! header band repeated on each page; [`HandoutLayout::to_pdf`] writes the
//! result with the standard Helvetica fonts.

mod layout;
mod metrics;
mod pdf;

use std::str::FromStr;

pub use metrics::FontFace;

use crate::constants::handout::{
    A4, DIVIDER_GRAY, DIVIDER_RAISE, DIVIDER_WIDTH, GUTTER, HEADER_HEIGHT, LETTER, MARGIN,
    META_GRAY, META_OFFSET, META_SEPARATOR, META_SIZE, TITLE_OFFSET, TITLE_SIZE,
};
use crate::error::{Error, Result};
use crate::lyrics::{expand_arrangement, print_paragraphs};
use crate::models::Song;

/// Handout paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// US Letter, 8.5 x 11 in.
    #[default]
    Letter,
    /// ISO A4.
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub const fn dimensions(self) -> (f32, f32) {
        match self {
            Self::Letter => LETTER,
            Self::A4 => A4,
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "a4" => Ok(Self::A4),
            other => Err(Error::config(
                format!("Unknown page size '{other}'"),
                "Use 'letter' or 'a4'",
            )),
        }
    }
}

/// Handout page geometry. Lengths are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandoutOptions {
    /// Paper size (default: Letter)
    pub page_size: PageSize,
    /// Margin on all sides (default: 0.6in)
    pub margin: f32,
    /// Space between the columns (default: 0.25in)
    pub gutter: f32,
    /// Header band height (default: 0.9in)
    pub header_height: f32,
}

impl Default for HandoutOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margin: MARGIN,
            gutter: GUTTER,
            header_height: HEADER_HEIGHT,
        }
    }
}

impl HandoutOptions {
    /// Width of one body column.
    pub fn column_width(&self) -> f32 {
        let (width, _) = self.page_size.dimensions();
        (width - 2.0 * self.margin - self.gutter) / 2.0
    }
}

/// What a text run shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRole {
    /// Song title in the header.
    Title,
    /// Artists and hymnal numbers in the header.
    Meta,
    /// Section heading.
    Label,
    /// One wrapped lyric line.
    Lyric,
}

/// A single line of text at a fixed position (baseline origin, points from
/// the bottom-left corner).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text to draw.
    pub text: String,
    /// Left edge.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    /// Font face.
    pub face: FontFace,
    /// Font size.
    pub size: f32,
    /// Fill gray level, 0 is black.
    pub gray: f32,
    /// What the run shows.
    pub role: RunRole,
}

/// A stroked horizontal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Start point.
    pub from: (f32, f32),
    /// End point.
    pub to: (f32, f32),
    /// Stroke width.
    pub width: f32,
    /// Stroke gray level.
    pub gray: f32,
}

/// One page: repeated header band plus its share of the body flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Title and metadata runs.
    pub header: Vec<TextRun>,
    /// Line under the header.
    pub divider: Rule,
    /// Labels and lyric lines placed on this page.
    pub body: Vec<TextRun>,
}

/// A fully positioned handout.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoutLayout {
    /// Document title ("<song title> Lyrics").
    pub title: String,
    /// Page width and height in points.
    pub page_size: (f32, f32),
    /// Pages in order; never empty.
    pub pages: Vec<PageLayout>,
}

impl HandoutLayout {
    /// Section labels in flow order across all pages.
    pub fn labels(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| &page.body)
            .filter(|run| run.role == RunRole::Label)
            .map(|run| run.text.as_str())
            .collect()
    }

    /// Write the layout as PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        pdf::write_pdf(self)
    }
}

/// Header metadata: artists, LSB number and CCLI number, skipping absent
/// fields.
pub fn meta_line(song: &Song) -> String {
    let mut fields = Vec::new();
    let artists = song.artist_names();
    if !artists.is_empty() {
        fields.push(artists);
    }
    if let Some(lsb) = song.lsb() {
        fields.push(format!("LSB {lsb}"));
    }
    if let Some(ccli) = song.ccli() {
        fields.push(format!("CCLI {ccli}"));
    }
    fields.join(META_SEPARATOR)
}

fn header_runs(song: &Song, options: &HandoutOptions) -> Vec<TextRun> {
    let (_, height) = options.page_size.dimensions();
    let top = height - options.margin;

    let mut runs = vec![TextRun {
        text: song.title.clone(),
        x: options.margin,
        y: top - TITLE_OFFSET,
        face: FontFace::Bold,
        size: TITLE_SIZE,
        gray: 0.0,
        role: RunRole::Title,
    }];

    let meta = meta_line(song);
    if !meta.is_empty() {
        runs.push(TextRun {
            text: meta,
            x: options.margin,
            y: top - META_OFFSET,
            face: FontFace::Regular,
            size: META_SIZE,
            gray: META_GRAY,
            role: RunRole::Meta,
        });
    }
    runs
}

fn divider(options: &HandoutOptions) -> Rule {
    let (width, height) = options.page_size.dimensions();
    let y = height - options.margin - options.header_height + DIVIDER_RAISE;
    Rule {
        from: (options.margin, y),
        to: (width - options.margin, y),
        width: DIVIDER_WIDTH,
        gray: DIVIDER_GRAY,
    }
}

/// Lay out `song` as a two-column handout.
///
/// Every arrangement emission contributes its label and paragraphs, so a
/// repeated section appears in full each time. A song with no arrangement
/// yields a single header-only page.
pub fn layout_handout(song: &Song, options: &HandoutOptions) -> Result<HandoutLayout> {
    let mut flow = layout::Flow::new(options, header_runs(song, options), divider(options));
    let width = options.column_width();

    for emission in expand_arrangement(song)? {
        let paragraphs = print_paragraphs(&emission.lyrics);
        flow.place(layout::section_block(&emission.label, &paragraphs, width));
    }

    let pages = flow.finish();
    tracing::debug!("Laid out {} handout pages for '{}'", pages.len(), song.title);

    Ok(HandoutLayout {
        title: format!("{} Lyrics", song.title),
        page_size: options.page_size.dimensions(),
        pages,
    })
}
