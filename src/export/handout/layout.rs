//! Two-column flow of section labels and lyric paragraphs.
//!
//! Each arranged section becomes a [`Block`] of spacers and lines. A block
//! that fits a fresh column is never split; otherwise only its head (label
//! plus first paragraph) is kept together and later lines break wherever the
//! column runs out.

use crate::constants::handout::{
    BODY_LEAD_IN, LABEL_LEADING, LABEL_SIZE, LABEL_SPACE_AFTER, LABEL_SPACE_BEFORE,
    LYRIC_LEADING, LYRIC_SIZE, LYRIC_SPACE_AFTER, SECTION_SPACE_AFTER,
};

use super::metrics::{wrap_line, FontFace};
use super::{HandoutOptions, PageLayout, Rule, RunRole, TextRun};

/// Slack for float comparisons against the remaining column height.
const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f32,
    top: f32,
    bottom: f32,
}

impl Frame {
    fn height(self) -> f32 {
        self.top - self.bottom
    }
}

#[derive(Debug, Clone)]
enum FlowItem {
    /// Vertical gap, dropped at the top of a column.
    Space(f32),
    Line {
        text: String,
        face: FontFace,
        size: f32,
        leading: f32,
        role: RunRole,
    },
}

impl FlowItem {
    fn height(&self) -> f32 {
        match self {
            Self::Space(height) => *height,
            Self::Line { leading, .. } => *leading,
        }
    }
}

/// One arranged section, ready to flow.
#[derive(Debug, Clone)]
pub(super) struct Block {
    items: Vec<FlowItem>,
    /// Number of leading items that must share a column.
    keep: usize,
}

impl Block {
    fn height(&self) -> f32 {
        self.items.iter().map(FlowItem::height).sum()
    }

    fn keep_height(&self) -> f32 {
        self.items[..self.keep].iter().map(FlowItem::height).sum()
    }
}

/// Build the block for one section emission, wrapping lines to `width`.
pub(super) fn section_block(label: &str, paragraphs: &[Vec<String>], width: f32) -> Block {
    let mut items = vec![FlowItem::Space(LABEL_SPACE_BEFORE)];
    items.extend(wrap_line(label, FontFace::Bold, LABEL_SIZE, width).into_iter().map(|text| {
        FlowItem::Line {
            text,
            face: FontFace::Bold,
            size: LABEL_SIZE,
            leading: LABEL_LEADING,
            role: RunRole::Label,
        }
    }));
    items.push(FlowItem::Space(LABEL_SPACE_AFTER));

    let mut keep = items.len();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        for line in paragraph {
            items.extend(wrap_line(line, FontFace::Regular, LYRIC_SIZE, width).into_iter().map(
                |text| FlowItem::Line {
                    text,
                    face: FontFace::Regular,
                    size: LYRIC_SIZE,
                    leading: LYRIC_LEADING,
                    role: RunRole::Lyric,
                },
            ));
        }
        if index == 0 {
            keep = items.len();
        }
        items.push(FlowItem::Space(LYRIC_SPACE_AFTER));
    }
    items.push(FlowItem::Space(SECTION_SPACE_AFTER));

    Block { items, keep }
}

/// Places blocks column by column, starting pages as columns fill.
pub(super) struct Flow {
    frames: [Frame; 2],
    header: Vec<TextRun>,
    divider: Rule,
    pages: Vec<PageLayout>,
    column: usize,
    cursor: f32,
    /// Nothing has been placed in the current column yet.
    fresh: bool,
}

impl Flow {
    pub(super) fn new(options: &HandoutOptions, header: Vec<TextRun>, divider: Rule) -> Self {
        let (_, page_height) = options.page_size.dimensions();
        let width = options.column_width();
        let top = page_height - options.margin - options.header_height;
        let bottom = options.margin;
        let frames = [
            Frame {
                x: options.margin,
                top,
                bottom,
            },
            Frame {
                x: options.margin + width + options.gutter,
                top,
                bottom,
            },
        ];

        let mut flow = Self {
            frames,
            header,
            divider,
            pages: Vec::new(),
            column: 0,
            cursor: top - BODY_LEAD_IN,
            fresh: true,
        };
        flow.start_page();
        flow
    }

    fn frame(&self) -> Frame {
        self.frames[self.column]
    }

    fn remaining(&self) -> f32 {
        (self.cursor - self.frame().bottom).max(0.0)
    }

    fn start_page(&mut self) {
        self.pages.push(PageLayout {
            header: self.header.clone(),
            divider: self.divider,
            body: Vec::new(),
        });
    }

    fn advance(&mut self) {
        if self.column + 1 < self.frames.len() {
            self.column += 1;
        } else {
            self.column = 0;
            self.start_page();
        }
        self.cursor = self.frame().top;
        self.fresh = true;
    }

    pub(super) fn place(&mut self, block: Block) {
        if !self.fresh {
            let remaining = self.remaining() + EPSILON;
            let whole_fits_column = block.height() <= self.frame().height();
            let whole_overflows = whole_fits_column && block.height() > remaining;
            if whole_overflows || block.keep_height() > remaining {
                self.advance();
            }
        }

        for item in block.items {
            match item {
                FlowItem::Space(height) => {
                    if !self.fresh {
                        self.cursor -= height.min(self.remaining());
                    }
                }
                FlowItem::Line { text, face, size, leading, role } => {
                    if !self.fresh && leading > self.remaining() + EPSILON {
                        self.advance();
                    }
                    let run = TextRun {
                        text,
                        x: self.frame().x,
                        y: self.cursor - size,
                        face,
                        size,
                        gray: 0.0,
                        role,
                    };
                    if let Some(page) = self.pages.last_mut() {
                        page.body.push(run);
                    }
                    self.cursor -= leading;
                    self.fresh = false;
                }
            }
        }
    }

    pub(super) fn finish(self) -> Vec<PageLayout> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;

    fn lines(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("Line {n}")).collect()
    }

    #[test]
    fn block_keeps_label_and_first_paragraph() {
        let block = section_block("Verse 1", &[lines(2), lines(3)], 250.0);
        assert_eq!(block.keep, 5);
        assert_eq!(
            block.keep_height(),
            LABEL_SPACE_BEFORE + LABEL_LEADING + LABEL_SPACE_AFTER + 2.0 * LYRIC_LEADING
        );
        assert_eq!(
            block.height(),
            block.keep_height()
                + 2.0 * LYRIC_SPACE_AFTER
                + 3.0 * LYRIC_LEADING
                + SECTION_SPACE_AFTER
        );
    }

    #[test]
    fn empty_section_is_label_only() {
        let block = section_block("Instrumental", &[], 250.0);
        assert_eq!(block.keep, 3);
        assert_eq!(block.items.len(), 4);
    }

    #[test]
    fn oversized_block_splits_after_its_head() {
        let options = HandoutOptions::default();
        let divider = Rule {
            from: (0.0, 0.0),
            to: (0.0, 0.0),
            width: 0.5,
            gray: 0.7,
        };
        let mut flow = Flow::new(&options, Vec::new(), divider);

        flow.place(section_block("Chorus", &[lines(2)], options.column_width()));
        flow.place(section_block("Verse", &[lines(1), lines(80)], options.column_width()));
        let pages = flow.finish();

        let first = &pages[0].body;
        let verse = first.iter().position(|r| r.text == "Verse").unwrap();
        // Head stays with the chorus in the first column; the long tail wraps.
        assert_eq!(first[verse].x, options.margin);
        assert_eq!(first[verse + 1].x, options.margin);
        assert!(first.iter().any(|r| r.x > options.margin));
    }
}
