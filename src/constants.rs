//! Application constants.
//!
//! Centralizes magic numbers and layout values for better maintainability.

/// Slug generation constants.
pub mod slug {
    /// Maximum length of the slugified title before any suffix.
    pub const MAX_BASE_LEN: usize = 200;

    /// Maximum length of a stored slug including the `-N` suffix.
    pub const MAX_SLUG_LEN: usize = 220;

    /// First numeric suffix tried after the bare base collides.
    pub const FIRST_SUFFIX: u32 = 2;

    /// Fallback slug for songs whose title slugifies to nothing.
    pub const DEFAULT_SONG_SLUG: &str = "song";

    /// Fallback slug for pieces whose title slugifies to nothing.
    pub const DEFAULT_PIECE_SLUG: &str = "piece";
}

/// Slide deck constants. Lengths are in EMU (914400 per inch).
pub mod slides {
    /// Slide width (13.333in, 16:9).
    pub const SLIDE_WIDTH: i64 = 12_191_695;

    /// Slide height (7.5in).
    pub const SLIDE_HEIGHT: i64 = 6_858_000;

    /// Horizontal text box inset (0.75in).
    pub const MARGIN_X: i64 = 685_800;

    /// Vertical text box inset (0.6in).
    pub const MARGIN_Y: i64 = 548_640;

    /// Default slide typeface.
    pub const FONT_NAME: &str = "Yu Gothic UI Semilight";

    /// Title slide font size in points.
    pub const TITLE_FONT_SIZE: u32 = 45;

    /// Lyric slide font size in points.
    pub const LYRICS_FONT_SIZE: u32 = 40;

    /// Slide background colour (RRGGBB).
    pub const BACKGROUND: &str = "000000";

    /// Slide text colour (RRGGBB).
    pub const FOREGROUND: &str = "FFFFFF";

    /// MIME type of a presentation package.
    pub const CONTENT_TYPE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation";

    /// Suffix appended to the slugified title for downloads.
    pub const FILE_SUFFIX: &str = ".pptx";
}

/// Printable handout constants. Lengths are in PDF points (72 per inch).
pub mod handout {
    /// Points per inch.
    pub const POINTS_PER_INCH: f32 = 72.0;

    /// US Letter page size.
    pub const LETTER: (f32, f32) = (612.0, 792.0);

    /// ISO A4 page size.
    pub const A4: (f32, f32) = (595.276, 841.89);

    /// Page margin on all sides (0.6in).
    pub const MARGIN: f32 = 0.6 * POINTS_PER_INCH;

    /// Space between the two body columns (0.25in).
    pub const GUTTER: f32 = 0.25 * POINTS_PER_INCH;

    /// Height reserved at the top of each page for the header band (0.9in).
    pub const HEADER_HEIGHT: f32 = 0.9 * POINTS_PER_INCH;

    /// Header title size.
    pub const TITLE_SIZE: f32 = 16.0;

    /// Title baseline offset below the top margin.
    pub const TITLE_OFFSET: f32 = 18.0;

    /// Header metadata line size.
    pub const META_SIZE: f32 = 10.0;

    /// Metadata baseline offset below the top margin.
    pub const META_OFFSET: f32 = 36.0;

    /// Metadata gray level (0 = black).
    pub const META_GRAY: f32 = 0.25;

    /// Divider gray level.
    pub const DIVIDER_GRAY: f32 = 0.7;

    /// Divider stroke width.
    pub const DIVIDER_WIDTH: f32 = 0.5;

    /// Divider height above the bottom of the header band.
    pub const DIVIDER_RAISE: f32 = 10.0;

    /// Section label font size.
    pub const LABEL_SIZE: f32 = 11.0;

    /// Section label leading.
    pub const LABEL_LEADING: f32 = 13.0;

    /// Space above a section label.
    pub const LABEL_SPACE_BEFORE: f32 = 6.0;

    /// Space between a section label and its lyrics.
    pub const LABEL_SPACE_AFTER: f32 = 2.0;

    /// Lyric font size.
    pub const LYRIC_SIZE: f32 = 10.5;

    /// Lyric leading.
    pub const LYRIC_LEADING: f32 = 13.0;

    /// Space after each lyric paragraph.
    pub const LYRIC_SPACE_AFTER: f32 = 6.0;

    /// Spacer at the head of the body flow.
    pub const BODY_LEAD_IN: f32 = 6.0;

    /// Spacer after each section.
    pub const SECTION_SPACE_AFTER: f32 = 8.0;

    /// Separator between metadata fields.
    pub const META_SEPARATOR: &str = " \u{2022} ";

    /// MIME type of the handout.
    pub const CONTENT_TYPE: &str = "application/pdf";

    /// Suffix appended to the slugified title for downloads.
    pub const FILE_SUFFIX: &str = "-handout.pdf";
}

/// Catalog listing constants.
pub mod catalog {
    /// Records shown per list page.
    pub const PAGE_SIZE: usize = 25;
}
