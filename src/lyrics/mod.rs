//! Lyric processing.
//!
//! Splits raw section text into slide and print blocks, expands a song's
//! arrangement into its ordered emissions, and formats prose for display.

pub mod arrangement;
pub mod format;
pub mod segment;

pub use arrangement::{expand_arrangement, ArrangedSection};
pub use segment::{normalize_newlines, print_paragraphs, split_blocks};
