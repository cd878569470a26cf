//! Expansion of a song's arrangement into ordered section emissions.

use crate::error::Result;
use crate::models::Song;

use super::segment::split_blocks;

/// One playback of a section, with its own copy of the lyric blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangedSection {
    /// Heading: custom name or type label.
    pub label: String,
    /// Lyric blocks, split on blank lines.
    pub blocks: Vec<String>,
    /// Raw lyric text, for renderers that re-split it.
    pub lyrics: String,
    /// Zero-based repetition index within its arrangement item.
    pub iteration: u32,
}

/// Expand the arrangement of `song` in `order`, one entry per repetition.
///
/// Each repetition carries its own block list, so renderers can treat
/// repeats as independent emissions.
pub fn expand_arrangement(song: &Song) -> Result<Vec<ArrangedSection>> {
    let mut expanded = Vec::new();

    for (item, section) in song.ordered_arrangement()? {
        let blocks = split_blocks(&section.lyrics);
        for iteration in 0..item.repeat_count {
            expanded.push(ArrangedSection {
                label: section.label().to_string(),
                blocks: blocks.clone(),
                lyrics: section.lyrics.clone(),
                iteration,
            });
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::SectionType;

    #[test]
    fn repeats_are_independent_emissions() {
        let song = Song::new("10,000 Reasons")
            .with_section("c", SectionType::Chorus, None, "Bless the Lord\n\nO my soul")
            .with_section("v1", SectionType::Verse, Some("Verse 1"), "The sun comes up")
            .with_item("c", 1, 2)
            .with_item("v1", 2, 1)
            .with_item("c", 3, 1);

        let expanded = expand_arrangement(&song).unwrap();
        let labels: Vec<&str> = expanded.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Chorus", "Chorus", "Verse 1", "Chorus"]);
        assert_eq!(expanded[0].iteration, 0);
        assert_eq!(expanded[1].iteration, 1);
        assert_eq!(expanded[0].blocks, expanded[1].blocks);
        assert_eq!(expanded[0].blocks.len(), 2);
    }

    #[test]
    fn empty_arrangement_expands_to_nothing() {
        let song = Song::new("Untitled").with_section("v1", SectionType::Verse, None, "Text");
        assert!(expand_arrangement(&song).unwrap().is_empty());
    }

    #[test]
    fn empty_lyrics_keep_their_emission() {
        let song = Song::new("Instrumental")
            .with_section("i", SectionType::Instrumental, None, "  ")
            .with_item("i", 1, 3);
        let expanded = expand_arrangement(&song).unwrap();
        assert_eq!(expanded.len(), 3);
        assert!(expanded.iter().all(|s| s.blocks.is_empty()));
    }
}
