//! Songs, their lyric sections and arrangements.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::slug::Sluggable;
use crate::types::{SectionId, SectionType, SongId};

/// A credited artist or author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artist {
    /// Display name.
    pub name: String,
}

impl Artist {
    /// Create an artist from a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A free-form category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag {
    /// Display name.
    pub name: String,
}

impl Tag {
    /// Create a tag from a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named lyric block belonging to one song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDefinition {
    /// Key referenced by arrangement items.
    pub id: SectionId,
    /// Section kind.
    #[serde(rename = "type", default)]
    pub section_type: SectionType,
    /// Optional custom name, e.g. "Verse 1".
    #[serde(default)]
    pub name: Option<String>,
    /// Lyrics; single newlines break lines, blank lines separate slides.
    #[serde(default)]
    pub lyrics: String,
}

impl SectionDefinition {
    /// Heading shown for this section: the custom name, or the type label.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.section_type.display_name())
    }
}

const fn default_repeat() -> u32 {
    1
}

/// One position in a song's arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangementItem {
    /// Section played at this position.
    pub section: SectionId,
    /// Sort key, unique within the song.
    pub order: u32,
    /// How many times the section is played back to back.
    #[serde(default = "default_repeat")]
    pub repeat_count: u32,
}

/// A song with its lyrics and arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Assigned by the catalog on first save.
    #[serde(default)]
    pub id: Option<SongId>,
    /// Display title.
    pub title: String,
    /// URL-safe identifier, assigned once on first save.
    #[serde(default)]
    pub slug: String,
    /// Credited artists.
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Category tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Lutheran Service Book number.
    #[serde(default)]
    pub lsb_number: Option<String>,
    /// CCLI song number.
    #[serde(default)]
    pub ccli_number: Option<String>,
    /// Lyric sections available to the arrangement.
    #[serde(default)]
    pub sections: Vec<SectionDefinition>,
    /// Playback order; sections may appear more than once.
    #[serde(default)]
    pub arrangement: Vec<ArrangementItem>,
}

impl Song {
    /// Create an unsaved song with no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            slug: String::new(),
            artists: Vec::new(),
            tags: Vec::new(),
            lsb_number: None,
            ccli_number: None,
            sections: Vec::new(),
            arrangement: Vec::new(),
        }
    }

    /// Add a credited artist
    #[must_use]
    pub fn with_artist(mut self, name: &str) -> Self {
        self.artists.push(Artist::new(name));
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, name: &str) -> Self {
        self.tags.push(Tag::new(name));
        self
    }

    /// Set the LSB number
    #[must_use]
    pub fn with_lsb(mut self, number: &str) -> Self {
        self.lsb_number = Some(number.to_string());
        self
    }

    /// Set the CCLI number
    #[must_use]
    pub fn with_ccli(mut self, number: &str) -> Self {
        self.ccli_number = Some(number.to_string());
        self
    }

    /// Add a section definition
    #[must_use]
    pub fn with_section(
        mut self,
        id: &str,
        section_type: SectionType,
        name: Option<&str>,
        lyrics: &str,
    ) -> Self {
        self.sections.push(SectionDefinition {
            id: SectionId::from(id),
            section_type,
            name: name.map(str::to_string),
            lyrics: lyrics.to_string(),
        });
        self
    }

    /// Append an arrangement item
    #[must_use]
    pub fn with_item(mut self, section: &str, order: u32, repeat_count: u32) -> Self {
        self.arrangement.push(ArrangementItem {
            section: SectionId::from(section),
            order,
            repeat_count,
        });
        self
    }

    /// LSB number, if present and non-blank.
    pub fn lsb(&self) -> Option<&str> {
        non_blank(self.lsb_number.as_deref())
    }

    /// CCLI number, if present and non-blank.
    pub fn ccli(&self) -> Option<&str> {
        non_blank(self.ccli_number.as_deref())
    }

    /// Artist names joined with ", ".
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Find a section by key.
    pub fn section(&self, id: &SectionId) -> Option<&SectionDefinition> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Arrangement items sorted by `order`, each resolved to its section.
    pub fn ordered_arrangement(&self) -> Result<Vec<(&ArrangementItem, &SectionDefinition)>> {
        let mut items: Vec<&ArrangementItem> = self.arrangement.iter().collect();
        items.sort_by_key(|item| item.order);

        items
            .into_iter()
            .map(|item| {
                self.section(&item.section).map(|section| (item, section)).ok_or_else(|| {
                    Error::Catalog(format!(
                        "'{}' arrangement references unknown section '{}'",
                        self.title, item.section
                    ))
                })
            })
            .collect()
    }

    /// Check the structural invariants the exporters rely on.
    pub fn validate(&self) -> Result<()> {
        let mut keys = HashSet::new();
        for section in &self.sections {
            if !keys.insert(&section.id) {
                return Err(Error::Catalog(format!(
                    "'{}' defines section '{}' twice",
                    self.title, section.id
                )));
            }
        }

        let mut orders = HashSet::new();
        for item in &self.arrangement {
            if !orders.insert(item.order) {
                return Err(Error::Catalog(format!(
                    "'{}' has two arrangement items at order {}",
                    self.title, item.order
                )));
            }
            if item.repeat_count == 0 {
                return Err(Error::Catalog(format!(
                    "'{}' arrangement item {} must repeat at least once",
                    self.title, item.order
                )));
            }
        }

        self.ordered_arrangement().map(|_| ())
    }
}

impl Sluggable for Song {
    type Id = SongId;

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn record_id(&self) -> Option<SongId> {
        self.id
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn amazing_grace() -> Song {
        Song::new("Amazing Grace")
            .with_artist("John Newton")
            .with_section("v1", SectionType::Verse, Some("Verse 1"), "Amazing grace")
            .with_section("c", SectionType::Chorus, None, "My chains are gone")
            .with_item("c", 20, 1)
            .with_item("v1", 10, 1)
    }

    #[test]
    fn label_falls_back_to_section_type() {
        let song = amazing_grace();
        assert_eq!(song.sections[0].label(), "Verse 1");
        assert_eq!(song.sections[1].label(), "Chorus");

        let blank = SectionDefinition {
            id: SectionId::from("p"),
            section_type: SectionType::Prechorus,
            name: Some("   ".to_string()),
            lyrics: String::new(),
        };
        assert_eq!(blank.label(), "Pre-Chorus");
    }

    #[test]
    fn arrangement_is_sorted_by_order() {
        let song = amazing_grace();
        let ordered = song.ordered_arrangement().unwrap();
        let keys: Vec<&str> = ordered.iter().map(|(_, s)| s.id.0.as_str()).collect();
        assert_eq!(keys, vec!["v1", "c"]);
    }

    #[test]
    fn validate_rejects_duplicate_orders() {
        let song = amazing_grace().with_item("v1", 10, 1);
        assert!(matches!(song.validate(), Err(Error::Catalog(_))));
    }

    #[test]
    fn validate_rejects_unknown_sections() {
        let song = amazing_grace().with_item("bridge", 30, 1);
        assert!(matches!(song.validate(), Err(Error::Catalog(_))));
    }

    #[test]
    fn blank_catalogue_numbers_are_absent() {
        let song = amazing_grace().with_lsb("  ").with_ccli("22025");
        assert_eq!(song.lsb(), None);
        assert_eq!(song.ccli(), Some("22025"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "title": "Holy, Holy, Holy",
            "artists": ["Reginald Heber"],
            "lsb_number": "507",
            "sections": [{ "id": "v1", "type": "verse", "lyrics": "Holy, holy, holy" }],
            "arrangement": [{ "section": "v1", "order": 1 }]
        }"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert!(song.id.is_none());
        assert!(song.slug.is_empty());
        assert_eq!(song.artist_names(), "Reginald Heber");
        assert_eq!(song.arrangement[0].repeat_count, 1);
        assert!(song.validate().is_ok());
    }
}
