//! Percussion performance records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::slug::Sluggable;
use crate::types::PieceId;

/// A performer credited on a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Performer {
    /// Display name.
    pub name: String,
}

/// An instrument used in a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument {
    /// Display name.
    pub name: String,
}

/// Category of piece (solo, ensemble, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceType {
    /// Display name.
    pub name: String,
}

const fn default_public() -> bool {
    true
}

/// A performed percussion piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Assigned by the catalog on first save.
    #[serde(default)]
    pub id: Option<PieceId>,
    /// Display title.
    pub title: String,
    /// Composer credit.
    pub composer: String,
    /// Program notes.
    #[serde(default)]
    pub description: String,
    /// Whether the piece is listed publicly.
    #[serde(default = "default_public")]
    pub public: bool,
    /// Performance date, if known.
    #[serde(default)]
    pub date_performed: Option<NaiveDate>,
    /// Performers.
    #[serde(default)]
    pub performers: Vec<Performer>,
    /// Instruments.
    #[serde(default)]
    pub instruments: Vec<Instrument>,
    /// Piece category.
    #[serde(default)]
    pub piece_type: Option<PieceType>,
    /// Link to a recording; empty when there is none.
    #[serde(default)]
    pub recording_url: String,
    /// URL-safe identifier, assigned once on first save.
    #[serde(default)]
    pub slug: String,
}

impl Piece {
    /// Create an unsaved public piece.
    pub fn new(title: impl Into<String>, composer: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            composer: composer.into(),
            description: String::new(),
            public: true,
            date_performed: None,
            performers: Vec::new(),
            instruments: Vec::new(),
            piece_type: None,
            recording_url: String::new(),
            slug: String::new(),
        }
    }

    /// Add an instrument
    #[must_use]
    pub fn with_instrument(mut self, name: &str) -> Self {
        self.instruments.push(Instrument { name: name.to_string() });
        self
    }

    /// Set the piece type
    #[must_use]
    pub fn with_type(mut self, name: &str) -> Self {
        self.piece_type = Some(PieceType {
            name: name.to_string(),
        });
        self
    }

    /// Hide the piece from public listings
    #[must_use]
    pub const fn private(mut self) -> Self {
        self.public = false;
        self
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.composer)
    }
}

impl Sluggable for Piece {
    type Id = PieceId;

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn record_id(&self) -> Option<PieceId> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn displays_title_and_composer() {
        let piece = Piece::new("Rebonds B", "Iannis Xenakis");
        assert_eq!(piece.to_string(), "Rebonds B by Iannis Xenakis");
    }

    #[test]
    fn deserializes_date_and_defaults() {
        let json = r#"{
            "title": "Marimba Spiritual",
            "composer": "Minoru Miki",
            "date_performed": "2024-04-21",
            "instruments": ["Marimba", "Bass Drum"]
        }"#;
        let piece: Piece = serde_json::from_str(json).unwrap();
        assert!(piece.public);
        assert_eq!(piece.date_performed, NaiveDate::from_ymd_opt(2024, 4, 21));
        assert_eq!(piece.instruments.len(), 2);
        assert!(piece.piece_type.is_none());
    }
}
