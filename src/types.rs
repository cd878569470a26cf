//! Core type definitions for compile-time safety.
//!
//! Newtype wrappers around record identifiers prevent accidentally mixing
//! song, section and piece ids at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Song record identifier.
    SongId
);

/// Section definition key, unique within its song.
///
/// Sections are referenced by arrangement items, so the key is a short
/// human-authored string (e.g. `"v1"`, `"chorus"`) rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

record_id!(
    /// Percussion piece record identifier.
    PieceId
);

/// Kind of lyric section within a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    /// Verse.
    #[default]
    Verse,
    /// Chorus / refrain.
    Chorus,
    /// Pre-chorus lead-in.
    #[serde(alias = "pre-chorus")]
    Prechorus,
    /// Bridge.
    Bridge,
    /// Short closing tag.
    Tag,
    /// Intro.
    Intro,
    /// Outro.
    Outro,
    /// Instrumental passage.
    Instrumental,
}

impl SectionType {
    /// Returns the human-readable label used on handouts.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Verse => "Verse",
            Self::Chorus => "Chorus",
            Self::Prechorus => "Pre-Chorus",
            Self::Bridge => "Bridge",
            Self::Tag => "Tag",
            Self::Intro => "Intro",
            Self::Outro => "Outro",
            Self::Instrumental => "Instrumental",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn section_type_accepts_both_prechorus_spellings() {
        let a: SectionType = serde_json::from_str("\"prechorus\"").unwrap();
        let b: SectionType = serde_json::from_str("\"pre-chorus\"").unwrap();
        assert_eq!(a, SectionType::Prechorus);
        assert_eq!(b, SectionType::Prechorus);
        assert_eq!(a.display_name(), "Pre-Chorus");
        assert_eq!(SectionType::Instrumental.to_string(), "Instrumental");
    }

    #[test]
    fn ids_serialize_as_bare_uuid_strings() {
        let id = SongId::new_v4();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
