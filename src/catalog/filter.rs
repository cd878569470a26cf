//! List filters built from query-string parameters.

use crate::models::{Piece, Song};

/// Song list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    /// Free-text search over title, artists, LSB and CCLI numbers.
    pub q: Option<String>,
    /// Only songs with an LSB number.
    pub lsb_only: bool,
    /// Keep songs credited to any of these artists.
    pub artists: Vec<String>,
    /// Keep songs carrying any of these tags.
    pub tags: Vec<String>,
}

impl SongFilter {
    /// Build a filter from decoded query parameters.
    ///
    /// Recognizes `q`, `lsb_only`, and repeated `artist` / `tag` keys.
    /// Unknown keys (such as `page`) are ignored.
    pub fn from_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut filter = Self::default();
        for (key, value) in params {
            match key {
                "q" => filter.q = non_empty(value),
                "lsb_only" => filter.lsb_only = is_checked(value),
                "artist" => push_non_empty(&mut filter.artists, value),
                "tag" => push_non_empty(&mut filter.tags, value),
                _ => {}
            }
        }
        filter
    }

    /// Whether `song` passes every active criterion.
    pub fn matches(&self, song: &Song) -> bool {
        if let Some(q) = self.q.as_deref().and_then(non_empty) {
            let needle = q.to_lowercase();
            let hit = contains_ci(&song.title, &needle)
                || song.artists.iter().any(|a| contains_ci(&a.name, &needle))
                || song.lsb().is_some_and(|n| contains_ci(n, &needle))
                || song.ccli().is_some_and(|n| contains_ci(n, &needle));
            if !hit {
                return false;
            }
        }

        if self.lsb_only && song.lsb().is_none() {
            return false;
        }

        if !self.artists.is_empty()
            && !song.artists.iter().any(|a| any_eq_ci(&self.artists, &a.name))
        {
            return false;
        }

        if !self.tags.is_empty() && !song.tags.iter().any(|t| any_eq_ci(&self.tags, &t.name)) {
            return false;
        }

        true
    }
}

/// Piece list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceFilter {
    /// Free-text search over title and composer.
    pub q: Option<String>,
    /// Keep pieces using any of these instruments.
    pub instruments: Vec<String>,
    /// Keep pieces of any of these types.
    pub piece_types: Vec<String>,
    /// Hide pieces not marked public.
    pub public_only: bool,
}

impl PieceFilter {
    /// Build a filter from decoded query parameters.
    ///
    /// Recognizes `q`, `public_only`, and repeated `instrument` /
    /// `piece_type` keys.
    pub fn from_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut filter = Self::default();
        for (key, value) in params {
            match key {
                "q" => filter.q = non_empty(value),
                "public_only" => filter.public_only = is_checked(value),
                "instrument" => push_non_empty(&mut filter.instruments, value),
                "piece_type" => push_non_empty(&mut filter.piece_types, value),
                _ => {}
            }
        }
        filter
    }

    /// Whether `piece` passes every active criterion.
    pub fn matches(&self, piece: &Piece) -> bool {
        if self.public_only && !piece.public {
            return false;
        }

        if let Some(q) = self.q.as_deref().and_then(non_empty) {
            let needle = q.to_lowercase();
            if !contains_ci(&piece.title, &needle) && !contains_ci(&piece.composer, &needle) {
                return false;
            }
        }

        if !self.instruments.is_empty()
            && !piece.instruments.iter().any(|i| any_eq_ci(&self.instruments, &i.name))
        {
            return false;
        }

        if !self.piece_types.is_empty()
            && !piece.piece_type.as_ref().is_some_and(|t| any_eq_ci(&self.piece_types, &t.name))
        {
            return false;
        }

        true
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn push_non_empty(list: &mut Vec<String>, value: &str) {
    if let Some(v) = non_empty(value) {
        list.push(v);
    }
}

/// Checkbox semantics: present and not an explicit false.
fn is_checked(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "" | "0" | "false" | "off" | "no")
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn any_eq_ci(wanted: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    wanted.iter().any(|w| w.to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn songs() -> Vec<Song> {
        vec![
            Song::new("Lift High the Cross")
                .with_artist("George Kitchin")
                .with_lsb("837")
                .with_tag("Hymn"),
            Song::new("In Christ Alone")
                .with_artist("Keith Getty")
                .with_artist("Stuart Townend")
                .with_ccli("3350395")
                .with_tag("Contemporary"),
            Song::new("Build My Life").with_artist("Pat Barrett").with_lsb(""),
        ]
    }

    fn titles<'a>(songs: &'a [Song], filter: &SongFilter) -> Vec<&'a str> {
        songs.iter().filter(|s| filter.matches(s)).map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn query_matches_title_artist_and_numbers() {
        let songs = songs();
        let by = |q: &str| SongFilter::from_params([("q", q)]);
        assert_eq!(titles(&songs, &by("cross")), vec!["Lift High the Cross"]);
        assert_eq!(titles(&songs, &by("TOWNEND")), vec!["In Christ Alone"]);
        assert_eq!(titles(&songs, &by("837")), vec!["Lift High the Cross"]);
        assert_eq!(titles(&songs, &by("3350")), vec!["In Christ Alone"]);
        assert_eq!(titles(&songs, &by("   ")).len(), 3);
    }

    #[test]
    fn lsb_only_skips_blank_numbers() {
        let songs = songs();
        let filter = SongFilter::from_params([("lsb_only", "on")]);
        assert_eq!(titles(&songs, &filter), vec!["Lift High the Cross"]);
        let off = SongFilter::from_params([("lsb_only", "false")]);
        assert_eq!(titles(&songs, &off).len(), 3);
    }

    #[test]
    fn artist_and_tag_are_any_of() {
        let songs = songs();
        let filter = SongFilter::from_params([
            ("artist", "pat barrett"),
            ("artist", "Keith Getty"),
            ("page", "2"),
        ]);
        assert_eq!(titles(&songs, &filter), vec!["In Christ Alone", "Build My Life"]);

        let tagged = SongFilter::from_params([("tag", "hymn")]);
        assert_eq!(titles(&songs, &tagged), vec!["Lift High the Cross"]);
    }

    fn piece_titles<'a>(pieces: &'a [Piece], filter: &PieceFilter) -> Vec<&'a str> {
        pieces.iter().filter(|p| filter.matches(p)).map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn piece_filter_matches_composer_and_instrument() {
        let pieces = [
            Piece::new("Rebonds", "Iannis Xenakis")
                .with_instrument("Multi-percussion")
                .with_type("Solo"),
            Piece::new("Ionisation", "Edgard Varese")
                .with_instrument("Sirens")
                .with_type("Ensemble"),
            Piece::new("Private Etude", "Student").with_instrument("Snare Drum").private(),
        ];

        let by_composer = PieceFilter::from_params([("q", "xenakis")]);
        assert_eq!(piece_titles(&pieces, &by_composer), vec!["Rebonds"]);

        let by_instrument = PieceFilter::from_params([("instrument", "sirens")]);
        assert_eq!(piece_titles(&pieces, &by_instrument), vec!["Ionisation"]);

        let by_type = PieceFilter::from_params([("piece_type", "Solo")]);
        assert_eq!(piece_titles(&pieces, &by_type), vec!["Rebonds"]);

        let public = PieceFilter::from_params([("public_only", "1")]);
        assert_eq!(piece_titles(&pieces, &public).len(), 2);
    }
}
