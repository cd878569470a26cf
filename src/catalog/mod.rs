//! In-memory catalog of songs and pieces.
//!
//! Plays the persistence role for the exporters and the command-line tool:
//! records get ids and slugs on first save, and list views are answered
//! through [`filter`] and [`paginate`].

pub mod filter;
pub mod paginate;

use crate::constants::catalog::PAGE_SIZE;
use crate::constants::slug::{DEFAULT_PIECE_SLUG, DEFAULT_SONG_SLUG};
use crate::error::{Error, Result};
use crate::models::{Piece, Song};
use crate::slug::{assign_slug_on_save, SlugIndex};
use crate::types::{PieceId, SongId};

pub use filter::{PieceFilter, SongFilter};
pub use paginate::{paginate, Page};

/// A filtered, paginated list of records.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    /// The requested page of matches.
    pub page: Page<T>,
    /// Number of records in the catalog.
    pub total_count: usize,
    /// Number of records matching the filter.
    pub filtered_count: usize,
}

/// Songs and pieces held in memory.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    songs: Vec<Song>,
    pieces: Vec<Piece>,
}

impl SlugIndex<SongId> for [Song] {
    fn slug_taken(&self, slug: &str, exclude: Option<SongId>) -> bool {
        self.iter().any(|s| s.slug == slug && (exclude.is_none() || s.id != exclude))
    }
}

impl SlugIndex<PieceId> for [Piece] {
    fn slug_taken(&self, slug: &str, exclude: Option<PieceId>) -> bool {
        self.iter().any(|p| p.slug == slug && (exclude.is_none() || p.id != exclude))
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// All songs in insertion order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// All pieces in insertion order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Insert or update a song, returning its id.
    ///
    /// A new song gets an id; a song without a slug gets a unique one. The
    /// slug of an already-slugged song is never changed.
    pub fn save_song(&mut self, mut song: Song) -> Result<SongId> {
        song.validate()?;
        self.check_catalogue_numbers(&song)?;

        assign_slug_on_save(&mut song, DEFAULT_SONG_SLUG, self.songs.as_slice());
        if self.songs.as_slice().slug_taken(&song.slug, song.id) {
            return Err(Error::Catalog(format!("slug '{}' is already in use", song.slug)));
        }

        let id = *song.id.get_or_insert_with(SongId::new_v4);
        tracing::debug!("Saving song '{}' as {id}", song.title);
        match self.songs.iter_mut().find(|s| s.id == Some(id)) {
            Some(existing) => *existing = song,
            None => self.songs.push(song),
        }
        Ok(id)
    }

    /// Insert or update a piece, returning its id.
    pub fn save_piece(&mut self, mut piece: Piece) -> Result<PieceId> {
        assign_slug_on_save(&mut piece, DEFAULT_PIECE_SLUG, self.pieces.as_slice());
        if self.pieces.as_slice().slug_taken(&piece.slug, piece.id) {
            return Err(Error::Catalog(format!("slug '{}' is already in use", piece.slug)));
        }

        let id = *piece.id.get_or_insert_with(PieceId::new_v4);
        tracing::debug!("Saving piece '{}' as {id}", piece.title);
        match self.pieces.iter_mut().find(|p| p.id == Some(id)) {
            Some(existing) => *existing = piece,
            None => self.pieces.push(piece),
        }
        Ok(id)
    }

    /// Look up a song by id.
    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == Some(id))
    }

    /// Look up a song by slug.
    pub fn song_by_slug(&self, slug: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.slug == slug)
    }

    /// Look up a piece by id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == Some(id))
    }

    /// Look up a piece by slug.
    pub fn piece_by_slug(&self, slug: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.slug == slug)
    }

    /// Songs matching `filter`, sorted by title, paginated.
    pub fn list_songs(&self, filter: &SongFilter, page: Option<&str>) -> Listing<&Song> {
        let mut matches: Vec<&Song> = self.songs.iter().filter(|s| filter.matches(s)).collect();
        matches.sort_by_cached_key(|s| s.title.to_lowercase());
        let filtered_count = matches.len();
        Listing {
            page: paginate(matches, page, PAGE_SIZE),
            total_count: self.songs.len(),
            filtered_count,
        }
    }

    /// Pieces matching `filter`, sorted by title, paginated.
    pub fn list_pieces(&self, filter: &PieceFilter, page: Option<&str>) -> Listing<&Piece> {
        let mut matches: Vec<&Piece> = self.pieces.iter().filter(|p| filter.matches(p)).collect();
        matches.sort_by_cached_key(|p| p.title.to_lowercase());
        let filtered_count = matches.len();
        Listing {
            page: paginate(matches, page, PAGE_SIZE),
            total_count: self.pieces.len(),
            filtered_count,
        }
    }

    /// LSB and CCLI numbers must be unique among songs when present.
    fn check_catalogue_numbers(&self, song: &Song) -> Result<()> {
        let others = self.songs.iter().filter(|s| song.id.is_none() || s.id != song.id);
        for other in others {
            if song.lsb().is_some() && song.lsb() == other.lsb() {
                return Err(Error::Catalog(format!(
                    "LSB {} is already used by '{}'",
                    other.lsb().unwrap_or_default(),
                    other.title
                )));
            }
            if song.ccli().is_some() && song.ccli() == other.ccli() {
                return Err(Error::Catalog(format!(
                    "CCLI {} is already used by '{}'",
                    other.ccli().unwrap_or_default(),
                    other.title
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::SectionType;

    #[test]
    fn same_title_gets_suffixed_slug() {
        let mut catalog = Catalog::new();
        let first = catalog.save_song(Song::new("Abide With Me")).unwrap();
        let second = catalog.save_song(Song::new("Abide with me!")).unwrap();

        assert_eq!(catalog.song(first).unwrap().slug, "abide-with-me");
        assert_eq!(catalog.song(second).unwrap().slug, "abide-with-me-2");
    }

    #[test]
    fn resave_keeps_slug_after_rename() {
        let mut catalog = Catalog::new();
        let id = catalog.save_song(Song::new("Abide With Me")).unwrap();

        let mut song = catalog.song(id).unwrap().clone();
        song.title = "Abide With Me (Monk)".to_string();
        assert_eq!(catalog.save_song(song).unwrap(), id);

        assert_eq!(catalog.songs().len(), 1);
        assert_eq!(catalog.song(id).unwrap().slug, "abide-with-me");
        assert_eq!(catalog.song_by_slug("abide-with-me").unwrap().title, "Abide With Me (Monk)");
    }

    #[test]
    fn untitled_records_use_default_slugs() {
        let mut catalog = Catalog::new();
        let song = catalog.save_song(Song::new("???")).unwrap();
        let piece = catalog.save_piece(Piece::new("", "Anonymous")).unwrap();
        let piece2 = catalog.save_piece(Piece::new("...", "Anonymous")).unwrap();

        assert_eq!(catalog.song(song).unwrap().slug, "song");
        assert_eq!(catalog.piece(piece).unwrap().slug, "piece");
        assert_eq!(catalog.piece(piece2).unwrap().slug, "piece-2");
    }

    #[test]
    fn songs_and_pieces_have_independent_slugs() {
        let mut catalog = Catalog::new();
        catalog.save_song(Song::new("Gloria")).unwrap();
        let piece = catalog.save_piece(Piece::new("Gloria", "Vivaldi")).unwrap();
        assert_eq!(catalog.piece(piece).unwrap().slug, "gloria");
    }

    #[test]
    fn duplicate_catalogue_numbers_are_rejected() {
        let mut catalog = Catalog::new();
        catalog.save_song(Song::new("A Mighty Fortress").with_lsb("656")).unwrap();
        let err = catalog.save_song(Song::new("Other").with_lsb("656")).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));

        catalog.save_song(Song::new("Blank LSB").with_lsb("")).unwrap();
        catalog.save_song(Song::new("Blank LSB too").with_lsb("")).unwrap();
    }

    #[test]
    fn invalid_songs_are_not_saved() {
        let mut catalog = Catalog::new();
        let song = Song::new("Broken")
            .with_section("v1", SectionType::Verse, None, "text")
            .with_item("v2", 1, 1);
        assert!(catalog.save_song(song).is_err());
        assert!(catalog.songs().is_empty());
    }

    #[test]
    fn list_songs_sorts_and_counts() {
        let mut catalog = Catalog::new();
        for title in ["Zion", "amazing grace", "Be Still"] {
            catalog.save_song(Song::new(title)).unwrap();
        }
        let filter = SongFilter {
            q: Some("e".to_string()),
            ..SongFilter::default()
        };
        let listing = catalog.list_songs(&filter, None);

        let titles: Vec<&str> = listing.page.items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["amazing grace", "Be Still"]);
        assert_eq!(listing.total_count, 3);
        assert_eq!(listing.filtered_count, 2);
    }
}
