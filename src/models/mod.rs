//! Catalog data model.
//!
//! Plain records handed to the exporters and the catalog filters. Related
//! collections (artists, sections, arrangement) are always resolved inline.

pub mod devotion;
pub mod piece;
pub mod song;

pub use devotion::Devotion;
pub use piece::{Instrument, Performer, Piece, PieceType};
pub use song::{ArrangementItem, Artist, SectionDefinition, Song, Tag};
