//! `Ministry` - song, devotion and percussion catalog with document export.
//!
//! This crate stores song lyrics with their arrangements, devotions and
//! performance records, and renders songs as `PowerPoint` slide decks and
//! printable two-column PDF handouts.

// Re-export public modules for use in integration tests and as a library
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod lyrics;
pub mod models;
pub mod slug;
pub mod types;
