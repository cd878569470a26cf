//! Document export.
//!
//! This module provides the two download formats for a song (a slide deck and
//! a printable handout) behind a common [`DocumentExporter`] trait.

pub mod handout;
pub mod slides;

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::constants;
use crate::constants::slug::DEFAULT_SONG_SLUG;
use crate::error::{Error, Result};
use crate::models::Song;
use crate::slug::base_slug;

use handout::{layout_handout, HandoutOptions};
use slides::{build_deck, SlideOptions};

/// A rendered document ready to be handed to a download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Document bytes.
    pub bytes: Vec<u8>,
    /// Suggested file name: slugified title plus the format suffix.
    pub filename: String,
    /// MIME type.
    pub content_type: &'static str,
}

/// Suggested download name for `title` with `suffix` appended.
pub fn export_filename(title: &str, suffix: &str) -> String {
    format!("{}{suffix}", base_slug(title, DEFAULT_SONG_SLUG))
}

/// Trait for document exporters.
///
/// Each implementation renders a song into one file format. Exporters are
/// stateless beyond their options, so songs can be exported concurrently.
pub trait DocumentExporter: Send + Sync {
    /// Render `song` into a downloadable file.
    ///
    /// # Arguments
    /// * `song` - The song to render; its arrangement decides the content
    ///
    /// # Returns
    /// The rendered file, or an error if the arrangement is inconsistent or
    /// the document could not be written.
    fn export(&self, song: &Song) -> Result<ExportFile>;

    /// Suffix appended to the slugified title (e.g. ".pptx").
    fn file_suffix(&self) -> &'static str;

    /// MIME type of the rendered document.
    fn content_type(&self) -> &'static str;

    /// Get the format name (for display purposes).
    fn format_name(&self) -> &'static str;
}

/// PowerPoint slide deck exporter.
#[derive(Debug, Clone, Default)]
pub struct SlideDeckExporter {
    options: SlideOptions,
}

impl SlideDeckExporter {
    /// Create an exporter with the given slide options.
    pub const fn new(options: SlideOptions) -> Self {
        Self { options }
    }
}

impl DocumentExporter for SlideDeckExporter {
    fn export(&self, song: &Song) -> Result<ExportFile> {
        let deck = build_deck(song, &self.options)?;
        let bytes = deck.to_pptx(Utc::now())?;
        tracing::debug!(
            "Exported {} slides ({} bytes) for '{}'",
            deck.len(),
            bytes.len(),
            song.title
        );

        Ok(ExportFile {
            bytes,
            filename: export_filename(&song.title, self.file_suffix()),
            content_type: self.content_type(),
        })
    }

    fn file_suffix(&self) -> &'static str {
        constants::slides::FILE_SUFFIX
    }

    fn content_type(&self) -> &'static str {
        constants::slides::CONTENT_TYPE
    }

    fn format_name(&self) -> &'static str {
        "Slide deck"
    }
}

/// Two-column PDF handout exporter.
#[derive(Debug, Clone, Default)]
pub struct HandoutExporter {
    options: HandoutOptions,
}

impl HandoutExporter {
    /// Create an exporter with the given page options.
    pub const fn new(options: HandoutOptions) -> Self {
        Self { options }
    }
}

impl DocumentExporter for HandoutExporter {
    fn export(&self, song: &Song) -> Result<ExportFile> {
        let layout = layout_handout(song, &self.options)?;
        let bytes = layout.to_pdf()?;
        tracing::debug!(
            "Exported {} handout pages ({} bytes) for '{}'",
            layout.pages.len(),
            bytes.len(),
            song.title
        );

        Ok(ExportFile {
            bytes,
            filename: export_filename(&song.title, self.file_suffix()),
            content_type: self.content_type(),
        })
    }

    fn file_suffix(&self) -> &'static str {
        constants::handout::FILE_SUFFIX
    }

    fn content_type(&self) -> &'static str {
        constants::handout::CONTENT_TYPE
    }

    fn format_name(&self) -> &'static str {
        "Handout"
    }
}

/// Write `file` into `dir` under its suggested name, creating `dir` if needed.
///
/// Returns the path written.
pub fn write_export(dir: &Path, file: &ExportFile) -> Result<PathBuf> {
    fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;
    let path = dir.join(&file.filename);
    fs_err::write(&path, &file.bytes).map_err(|e| Error::io(e, path.clone()))?;
    tracing::info!("Wrote {} ({} bytes)", path.display(), file.bytes.len());
    Ok(path)
}
