//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::slides::FONT_NAME;
use crate::error::Result;
use crate::export::handout::{HandoutOptions, PageSize};
use crate::export::slides::SlideOptions;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// Typeface used on slides
    pub slide_font: String,
    /// Handout paper size
    pub page_size: PageSize,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Slide builder options derived from this configuration.
    pub fn slide_options(&self) -> SlideOptions {
        SlideOptions {
            font_name: self.slide_font.clone(),
            ..SlideOptions::default()
        }
    }

    /// Handout builder options derived from this configuration.
    pub fn handout_options(&self) -> HandoutOptions {
        HandoutOptions {
            page_size: self.page_size,
            ..HandoutOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            export_dir: default_export_dir(),
            slide_font: FONT_NAME.to_string(),
            page_size: PageSize::Letter,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables keep their defaults; unrecognized values are
    /// logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = var("MINISTRY_EXPORT_DIR") {
            config.export_dir = PathBuf::from(shellexpand::tilde(dir.trim()).to_string());
        }

        if let Some(font) = var("MINISTRY_SLIDE_FONT") {
            config.slide_font = font.trim().to_string();
        }

        if let Some(page) = var("MINISTRY_HANDOUT_PAGE") {
            match page.parse::<PageSize>() {
                Ok(size) => config.page_size = size,
                Err(e) => tracing::warn!("Ignoring MINISTRY_HANDOUT_PAGE: {e}"),
            }
        }

        config
    }
}

/// `~/Documents/Ministry Exports`, or the working directory when the
/// platform has no documents folder.
fn default_export_dir() -> PathBuf {
    dirs::document_dir().map_or_else(|| PathBuf::from("."), |d| d.join("Ministry Exports"))
}
