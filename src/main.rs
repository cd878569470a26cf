//! `ministry` - export songs as slide decks and printable handouts.
//!
//! Usage:
//!   `ministry <song.json | directory> [--format slides|handout|all] [--out DIR]`
//!
//! A directory is searched recursively for `*.json` song files. Output goes to
//! `--out`, or to `MINISTRY_EXPORT_DIR` when not given.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

use ministry::catalog::Catalog;
use ministry::config::Config;
use ministry::error::Error;
use ministry::export::{write_export, DocumentExporter, HandoutExporter, SlideDeckExporter};
use ministry::models::Song;

const USAGE: &str =
    "Usage: ministry <song.json | directory> [--format slides|handout|all] [--out DIR]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Slides,
    Handout,
    All,
}

impl Format {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "slides" | "pptx" => Ok(Self::Slides),
            "handout" | "pdf" => Ok(Self::Handout),
            "all" => Ok(Self::All),
            other => bail!("Unknown format '{other}' (expected slides, handout or all)"),
        }
    }

    const fn slides(self) -> bool {
        matches!(self, Self::Slides | Self::All)
    }

    const fn handout(self) -> bool {
        matches!(self, Self::Handout | Self::All)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    format: Format,
    out: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut input = None;
    let mut format = Format::All;
    let mut out = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" | "-f" => {
                let value = args.next().context("--format needs a value")?;
                format = Format::parse(&value)?;
            }
            "--out" | "-o" => {
                out = Some(PathBuf::from(args.next().context("--out needs a directory")?));
            }
            _ if arg.starts_with('-') => bail!("Unknown option '{arg}'"),
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => bail!("Unexpected argument '{arg}'"),
        }
    }

    Ok(Args {
        input: input.context("Missing song file or directory")?,
        format,
        out,
    })
}

/// The song files named by `input`: the file itself, or every `*.json` below
/// a directory in name order.
fn song_files(input: &Path) -> Vec<PathBuf> {
    if !input.is_dir() {
        return vec![input.to_path_buf()];
    }

    WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn load_song(path: &Path) -> ministry::error::Result<Song> {
    let data = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    serde_json::from_str(&data).map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ministry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let config = Config::load()?;
    let out_dir = args.out.unwrap_or_else(|| config.export_dir.clone());

    let mut catalog = Catalog::new();
    for path in song_files(&args.input) {
        let song = load_song(&path).with_context(|| format!("Failed to load {}", path.display()))?;
        catalog
            .save_song(song)
            .with_context(|| format!("Invalid song in {}", path.display()))?;
    }
    if catalog.songs().is_empty() {
        bail!("No song files found in {}", args.input.display());
    }
    info!("Loaded {} songs from {}", catalog.songs().len(), args.input.display());

    let mut exporters: Vec<Box<dyn DocumentExporter>> = Vec::new();
    if args.format.slides() {
        exporters.push(Box::new(SlideDeckExporter::new(config.slide_options())));
    }
    if args.format.handout() {
        exporters.push(Box::new(HandoutExporter::new(config.handout_options())));
    }

    let exporters = &exporters;
    let failures = catalog
        .songs()
        .par_iter()
        .flat_map_iter(|song| exporters.iter().map(move |exporter| (song, exporter)))
        .filter(|(song, exporter)| {
            match exporter.export(song).and_then(|file| write_export(&out_dir, &file)) {
                Ok(path) => {
                    println!("{}", path.display());
                    false
                }
                Err(e) => {
                    error!("{} export of '{}' failed: {e}", exporter.format_name(), song.title);
                    true
                }
            }
        })
        .count();

    if failures > 0 {
        bail!("{failures} export(s) failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(ToString::to_string))
    }

    #[test]
    fn parses_arguments() {
        let parsed = args(&["songs", "--format", "handout", "--out", "/tmp/out"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                input: PathBuf::from("songs"),
                format: Format::Handout,
                out: Some(PathBuf::from("/tmp/out")),
            }
        );
        assert_eq!(args(&["song.json"]).unwrap().format, Format::All);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&[]).is_err());
        assert!(args(&["a", "b"]).is_err());
        assert!(args(&["a", "--format", "docx"]).is_err());
        assert!(args(&["a", "--verbose"]).is_err());
        assert!(args(&["a", "--out"]).is_err());
    }

    #[test]
    fn finds_json_songs_in_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("hymns")).unwrap();
        std::fs::write(dir.path().join("hymns/b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.JSON"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = song_files(dir.path());
        assert_eq!(files, vec![dir.path().join("a.JSON"), dir.path().join("hymns/b.json")]);
    }
}
