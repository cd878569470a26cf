//! Integration tests for slide deck and handout export.
//!
//! Exports are read back with `zip` and `lopdf` to check what a presentation
//! or PDF viewer would see.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::io::{Cursor, Read};

use ministry::catalog::Catalog;
use ministry::export::handout::{layout_handout, HandoutOptions, PageSize};
use ministry::export::{write_export, DocumentExporter, HandoutExporter, SlideDeckExporter};
use ministry::models::Song;

const SONG_JSON: &str = r#"{
    "title": "Be Thou My Vision",
    "artists": ["Dallan Forgaill", "Eleanor Hull"],
    "lsb_number": "",
    "ccli_number": "30639",
    "sections": [
        {"id": "v1", "type": "verse", "name": "Verse 1",
         "lyrics": "Be Thou my vision\r\nO Lord of my heart\r\n\r\nNaught be all else to me"},
        {"id": "r", "type": "pre-chorus", "lyrics": "Heart of my own heart & whatever befall"}
    ],
    "arrangement": [
        {"section": "r", "order": 2, "repeat_count": 2},
        {"section": "v1", "order": 1}
    ]
}"#;

fn song() -> Song {
    serde_json::from_str(SONG_JSON).unwrap()
}

fn read_part(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn pptx_package_contains_every_slide() {
    let file = SlideDeckExporter::default().export(&song()).unwrap();
    assert_eq!(file.filename, "be-thou-my-vision.pptx");

    let mut archive = zip::ZipArchive::new(Cursor::new(file.bytes)).unwrap();
    let slide_count = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count();
    // Title, blank, two verse blocks, then the pre-chorus twice.
    assert_eq!(slide_count, 6);

    assert!(read_part(&mut archive, "[Content_Types].xml").contains("/ppt/slides/slide6.xml"));
    assert!(read_part(&mut archive, "ppt/slides/slide1.xml").contains("Be Thou My Vision"));
    assert!(!read_part(&mut archive, "ppt/slides/slide2.xml").contains("<a:t>"));

    let first_verse = read_part(&mut archive, "ppt/slides/slide3.xml");
    assert!(first_verse.contains("<a:t>Be Thou my vision</a:t>"));
    assert!(first_verse.contains("<a:t>O Lord of my heart</a:t>"));
    assert!(read_part(&mut archive, "ppt/slides/slide6.xml").contains("own heart &amp; whatever"));
    assert!(read_part(&mut archive, "docProps/core.xml")
        .contains("<dc:title>Be Thou My Vision</dc:title>"));
}

#[test]
fn handout_pdf_loads_with_expected_pages() {
    let options = HandoutOptions {
        page_size: PageSize::A4,
        ..HandoutOptions::default()
    };
    let file = HandoutExporter::new(options).export(&song()).unwrap();
    assert_eq!(file.filename, "be-thou-my-vision-handout.pdf");

    let doc = lopdf::Document::load_mem(&file.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn handout_layout_reemits_repeats_in_order() {
    let layout = layout_handout(&song(), &HandoutOptions::default()).unwrap();
    assert_eq!(layout.labels(), vec!["Verse 1", "Pre-Chorus", "Pre-Chorus"]);

    let meta = &layout.pages[0].header[1].text;
    assert_eq!(meta, "Dallan Forgaill, Eleanor Hull \u{2022} CCLI 30639");
}

#[test]
fn catalog_slugs_drive_distinct_exports() {
    let mut catalog = Catalog::new();
    let first = catalog.save_song(song()).unwrap();
    let mut copy = song();
    copy.ccli_number = None;
    let second = catalog.save_song(copy).unwrap();

    assert_eq!(catalog.song(first).unwrap().slug, "be-thou-my-vision");
    assert_eq!(catalog.song(second).unwrap().slug, "be-thou-my-vision-2");
    assert!(catalog.song_by_slug("be-thou-my-vision-2").is_some());
}

#[test]
fn exports_are_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let exporters: Vec<Box<dyn DocumentExporter>> =
        vec![Box::new(SlideDeckExporter::default()), Box::new(HandoutExporter::default())];

    for exporter in &exporters {
        let file = exporter.export(&song()).unwrap();
        let path = write_export(dir.path(), &file).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), file.bytes.len() as u64);
    }

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["be-thou-my-vision-handout.pdf", "be-thou-my-vision.pptx"]);
}
