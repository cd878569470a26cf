//! PDF serialization of a handout layout with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::{Error, Result};

use super::metrics::{encode_win_ansi, FontFace};
use super::{HandoutLayout, PageLayout, Rule, TextRun};

pub(super) fn write_pdf(layout: &HandoutLayout) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode().map_err(|e| Error::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let (width, height) = layout.page_size;
    let page_count = i64::try_from(kids.len()).map_err(|e| Error::Pdf(e.to_string()))?;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width),
            Object::Real(height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&layout.title)),
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| Error::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut ops = Vec::new();
    for run in &page.header {
        push_text(&mut ops, run);
    }
    push_rule(&mut ops, &page.divider);
    for run in &page.body {
        push_text(&mut ops, run);
    }
    ops
}

fn push_text(ops: &mut Vec<Operation>, run: &TextRun) {
    ops.extend([
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![run.face.resource_name().into(), Object::Real(run.size)]),
        Operation::new("g", vec![Object::Real(run.gray)]),
        Operation::new("Td", vec![Object::Real(run.x), Object::Real(run.y)]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(&run.text))]),
        Operation::new("ET", vec![]),
    ]);
}

fn push_rule(ops: &mut Vec<Operation>, rule: &Rule) {
    ops.extend([
        Operation::new("q", vec![]),
        Operation::new("w", vec![Object::Real(rule.width)]),
        Operation::new("G", vec![Object::Real(rule.gray)]),
        Operation::new("m", vec![Object::Real(rule.from.0), Object::Real(rule.from.1)]),
        Operation::new("l", vec![Object::Real(rule.to.0), Object::Real(rule.to.1)]),
        Operation::new("S", vec![]),
        Operation::new("Q", vec![]),
    ]);
}
