//! Office Open XML packaging for slide decks.
//!
//! Writes the zip container with one `ppt/slides/slideN.xml` part per slide
//! plus the shared master, layout and theme.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::parts::{
    CT_CORE_PROPERTIES, CT_EXTENDED_PROPERTIES, CT_PRESENTATION, CT_PRES_PROPS, CT_RELS, CT_SLIDE,
    CT_SLIDE_LAYOUT, CT_SLIDE_MASTER, CT_TABLE_STYLES, CT_THEME, CT_VIEW_PROPS, NS_A,
    NS_CONTENT_TYPES, NS_P, NS_R, NS_RELS, PRES_PROPS, REL_CORE_PROPERTIES,
    REL_EXTENDED_PROPERTIES, REL_OFFICE_DOCUMENT, REL_PRES_PROPS, REL_SLIDE, REL_SLIDE_MASTER,
    REL_TABLE_STYLES, REL_THEME, REL_VIEW_PROPS, SLIDE_LAYOUT, SLIDE_LAYOUT_RELS, SLIDE_MASTER,
    SLIDE_MASTER_RELS, SLIDE_RELS, TABLE_STYLES, THEME, VIEW_PROPS,
};
use super::{Deck, Slide, SlideKind, SlideOptions};
use crate::constants::slides::{MARGIN_X, MARGIN_Y, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::error::Result;

/// Relationship ids of the fixed presentation parts; slides follow.
const FIXED_PRESENTATION_RELS: usize = 5;

/// First id PowerPoint accepts in a slide id list.
const FIRST_SLIDE_ID: usize = 256;

/// Thin event-level XML writer over an in-memory buffer.
struct Xml {
    writer: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Write `deck` as a `.pptx` package.
pub fn write_pptx(deck: &Deck, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut add = |name: &str, data: &[u8]| -> Result<()> {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
        Ok(())
    };

    add("[Content_Types].xml", &content_types(deck.len())?)?;
    add("_rels/.rels", &root_rels()?)?;
    add("docProps/core.xml", &core_properties(&deck.title, generated_at)?)?;
    add("docProps/app.xml", &app_properties(deck.len())?)?;
    add("ppt/presentation.xml", &presentation(deck.len())?)?;
    add("ppt/_rels/presentation.xml.rels", &presentation_rels(deck.len())?)?;
    add("ppt/presProps.xml", PRES_PROPS.as_bytes())?;
    add("ppt/viewProps.xml", VIEW_PROPS.as_bytes())?;
    add("ppt/tableStyles.xml", TABLE_STYLES.as_bytes())?;
    add("ppt/theme/theme1.xml", THEME.as_bytes())?;
    add("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
    add("ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS.as_bytes())?;
    add("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
    add("ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS.as_bytes())?;

    for (i, slide) in deck.slides.iter().enumerate() {
        let n = i + 1;
        add(&format!("ppt/slides/slide{n}.xml"), &slide_part(slide, n, &deck.options)?)?;
        add(&format!("ppt/slides/_rels/slide{n}.xml.rels"), SLIDE_RELS.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn content_types(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

    let overrides = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/viewProps.xml", CT_VIEW_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/docProps/core.xml", CT_CORE_PROPERTIES),
        ("/docProps/app.xml", CT_EXTENDED_PROPERTIES),
    ];
    for (part, content_type) in overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    for n in 1..=slide_count {
        let part = format!("/ppt/slides/slide{n}.xml");
        xml.empty("Override", &[("PartName", part.as_str()), ("ContentType", CT_SLIDE)])?;
    }

    xml.close("Types")?;
    Ok(xml.finish())
}

fn relationships(rels: &[(String, &str, String)]) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open("Relationships", &[("xmlns", NS_RELS)])?;
    for (id, kind, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *kind), ("Target", target.as_str())],
        )?;
    }
    xml.close("Relationships")?;
    Ok(xml.finish())
}

fn root_rels() -> Result<Vec<u8>> {
    relationships(&[
        ("rId1".to_string(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
        ("rId2".to_string(), REL_CORE_PROPERTIES, "docProps/core.xml".to_string()),
        ("rId3".to_string(), REL_EXTENDED_PROPERTIES, "docProps/app.xml".to_string()),
    ])
}

fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![
        ("rId1".to_string(), REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml".to_string()),
        ("rId2".to_string(), REL_THEME, "theme/theme1.xml".to_string()),
        ("rId3".to_string(), REL_PRES_PROPS, "presProps.xml".to_string()),
        ("rId4".to_string(), REL_VIEW_PROPS, "viewProps.xml".to_string()),
        ("rId5".to_string(), REL_TABLE_STYLES, "tableStyles.xml".to_string()),
    ];
    rels.extend((1..=slide_count).map(|n| {
        (format!("rId{}", FIXED_PRESENTATION_RELS + n), REL_SLIDE, format!("slides/slide{n}.xml"))
    }));
    relationships(&rels)
}

fn presentation(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open(
        "p:presentation",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P), ("saveSubsetFonts", "1")],
    )?;

    xml.open("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.close("p:sldMasterIdLst")?;

    xml.open("p:sldIdLst", &[])?;
    for n in 1..=slide_count {
        let id = (FIRST_SLIDE_ID + n - 1).to_string();
        let rid = format!("rId{}", FIXED_PRESENTATION_RELS + n);
        xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rid.as_str())])?;
    }
    xml.close("p:sldIdLst")?;

    let (cx, cy) = (SLIDE_WIDTH.to_string(), SLIDE_HEIGHT.to_string());
    xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;

    xml.close("p:presentation")?;
    Ok(xml.finish())
}

fn core_properties(title: &str, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let stamp = generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = Xml::new()?;
    xml.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], title)?;
    xml.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    xml.text_element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    xml.close("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_properties(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open(
        "Properties",
        &[
            ("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"),
            ("xmlns:vt", "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"),
        ],
    )?;
    xml.text_element("Application", &[], env!("CARGO_PKG_NAME"))?;
    xml.text_element("Slides", &[], &slide_count.to_string())?;
    xml.close("Properties")?;
    Ok(xml.finish())
}

fn group_shape_header(xml: &mut Xml) -> Result<()> {
    xml.open("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvGrpSpPr")?;

    xml.open("p:grpSpPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.close("a:xfrm")?;
    xml.close("p:grpSpPr")
}

fn solid_fill(xml: &mut Xml, rgb: &str) -> Result<()> {
    xml.open("a:solidFill", &[])?;
    xml.empty("a:srgbClr", &[("val", rgb)])?;
    xml.close("a:solidFill")
}

/// Full-slide text box inset by the margins, text centered both ways.
fn centered_text_box(xml: &mut Xml, slide: &Slide, options: &SlideOptions) -> Result<()> {
    let (x, y) = (MARGIN_X.to_string(), MARGIN_Y.to_string());
    let cx = (SLIDE_WIDTH - 2 * MARGIN_X).to_string();
    let cy = (SLIDE_HEIGHT - 2 * MARGIN_Y).to_string();
    // Run sizes are in hundredths of a point.
    let size = (slide.font_size * 100).to_string();

    xml.open("p:sp", &[])?;
    xml.open("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "2"), ("name", "TextBox 1")])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvSpPr")?;

    xml.open("p:spPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    xml.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.close("a:xfrm")?;
    xml.open("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.close("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.close("p:spPr")?;

    xml.open("p:txBody", &[])?;
    xml.empty(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("lIns", "0"),
            ("tIns", "0"),
            ("rIns", "0"),
            ("bIns", "0"),
            ("anchor", "ctr"),
        ],
    )?;
    xml.empty("a:lstStyle", &[])?;

    for line in &slide.lines {
        xml.open("a:p", &[])?;
        xml.open("a:pPr", &[("algn", "ctr")])?;
        xml.open("a:lnSpc", &[])?;
        xml.empty("a:spcPct", &[("val", "100000")])?;
        xml.close("a:lnSpc")?;
        xml.open("a:spcBef", &[])?;
        xml.empty("a:spcPts", &[("val", "0")])?;
        xml.close("a:spcBef")?;
        xml.open("a:spcAft", &[])?;
        xml.empty("a:spcPts", &[("val", "0")])?;
        xml.close("a:spcAft")?;
        xml.close("a:pPr")?;

        let run_props = [("lang", "en-US"), ("sz", size.as_str()), ("dirty", "0")];
        if line.is_empty() {
            xml.empty("a:endParaRPr", &run_props)?;
        } else {
            xml.open("a:r", &[])?;
            xml.open("a:rPr", &run_props)?;
            solid_fill(xml, &options.foreground)?;
            xml.empty("a:latin", &[("typeface", options.font_name.as_str())])?;
            xml.close("a:rPr")?;
            xml.text_element("a:t", &[], line)?;
            xml.close("a:r")?;
        }
        xml.close("a:p")?;
    }

    xml.close("p:txBody")?;
    xml.close("p:sp")
}

fn slide_part(slide: &Slide, number: usize, options: &SlideOptions) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    let name = format!("Slide {number}");
    xml.open("p:cSld", &[("name", name.as_str())])?;

    xml.open("p:bg", &[])?;
    xml.open("p:bgPr", &[])?;
    solid_fill(&mut xml, &options.background)?;
    xml.empty("a:effectLst", &[])?;
    xml.close("p:bgPr")?;
    xml.close("p:bg")?;

    xml.open("p:spTree", &[])?;
    group_shape_header(&mut xml)?;
    if slide.kind != SlideKind::Blank && !slide.lines.is_empty() {
        centered_text_box(&mut xml, slide, options)?;
    }
    xml.close("p:spTree")?;
    xml.close("p:cSld")?;

    xml.open("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.close("p:clrMapOvr")?;
    xml.close("p:sld")?;
    Ok(xml.finish())
}
