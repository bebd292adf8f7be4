// ABOUTME: Inspection module for the slidegen application
// ABOUTME: Reads a .pptx package back into a structural outline of its slides

use crate::document::{PlaceholderKind, RgbColor};
use crate::errors::{Result, SlidegenError};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const SLIDE_REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const NOTES_SLIDE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";

/// Text and formatting of one paragraph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphOutline {
    pub text: String,
    pub bullet: bool,
    /// Size in points, from the first run
    pub size: Option<f64>,
    pub bold: bool,
    pub color: Option<RgbColor>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderOutline {
    pub kind: Option<PlaceholderKind>,
    pub idx: u32,
    pub paragraphs: Vec<ParagraphOutline>,
}

impl PlaceholderOutline {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideOutline {
    pub background: Option<RgbColor>,
    pub placeholders: Vec<PlaceholderOutline>,
    pub notes: Option<String>,
}

impl SlideOutline {
    pub fn title(&self) -> Option<&PlaceholderOutline> {
        self.placeholders
            .iter()
            .find(|p| p.kind.map_or(false, |k| k.is_title()))
    }

    pub fn title_text(&self) -> String {
        self.title().map(PlaceholderOutline::text).unwrap_or_default()
    }

    pub fn placeholder(&self, idx: u32) -> Option<&PlaceholderOutline> {
        self.placeholders.iter().find(|p| p.idx == idx)
    }
}

/// Read the slides of a .pptx file in presentation order
pub fn read_outline(path: &Path) -> Result<Vec<SlideOutline>> {
    let file = fs::File::open(path).map_err(SlidegenError::FileReadError)?;
    read_outline_from(file)
}

pub fn read_outline_from<R: Read + Seek>(reader: R) -> Result<Vec<SlideOutline>> {
    let mut archive = ZipArchive::new(reader)?;

    let rels = parse_relationships(&read_part(&mut archive, "ppt/_rels/presentation.xml.rels")?)?;
    let targets: HashMap<String, String> = rels
        .into_iter()
        .filter(|rel| rel.rel_type == SLIDE_REL_TYPE)
        .map(|rel| (rel.id, rel.target))
        .collect();

    let mut outlines = Vec::new();
    for rel_id in slide_rel_ids(&read_part(&mut archive, "ppt/presentation.xml")?)? {
        let target = targets.get(&rel_id).ok_or_else(|| {
            SlidegenError::PptxError(format!("Slide relationship {} has no target", rel_id))
        })?;
        let slide_path = resolve_target("ppt", target);
        debug!("Reading {}", slide_path);

        let (background, placeholders) = parse_shapes(&read_part(&mut archive, &slide_path)?)?;
        let notes = read_notes(&mut archive, &slide_path)?;
        outlines.push(SlideOutline {
            background,
            placeholders,
            notes,
        });
    }

    Ok(outlines)
}

fn read_notes<R: Read + Seek>(archive: &mut ZipArchive<R>, slide_path: &str) -> Result<Option<String>> {
    let (dir, file_name) = slide_path.rsplit_once('/').unwrap_or(("", slide_path));
    let rels_path = format!("{}/_rels/{}.rels", dir, file_name);
    if archive.by_name(&rels_path).is_err() {
        return Ok(None);
    }

    let notes_rel = parse_relationships(&read_part(archive, &rels_path)?)?
        .into_iter()
        .find(|rel| rel.rel_type == NOTES_SLIDE_REL_TYPE);
    let Some(notes_rel) = notes_rel else {
        return Ok(None);
    };

    let notes_path = resolve_target(dir, &notes_rel.target);
    let (_, placeholders) = parse_shapes(&read_part(archive, &notes_path)?)?;
    Ok(placeholders
        .iter()
        .find(|p| p.kind == Some(PlaceholderKind::Body))
        .map(PlaceholderOutline::text))
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut part = archive
        .by_name(name)
        .map_err(|e| SlidegenError::PptxError(format!("Missing part {}: {}", name, e)))?;
    let mut content = String::new();
    part.read_to_string(&mut content)?;
    Ok(content)
}

/// Resolve a relationship target relative to the directory of its source part
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            other => segments.push(other),
        }
    }
    segments.join("/")
}

struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    let mut relationships = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"Relationship" => {
                relationships.push(Relationship {
                    id: attr_value(e, b"Id").unwrap_or_default(),
                    rel_type: attr_value(e, b"Type").unwrap_or_default(),
                    target: attr_value(e, b"Target").unwrap_or_default(),
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}

/// Relationship IDs of `p:sldId` entries, in presentation order
fn slide_rel_ids(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"sldId" => {
                if let Some(id) = attr_value(e, b"r:id") {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Background color and placeholder shapes of a slide or notes part
fn parse_shapes(xml: &str) -> Result<(Option<RgbColor>, Vec<PlaceholderOutline>)> {
    let mut reader = Reader::from_str(xml);

    let mut background = None;
    let mut shapes = Vec::new();
    let mut shape: Option<PlaceholderOutline> = None;
    let mut paragraph: Option<ParagraphOutline> = None;
    let mut paragraph_styled = false;
    let mut in_background = false;
    let mut in_run_props = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_start = matches!(event, Event::Start(_));
                match e.local_name().as_ref() {
                    b"bg" if is_start => in_background = true,
                    b"sp" if is_start => shape = Some(PlaceholderOutline::default()),
                    b"ph" => {
                        if let Some(shape) = shape.as_mut() {
                            shape.kind = attr_value(e, b"type")
                                .and_then(|t| PlaceholderKind::from_ph_type(&t));
                            shape.idx = attr_value(e, b"idx")
                                .and_then(|idx| idx.parse().ok())
                                .unwrap_or(0);
                        }
                    }
                    // A self-closing a:p only fills an otherwise empty text body
                    b"p" if is_start => {
                        paragraph = Some(ParagraphOutline::default());
                        paragraph_styled = false;
                    }
                    b"buChar" => {
                        if let Some(paragraph) = paragraph.as_mut() {
                            paragraph.bullet = true;
                        }
                    }
                    b"rPr" => {
                        if let Some(paragraph) = paragraph.as_mut() {
                            if !paragraph_styled {
                                paragraph.size = attr_value(e, b"sz")
                                    .and_then(|sz| sz.parse::<f64>().ok())
                                    .map(|sz| sz / 100.0);
                                paragraph.bold =
                                    matches!(attr_value(e, b"b").as_deref(), Some("1" | "true"));
                                paragraph_styled = true;
                                in_run_props = is_start;
                            }
                        }
                    }
                    b"srgbClr" => {
                        let color = attr_value(e, b"val").and_then(|hex| RgbColor::from_hex(&hex));
                        if in_background {
                            background = background.or(color);
                        } else if in_run_props {
                            if let Some(paragraph) = paragraph.as_mut() {
                                paragraph.color = paragraph.color.or(color);
                            }
                        }
                    }
                    b"t" if is_start => in_text = true,
                    b"br" => {
                        if let Some(paragraph) = paragraph.as_mut() {
                            paragraph.text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref t) if in_text => {
                if let Some(paragraph) = paragraph.as_mut() {
                    paragraph.text.push_str(&t.unescape()?);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"bg" => in_background = false,
                b"rPr" => in_run_props = false,
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(shape), Some(paragraph)) = (shape.as_mut(), paragraph.take()) {
                        shape.paragraphs.push(paragraph);
                    }
                }
                b"sp" => {
                    if let Some(shape) = shape.take() {
                        shapes.push(shape);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((background, shapes))
}
