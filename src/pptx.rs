// ABOUTME: PPTX packaging module for the slidegen application
// ABOUTME: Serializes a Presentation into an Office Open XML zip package

use crate::document::{Paragraph, Placeholder, Presentation, Slide};
use crate::errors::{Result, SlidegenError};
use crate::template::{
    self, GROUP_SHAPE_HEADER, NOTES_BODY_IDX, NOTES_SLIDE_IMAGE_IDX, NS_DECLS, SLIDE_MASTER_ID,
    XML_DECL,
};
use log::{debug, info};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use zip::{write::FileOptions, ZipWriter};

/// First `p:sldId/@id` value allowed by the format
const FIRST_SLIDE_ID: usize = 256;

/// Relationship IDs in `ppt/_rels/presentation.xml.rels` before the slides
const PRESENTATION_FIXED_RELS: usize = 5;

/// Write `presentation` to `output_file` as a .pptx package
pub fn write_package(presentation: &Presentation, output_file: &Path) -> Result<()> {
    info!("Writing PPTX package to {:?}", output_file);

    let file = fs::File::create(output_file).map_err(|e| {
        SlidegenError::PptxError(format!("Failed to create {:?}: {}", output_file, e))
    })?;
    let mut zip = ZipWriter::new(file);

    let slides = presentation.slides();
    let layouts = presentation.layouts();
    let size = presentation.slide_size();
    let has_notes = slides.iter().any(|s| s.notes().is_some());

    write_part(&mut zip, "[Content_Types].xml", &content_types_xml(presentation))?;
    write_part(&mut zip, "_rels/.rels", &root_rels_xml())?;
    write_part(&mut zip, "docProps/app.xml", &app_xml(presentation))?;
    write_part(&mut zip, "docProps/core.xml", &core_xml(presentation))?;

    write_part(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels_xml(slides.len(), has_notes),
    )?;
    write_part(
        &mut zip,
        "ppt/presentation.xml",
        &presentation_xml(presentation, has_notes),
    )?;
    write_part(&mut zip, "ppt/presProps.xml", &template::pres_props_xml())?;
    write_part(&mut zip, "ppt/viewProps.xml", &template::view_props_xml())?;
    write_part(&mut zip, "ppt/tableStyles.xml", &template::table_styles_xml())?;
    write_part(&mut zip, "ppt/theme/theme1.xml", &template::theme_xml("Office Theme"))?;

    write_part(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        &template::slide_master_xml(layouts.len(), size),
    )?;
    write_part(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &template::slide_master_rels_xml(layouts.len()),
    )?;
    for (i, layout) in layouts.iter().enumerate() {
        write_part(
            &mut zip,
            &format!("ppt/slideLayouts/slideLayout{}.xml", i + 1),
            &template::slide_layout_xml(layout, size),
        )?;
        write_part(
            &mut zip,
            &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
            &template::slide_layout_rels_xml(),
        )?;
    }

    if has_notes {
        write_part(&mut zip, "ppt/theme/theme2.xml", &template::theme_xml("Office Theme"))?;
        write_part(
            &mut zip,
            "ppt/notesMasters/notesMaster1.xml",
            &template::notes_master_xml(),
        )?;
        write_part(
            &mut zip,
            "ppt/notesMasters/_rels/notesMaster1.xml.rels",
            &template::notes_master_rels_xml(),
        )?;
    }

    for (i, slide) in slides.iter().enumerate() {
        let slide_num = i + 1;
        debug!("Serializing slide {}", slide_num);

        write_part(
            &mut zip,
            &format!("ppt/slides/slide{}.xml", slide_num),
            &slide_xml(slide),
        )?;
        write_part(
            &mut zip,
            &format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            &slide_rels_xml(slide, slide_num),
        )?;

        if let Some(notes) = slide.notes() {
            write_part(
                &mut zip,
                &format!("ppt/notesSlides/notesSlide{}.xml", slide_num),
                &notes_slide_xml(notes),
            )?;
            write_part(
                &mut zip,
                &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", slide_num),
                &notes_slide_rels_xml(slide_num),
            )?;
        }
    }

    info!("Finalizing PPTX file");
    zip.finish()?;

    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

/// Escape text for an XML text node or attribute value.
///
/// Control characters that XML 1.0 forbids are written as `_xHHHH_`, the
/// OOXML escape for characters that cannot appear literally.
pub fn escape_text(text: &str) -> String {
    let escaped = escape(text);
    if !escaped.chars().any(is_forbidden_xml_char) {
        return escaped.into_owned();
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        if is_forbidden_xml_char(c) {
            // Writing to a String cannot fail
            let _ = write!(out, "_x{:04X}_", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

fn is_forbidden_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn write_part<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, content: &str) -> Result<()> {
    debug!("Creating PPTX part: {}", name);
    zip.start_file(name, FileOptions::default())?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn content_types_xml(presentation: &Presentation) -> String {
    let mut overrides = vec![
        override_xml("/ppt/presentation.xml", "presentationml.presentation.main+xml"),
        override_xml("/ppt/presProps.xml", "presentationml.presProps+xml"),
        override_xml("/ppt/viewProps.xml", "presentationml.viewProps+xml"),
        override_xml("/ppt/tableStyles.xml", "presentationml.tableStyles+xml"),
        override_xml("/ppt/theme/theme1.xml", "theme+xml"),
        override_xml("/ppt/slideMasters/slideMaster1.xml", "presentationml.slideMaster+xml"),
        override_xml("/docProps/app.xml", "extended-properties+xml"),
    ];
    overrides.push(
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#
            .to_string(),
    );
    for i in 0..presentation.layouts().len() {
        overrides.push(override_xml(
            &format!("/ppt/slideLayouts/slideLayout{}.xml", i + 1),
            "presentationml.slideLayout+xml",
        ));
    }

    let mut has_notes = false;
    for (i, slide) in presentation.slides().iter().enumerate() {
        overrides.push(override_xml(
            &format!("/ppt/slides/slide{}.xml", i + 1),
            "presentationml.slide+xml",
        ));
        if slide.notes().is_some() {
            has_notes = true;
            overrides.push(override_xml(
                &format!("/ppt/notesSlides/notesSlide{}.xml", i + 1),
                "presentationml.notesSlide+xml",
            ));
        }
    }
    if has_notes {
        overrides.push(override_xml("/ppt/theme/theme2.xml", "theme+xml"));
        overrides.push(override_xml(
            "/ppt/notesMasters/notesMaster1.xml",
            "presentationml.notesMaster+xml",
        ));
    }

    format!(
        r#"{}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>{}</Types>"#,
        XML_DECL,
        overrides.join("")
    )
}

fn override_xml(part_name: &str, content_type_suffix: &str) -> String {
    format!(
        r#"<Override PartName="{}" ContentType="application/vnd.openxmlformats-officedocument.{}"/>"#,
        part_name, content_type_suffix
    )
}

fn root_rels_xml() -> String {
    template::relationships_xml(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
    )
}

fn app_xml(presentation: &Presentation) -> String {
    let notes = presentation
        .slides()
        .iter()
        .filter(|s| s.notes().is_some())
        .count();
    format!(
        r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>{}</Application><Slides>{}</Slides><Notes>{}</Notes></Properties>"#,
        XML_DECL,
        escape_text(presentation.application()),
        presentation.slides().len(),
        notes
    )
}

fn core_xml(presentation: &Presentation) -> String {
    format!(
        r#"{}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created><cp:revision>1</cp:revision></cp:coreProperties>"#,
        XML_DECL,
        escape_text(presentation.title().unwrap_or_default()),
        escape_text(presentation.application()),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

fn presentation_rels_xml(slide_count: usize, has_notes: bool) -> String {
    let mut rels = String::from(concat!(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#,
        r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>"#,
        r#"<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps" Target="viewProps.xml"/>"#,
        r#"<Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles" Target="tableStyles.xml"/>"#,
    ));

    for i in 0..slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            PRESENTATION_FIXED_RELS + 1 + i,
            i + 1
        ));
    }
    if has_notes {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster" Target="notesMasters/notesMaster1.xml"/>"#,
            notes_master_rel_id(slide_count)
        ));
    }
    template::relationships_xml(&rels)
}

fn notes_master_rel_id(slide_count: usize) -> usize {
    PRESENTATION_FIXED_RELS + slide_count + 1
}

fn presentation_xml(presentation: &Presentation, has_notes: bool) -> String {
    let slide_count = presentation.slides().len();
    let size = presentation.slide_size();

    let notes_master = if has_notes {
        format!(
            r#"<p:notesMasterIdLst><p:notesMasterId r:id="rId{}"/></p:notesMasterIdLst>"#,
            notes_master_rel_id(slide_count)
        )
    } else {
        String::new()
    };

    let slide_ids = (0..slide_count)
        .map(|i| {
            format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + i,
                PRESENTATION_FIXED_RELS + 1 + i
            )
        })
        .collect::<String>();

    format!(
        r#"{decl}
<p:presentation {ns} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="{master_id}" r:id="rId1"/></p:sldMasterIdLst>{notes_master}<p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{cx}" cy="{cy}" type="{size_type}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        decl = XML_DECL,
        ns = NS_DECLS,
        master_id = SLIDE_MASTER_ID,
        notes_master = notes_master,
        slide_ids = slide_ids,
        cx = size.cx,
        cy = size.cy,
        size_type = size.type_name(),
    )
}

fn slide_xml(slide: &Slide) -> String {
    let background = slide
        .background()
        .map(|color| {
            format!(
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                color.to_hex()
            )
        })
        .unwrap_or_default();

    let shapes = slide
        .placeholders()
        .iter()
        .enumerate()
        .map(|(i, placeholder)| placeholder_shape_xml(placeholder, i + 2))
        .collect::<String>();

    format!(
        r#"{decl}
<p:sld {ns}><p:cSld>{background}<p:spTree>{grp}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        decl = XML_DECL,
        ns = NS_DECLS,
        background = background,
        grp = GROUP_SHAPE_HEADER,
        shapes = shapes,
    )
}

fn placeholder_shape_xml(placeholder: &Placeholder, shape_id: usize) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        shape_id,
        escape_text(placeholder.name()),
        template::ph_element(placeholder.kind(), placeholder.idx()),
        paragraphs_xml(placeholder.text_frame().paragraphs())
    )
}

/// `a:p` elements for a text body, which must hold at least one paragraph
fn paragraphs_xml(paragraphs: &[Paragraph]) -> String {
    if paragraphs.is_empty() {
        return "<a:p/>".to_string();
    }
    paragraphs.iter().map(paragraph_xml).collect()
}

fn paragraph_xml(paragraph: &Paragraph) -> String {
    let mut xml = String::from("<a:p>");

    let bullet = match paragraph.bullet {
        Some(true) => r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
        Some(false) => "<a:buNone/>",
        None => "",
    };
    let level = if paragraph.level() > 0 {
        format!(r#" lvl="{}""#, paragraph.level())
    } else {
        String::new()
    };
    if !bullet.is_empty() {
        xml.push_str(&format!("<a:pPr{}>{}</a:pPr>", level, bullet));
    } else if !level.is_empty() {
        xml.push_str(&format!("<a:pPr{}/>", level));
    }

    // Newlines and vertical tabs inside a paragraph become a:br, each carrying the run properties
    let text = paragraph.text();
    if !text.is_empty() {
        for (i, line) in text.split(|c: char| c == '\n' || c == '\u{B}').enumerate() {
            if i > 0 {
                xml.push_str(&format!("<a:br>{}</a:br>", run_properties_xml("a:rPr", paragraph)));
            }
            if !line.is_empty() {
                xml.push_str(&format!(
                    "<a:r>{}<a:t>{}</a:t></a:r>",
                    run_properties_xml("a:rPr", paragraph),
                    escape_text(line)
                ));
            }
        }
    }

    xml.push_str(&run_properties_xml("a:endParaRPr", paragraph));
    xml.push_str("</a:p>");
    xml
}

fn run_properties_xml(tag: &str, paragraph: &Paragraph) -> String {
    let font = &paragraph.font;
    let mut attrs = String::from(r#" lang="en-US""#);
    if let Some(sz) = font.size_centipoints() {
        attrs.push_str(&format!(r#" sz="{}""#, sz));
    }
    if let Some(bold) = font.bold {
        attrs.push_str(if bold { r#" b="1""# } else { r#" b="0""# });
    }
    attrs.push_str(r#" dirty="0""#);

    match font.color {
        Some(color) => format!(
            r#"<{tag}{attrs}><a:solidFill><a:srgbClr val="{hex}"/></a:solidFill></{tag}>"#,
            tag = tag,
            attrs = attrs,
            hex = color.to_hex()
        ),
        None => format!("<{}{}/>", tag, attrs),
    }
}

fn slide_rels_xml(slide: &Slide, slide_num: usize) -> String {
    let mut rels = format!(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
        slide.layout_index() + 1
    );
    if slide.notes().is_some() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide{}.xml"/>"#,
            slide_num
        ));
    }
    template::relationships_xml(&rels)
}

fn notes_slide_xml(notes: &str) -> String {
    let paragraphs = notes.split('\n').map(Paragraph::new).collect::<Vec<_>>();

    format!(
        r#"{decl}
<p:notes {ns}><p:cSld><p:spTree>{grp}<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr><p:nvPr><p:ph type="sldImg" idx="{image_idx}"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="{body_idx}"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>"#,
        decl = XML_DECL,
        ns = NS_DECLS,
        grp = GROUP_SHAPE_HEADER,
        image_idx = NOTES_SLIDE_IMAGE_IDX,
        body_idx = NOTES_BODY_IDX,
        paragraphs = paragraphs_xml(&paragraphs),
    )
}

fn notes_slide_rels_xml(slide_num: usize) -> String {
    template::relationships_xml(&format!(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster" Target="../notesMasters/notesMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="../slides/slide{}.xml"/>"#,
        slide_num
    ))
}
