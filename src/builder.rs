// ABOUTME: Slide assembly module for the slidegen application
// ABOUTME: Turns slide records and a themed palette into a saved presentation

use crate::config::Config;
use crate::document::{Presentation, RgbColor, Slide};
use crate::errors::{Result, SlidegenError};
use crate::slides::{SlideContent, SlideRecord};
use crate::theme::{self, Palette};
use crate::utils;
use log::{debug, error, info};
use std::path::{Path, PathBuf};

/// Layout used for the opening slide
pub const TITLE_SLIDE_LAYOUT: usize = 0;
/// Layout used for every content slide
pub const CONTENT_SLIDE_LAYOUT: usize = 1;
/// Placeholder index of the subtitle and body slots
pub const SECOND_PLACEHOLDER_IDX: u32 = 1;

const PRESENTATION_TITLE_SIZE: f64 = 44.0;
const SUBTITLE_SIZE: f64 = 24.0;
const SLIDE_TITLE_SIZE: f64 = 36.0;
const BODY_SIZE: f64 = 24.0;

/// Everything needed for one build
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub title: String,
    pub style: String,
    pub slides: Vec<SlideRecord>,
    pub output: PathBuf,
}

impl BuildRequest {
    pub fn new(title: &str, style: &str, slides: Vec<SlideRecord>, output: &Path) -> Self {
        Self {
            title: title.to_string(),
            style: style.to_string(),
            slides,
            output: output.to_path_buf(),
        }
    }
}

/// Build and save the presentation described by `request`.
///
/// Returns the output path. Any failure is logged and reported as
/// [`SlidegenError::BuildError`]; a partially written file may remain.
pub fn build_presentation(request: &BuildRequest, config: &Config) -> Result<PathBuf> {
    info!(
        "Building presentation {:?} with style {:?} ({} content slides)",
        request.title,
        request.style,
        request.slides.len()
    );

    let palette = theme::resolve(&request.style);
    let result = assemble_presentation(request, &palette, config)
        .and_then(|presentation| presentation.save(&request.output))
        .and_then(|()| utils::validate_file_written(&request.output));

    match result {
        Ok(bytes) => {
            info!("Presentation saved to {:?} ({} bytes)", request.output, bytes);
            Ok(request.output.clone())
        }
        Err(e) => {
            error!("Error in build_presentation: {}", e);
            Err(match e {
                SlidegenError::BuildError(_) => e,
                other => SlidegenError::BuildError(other.to_string()),
            })
        }
    }
}

/// Populate an in-memory presentation without saving it
pub fn assemble_presentation(
    request: &BuildRequest,
    palette: &Palette,
    config: &Config,
) -> Result<Presentation> {
    let mut presentation = Presentation::new()
        .with_slide_size(config.slide_size())
        .with_application(&config.application);
    presentation.set_title(&request.title);

    let slide = presentation.add_slide(TITLE_SLIDE_LAYOUT)?;
    fill_title_slide(slide, &request.title, &request.style, palette)?;

    for (i, record) in request.slides.iter().enumerate() {
        debug!("Assembling slide {}: {:?}", i + 2, record.title);
        let slide = presentation.add_slide(CONTENT_SLIDE_LAYOUT)?;
        fill_content_slide(slide, record, palette)?;
    }

    Ok(presentation)
}

fn fill_title_slide(slide: &mut Slide, title: &str, style: &str, palette: &Palette) -> Result<()> {
    slide.set_background(palette.background);
    set_title(slide, title, palette.title, PRESENTATION_TITLE_SIZE)?;

    match slide.placeholder_mut(SECOND_PLACEHOLDER_IDX) {
        Some(subtitle) => {
            let frame = subtitle.text_frame_mut();
            frame.set_text(&format!("Style: {}", style));
            for paragraph in frame.paragraphs_mut() {
                paragraph
                    .set_color(palette.accent)
                    .set_font_size(SUBTITLE_SIZE)
                    .set_bullet(false);
            }
        }
        None => debug!("Title layout has no subtitle placeholder, skipping"),
    }
    Ok(())
}

fn fill_content_slide(slide: &mut Slide, record: &SlideRecord, palette: &Palette) -> Result<()> {
    slide.set_background(palette.background);
    set_title(slide, &record.title, palette.title, SLIDE_TITLE_SIZE)?;

    match slide.placeholder_mut(SECOND_PLACEHOLDER_IDX) {
        Some(body) => {
            let frame = body.text_frame_mut();
            frame.clear();
            match &record.content {
                SlideContent::Bullets(points) => {
                    for point in points {
                        frame
                            .add_paragraph()
                            .set_text(point)
                            .set_color(palette.body)
                            .set_font_size(BODY_SIZE)
                            .set_level(0)
                            .set_bullet(true);
                    }
                }
                SlideContent::Paragraph(text) => {
                    frame
                        .add_paragraph()
                        .set_text(text)
                        .set_color(palette.body)
                        .set_font_size(BODY_SIZE)
                        .set_bullet(false);
                }
            }
        }
        None => debug!("Content layout has no body placeholder, skipping"),
    }

    if let Some(notes) = &record.notes {
        slide.set_notes(notes);
    }
    Ok(())
}

fn set_title(slide: &mut Slide, text: &str, color: RgbColor, size: f64) -> Result<()> {
    let title = slide
        .title_mut()
        .ok_or_else(|| SlidegenError::BuildError("Slide layout has no title placeholder".to_string()))?;
    let frame = title.text_frame_mut();
    frame.set_text(text);
    for paragraph in frame.paragraphs_mut() {
        paragraph
            .set_color(color)
            .set_font_size(size)
            .set_bold(true);
    }
    Ok(())
}
