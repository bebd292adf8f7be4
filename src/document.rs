// ABOUTME: Presentation document model for the slidegen application
// ABOUTME: Holds layouts, slides, placeholders and text frames before they are packaged

use crate::errors::{Result, SlidegenError};
use log::debug;
use std::fmt;
use std::path::Path;

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase hex form used by `a:srgbClr/@val`
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a six digit hex string such as `1F497D`
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Slide dimensions in EMUs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

impl SlideSize {
    /// 10" x 7.5"
    pub const STANDARD_4X3: SlideSize = SlideSize {
        cx: 9_144_000,
        cy: 6_858_000,
    };
    /// 10" x 5.625"
    pub const WIDESCREEN_16X9: SlideSize = SlideSize {
        cx: 9_144_000,
        cy: 5_143_500,
    };

    /// Value for `p:sldSz/@type`
    pub fn type_name(&self) -> &'static str {
        if *self == Self::STANDARD_4X3 {
            "screen4x3"
        } else if *self == Self::WIDESCREEN_16X9 {
            "screen16x9"
        } else {
            "custom"
        }
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::STANDARD_4X3
    }
}

/// Placeholder types used by the default template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    CenterTitle,
    Subtitle,
    Title,
    Body,
}

impl PlaceholderKind {
    /// Value for `p:ph/@type`
    pub fn ph_type(&self) -> &'static str {
        match self {
            PlaceholderKind::CenterTitle => "ctrTitle",
            PlaceholderKind::Subtitle => "subTitle",
            PlaceholderKind::Title => "title",
            PlaceholderKind::Body => "body",
        }
    }

    pub fn from_ph_type(value: &str) -> Option<Self> {
        match value {
            "ctrTitle" => Some(PlaceholderKind::CenterTitle),
            "subTitle" => Some(PlaceholderKind::Subtitle),
            "title" => Some(PlaceholderKind::Title),
            "body" => Some(PlaceholderKind::Body),
            _ => None,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, PlaceholderKind::CenterTitle | PlaceholderKind::Title)
    }
}

/// A placeholder declared by a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpec {
    pub kind: PlaceholderKind,
    pub idx: u32,
    pub name: &'static str,
}

/// A slide layout from the presentation template
#[derive(Debug, Clone)]
pub struct SlideLayout {
    pub name: &'static str,
    /// Value for `p:sldLayout/@type`
    pub layout_type: &'static str,
    pub placeholders: Vec<PlaceholderSpec>,
}

impl SlideLayout {
    fn title_slide() -> Self {
        Self {
            name: "Title Slide",
            layout_type: "title",
            placeholders: vec![
                PlaceholderSpec {
                    kind: PlaceholderKind::CenterTitle,
                    idx: 0,
                    name: "Title 1",
                },
                PlaceholderSpec {
                    kind: PlaceholderKind::Subtitle,
                    idx: 1,
                    name: "Subtitle 2",
                },
            ],
        }
    }

    fn title_and_content() -> Self {
        Self {
            name: "Title and Content",
            layout_type: "obj",
            placeholders: vec![
                PlaceholderSpec {
                    kind: PlaceholderKind::Title,
                    idx: 0,
                    name: "Title 1",
                },
                PlaceholderSpec {
                    kind: PlaceholderKind::Body,
                    idx: 1,
                    name: "Content Placeholder 2",
                },
            ],
        }
    }
}

/// Run-level formatting applied to a whole paragraph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    /// Size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub color: Option<RgbColor>,
}

impl Font {
    /// Size in hundredths of a point, as stored in `a:rPr/@sz`
    pub fn size_centipoints(&self) -> Option<u32> {
        self.size.map(|pt| (pt * 100.0).round() as u32)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    text: String,
    pub font: Font,
    level: u8,
    /// `Some(true)` shows a bullet glyph, `Some(false)` suppresses it, `None` inherits
    pub bullet: Option<bool>,
}

impl Paragraph {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.text = text.to_string();
        self
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Indentation level, clamped to the 0..=8 range OOXML allows
    pub fn set_level(&mut self, level: u8) -> &mut Self {
        self.level = level.min(8);
        self
    }

    pub fn set_bullet(&mut self, visible: bool) -> &mut Self {
        self.bullet = Some(visible);
        self
    }

    pub fn set_font_size(&mut self, points: f64) -> &mut Self {
        self.font.size = Some(points);
        self
    }

    pub fn set_bold(&mut self, bold: bool) -> &mut Self {
        self.font.bold = Some(bold);
        self
    }

    pub fn set_color(&mut self, color: RgbColor) -> &mut Self {
        self.font.color = Some(color);
        self
    }
}

/// Ordered paragraphs inside a shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    /// Replace all content; each line of `text` becomes its own paragraph
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text.split('\n').map(Paragraph::new).collect();
    }

    /// Remove every paragraph
    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// All paragraph texts joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A placeholder shape instantiated on a slide
#[derive(Debug, Clone)]
pub struct Placeholder {
    pub(crate) spec: PlaceholderSpec,
    text_frame: TextFrame,
}

impl Placeholder {
    fn from_spec(spec: &PlaceholderSpec) -> Self {
        Self {
            spec: spec.clone(),
            text_frame: TextFrame::default(),
        }
    }

    pub fn kind(&self) -> PlaceholderKind {
        self.spec.kind
    }

    pub fn idx(&self) -> u32 {
        self.spec.idx
    }

    pub fn name(&self) -> &str {
        self.spec.name
    }

    pub fn text_frame(&self) -> &TextFrame {
        &self.text_frame
    }

    pub fn text_frame_mut(&mut self) -> &mut TextFrame {
        &mut self.text_frame
    }
}

#[derive(Debug, Clone)]
pub struct Slide {
    layout_index: usize,
    background: Option<RgbColor>,
    placeholders: Vec<Placeholder>,
    notes: Option<String>,
}

impl Slide {
    fn from_layout(layout_index: usize, layout: &SlideLayout) -> Self {
        Self {
            layout_index,
            background: None,
            placeholders: layout
                .placeholders
                .iter()
                .map(Placeholder::from_spec)
                .collect(),
            notes: None,
        }
    }

    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    /// Fill the slide background with a solid color
    pub fn set_background(&mut self, color: RgbColor) {
        self.background = Some(color);
    }

    pub fn background(&self) -> Option<RgbColor> {
        self.background
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn has_placeholder(&self, idx: u32) -> bool {
        self.placeholders.iter().any(|p| p.idx() == idx)
    }

    pub fn placeholder_mut(&mut self, idx: u32) -> Option<&mut Placeholder> {
        self.placeholders.iter_mut().find(|p| p.idx() == idx)
    }

    pub fn title_mut(&mut self) -> Option<&mut Placeholder> {
        self.placeholders.iter_mut().find(|p| p.kind().is_title())
    }

    pub fn title(&self) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.kind().is_title())
    }

    /// Attach speaker notes, replacing any previous notes
    pub fn set_notes(&mut self, text: &str) {
        self.notes = Some(text.to_string());
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// An in-memory presentation built from the default two-layout template
#[derive(Debug, Clone)]
pub struct Presentation {
    layouts: Vec<SlideLayout>,
    slides: Vec<Slide>,
    slide_size: SlideSize,
    title: Option<String>,
    application: String,
}

impl Presentation {
    pub fn new() -> Self {
        Self {
            layouts: vec![SlideLayout::title_slide(), SlideLayout::title_and_content()],
            slides: Vec::new(),
            slide_size: SlideSize::default(),
            title: None,
            application: env!("CARGO_PKG_NAME").to_string(),
        }
    }

    pub fn with_slide_size(mut self, size: SlideSize) -> Self {
        self.slide_size = size;
        self
    }

    pub fn with_application(mut self, application: &str) -> Self {
        self.application = application.to_string();
        self
    }

    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Document title written to the core properties
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    /// Append a slide instantiated from the layout at `layout_index`
    pub fn add_slide(&mut self, layout_index: usize) -> Result<&mut Slide> {
        let layout = self
            .layouts
            .get(layout_index)
            .ok_or(SlidegenError::LayoutNotFound(layout_index))?;
        debug!(
            "Adding slide {} using layout {:?}",
            self.slides.len() + 1,
            layout.name
        );
        self.slides.push(Slide::from_layout(layout_index, layout));
        let last = self.slides.len() - 1;
        Ok(&mut self.slides[last])
    }

    /// Serialize to a .pptx file, replacing anything already at `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::pptx::write_package(self, path)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}
