// ABOUTME: Slide input module for the slidegen application
// ABOUTME: Loads slide records from JSON and normalizes their content

use crate::errors::{Result, SlidegenError};
use crate::utils;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Body content of one slide
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum SlideContent {
    /// A single unbulleted paragraph
    Paragraph(String),
    /// One bulleted paragraph per entry
    Bullets(Vec<String>),
}

impl Default for SlideContent {
    fn default() -> Self {
        SlideContent::Bullets(Vec::new())
    }
}

impl SlideContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SlideContent::Paragraph(text) => text.is_empty(),
            SlideContent::Bullets(points) => points.is_empty(),
        }
    }
}

impl From<Value> for SlideContent {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SlideContent::default(),
            Value::String(text) => SlideContent::Paragraph(text),
            Value::Array(items) => SlideContent::Bullets(items.into_iter().map(value_text).collect()),
            other => SlideContent::Paragraph(other.to_string()),
        }
    }
}

/// String form of a JSON value; strings are taken without quotes
fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

impl From<&str> for SlideContent {
    fn from(text: &str) -> Self {
        SlideContent::Paragraph(text.to_string())
    }
}

impl From<Vec<String>> for SlideContent {
    fn from(points: Vec<String>) -> Self {
        SlideContent::Bullets(points)
    }
}

impl From<Vec<&str>> for SlideContent {
    fn from(points: Vec<&str>) -> Self {
        SlideContent::Bullets(points.into_iter().map(String::from).collect())
    }
}

/// One element of the input array
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SlideRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: SlideContent,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SlideRecord {
    pub fn new(title: &str, content: impl Into<SlideContent>) -> Self {
        Self {
            title: title.to_string(),
            content: content.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Accepted top-level shapes of the input file
#[derive(Deserialize)]
#[serde(untagged)]
enum SlideDocument {
    List(Vec<SlideRecord>),
    Envelope { slides: Vec<SlideRecord> },
}

/// Parse slide records from a JSON string.
///
/// Accepts a bare array of records or an object with a `slides` array.
pub fn parse_slides(json: &str) -> Result<Vec<SlideRecord>> {
    // Parse once as a Value so syntax errors keep serde_json's position info
    let value: Value = serde_json::from_str(json)?;
    let document = match value {
        Value::Array(_) | Value::Object(_) => SlideDocument::deserialize(value).map_err(|e| {
            SlidegenError::InputError(format!(
                "Slide data must be an array of {{title, content, notes}} objects: {}",
                e
            ))
        })?,
        other => {
            return Err(SlidegenError::InputError(format!(
                "Expected a JSON array of slides, found {}",
                json_kind(&other)
            )))
        }
    };

    let slides = match document {
        SlideDocument::List(slides) | SlideDocument::Envelope { slides } => slides,
    };

    for (i, slide) in slides.iter().enumerate() {
        if slide.content.is_empty() {
            warn!("Slide {} ({:?}) has no content", i + 1, slide.title);
        }
    }

    Ok(slides)
}

/// Load slide records from a UTF-8 JSON file
pub fn load_slides(path: &Path) -> Result<Vec<SlideRecord>> {
    info!("Loading slides data from {:?}", path);
    utils::validate_file_exists(path)
        .map_err(|e| SlidegenError::InputError(e.to_string()))?;

    let json = fs::read_to_string(path).map_err(|e| {
        SlidegenError::InputError(format!("Failed to read {:?}: {}", path, e))
    })?;
    let slides = parse_slides(&json)?;

    info!("Loaded {} slides from {:?}", slides.len(), path);
    Ok(slides)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
