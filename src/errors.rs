// ABOUTME: Error types for the slidegen application
// ABOUTME: Provides structured error handling for input loading, document building and packaging

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidegenError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Failed to build presentation: {0}")]
    BuildError(String),

    #[error("PPTX generation error: {0}")]
    PptxError(String),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("Slide layout not found: index {0}")]
    LayoutNotFound(usize),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),
}

impl From<zip::result::ZipError> for SlidegenError {
    fn from(err: zip::result::ZipError) -> Self {
        SlidegenError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

impl From<quick_xml::Error> for SlidegenError {
    fn from(err: quick_xml::Error) -> Self {
        SlidegenError::XmlError(err.to_string())
    }
}

// Malformed JSON is always an input problem
impl From<serde_json::Error> for SlidegenError {
    fn from(err: serde_json::Error) -> Self {
        SlidegenError::InputError(format!("Invalid slide JSON: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlidegenError>;
