// ABOUTME: Configuration module for the slidegen application
// ABOUTME: Holds document settings that are not part of the slide data itself

use crate::document::SlideSize;
use log::warn;

/// Global configuration for a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// "4:3" or "16:9"
    pub aspect_ratio: String,
    /// Application name recorded in the document properties
    pub application: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aspect_ratio: "4:3".to_string(),
            application: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the aspect ratio, keeping the default when `None`
    pub fn with_aspect_ratio(mut self, aspect_ratio: Option<String>) -> Self {
        if let Some(aspect_ratio) = aspect_ratio {
            self.aspect_ratio = aspect_ratio;
        }
        self
    }

    /// Slide dimensions for the configured aspect ratio
    pub fn slide_size(&self) -> SlideSize {
        match self.aspect_ratio.as_str() {
            "4:3" => SlideSize::STANDARD_4X3,
            "16:9" => SlideSize::WIDESCREEN_16X9,
            _ => {
                warn!(
                    "Unsupported aspect ratio: {}. Using 4:3 instead.",
                    self.aspect_ratio
                );
                SlideSize::STANDARD_4X3
            }
        }
    }
}
