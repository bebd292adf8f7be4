// ABOUTME: Library module for the slidegen program.
// ABOUTME: Contains theme resolution, slide loading, document assembly and PPTX packaging.

// Reexport modules
pub mod builder;
pub mod config;
pub mod document;
pub mod errors;
pub mod inspect;
pub mod pptx;
pub mod slides;
pub mod template;
pub mod theme;
pub mod utils;

// Reexport common types and functions
pub use builder::{BuildRequest, assemble_presentation, build_presentation};
pub use config::Config;
pub use document::{Presentation, RgbColor, SlideSize};
pub use errors::{Result, SlidegenError};
pub use inspect::{SlideOutline, read_outline};
pub use slides::{SlideContent, SlideRecord, load_slides, parse_slides};
pub use theme::{Palette, Theme, resolve};

#[cfg(test)]
mod tests;
