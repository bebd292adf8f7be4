// ABOUTME: Utility functions for the slidegen application
// ABOUTME: Provides path validation helpers shared by input loading and output checks

use crate::errors::{Result, SlidegenError};
use std::path::Path;

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlidegenError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SlidegenError::InputError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Validate that a written file exists and is not empty, returning its size
pub fn validate_file_written(path: &Path) -> Result<u64> {
    validate_file_exists(path)?;
    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(SlidegenError::PptxError(format!(
            "Output file is empty: {:?}",
            path
        )));
    }
    Ok(size)
}
