//! Error types for grasp-dataset crate.

use thiserror::Error;

/// Errors that can occur in dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Sample map data length does not match the image dimensions.
    #[error("map length mismatch in sample {frame_id}: expected {expected}, got {actual}")]
    MapLength {
        /// Offending sample ID.
        frame_id: u64,
        /// Expected map length (`width * height`).
        expected: usize,
        /// Actual map length.
        actual: usize,
    },

    /// Invalid image dimensions.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Invalid ground-truth rectangle.
    #[error("invalid rectangle in sample {frame_id}: {reason}")]
    InvalidRectangle {
        /// Offending sample ID.
        frame_id: u64,
        /// What was wrong.
        reason: String,
    },

    /// Type construction error.
    #[error("type error: {0}")]
    Types(#[from] grasp_types::TypesError),
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
