//! Error types for grasp-types crate.

use thiserror::Error;

/// Errors that can occur when constructing grasp types.
#[derive(Debug, Error)]
pub enum TypesError {
    /// Map data length does not match the declared shape.
    #[error("map data length mismatch: shape {rows}x{cols} expects {expected} values, got {actual}")]
    DataLength {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
        /// Expected data length (`rows * cols`).
        expected: usize,
        /// Actual data length.
        actual: usize,
    },

    /// Two maps that must share a shape do not.
    #[error("map shape mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
    ShapeMismatch {
        /// Expected number of rows.
        expected_rows: usize,
        /// Expected number of columns.
        expected_cols: usize,
        /// Actual number of rows.
        actual_rows: usize,
        /// Actual number of columns.
        actual_cols: usize,
    },

    /// Invalid rectangle bounds.
    #[error("invalid rectangle bounds: {0}")]
    InvalidBounds(String),
}

/// Result type for grasp-types operations.
pub type Result<T> = std::result::Result<T, TypesError>;
