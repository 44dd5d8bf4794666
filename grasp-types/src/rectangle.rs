//! Ground-truth grasp rectangle type.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};

/// A labeled grasp region from the dataset.
///
/// Covers an inclusive pixel range `[row0, row1] × [col0, col1]` and carries
/// the labeled grasp orientation and gripper width. Used only as evaluation
/// input, never during decoding.
///
/// # Example
///
/// ```
/// use grasp_types::GraspRectangle;
///
/// let rect = GraspRectangle::new(8, 8, 12, 12, 0.35, 45.0);
/// assert!(rect.contains(10, 10));
/// assert!(!rect.contains(13, 10));
/// assert_eq!(rect.area(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraspRectangle {
    /// First covered row.
    pub row0: usize,
    /// First covered column.
    pub col0: usize,
    /// Last covered row (inclusive).
    pub row1: usize,
    /// Last covered column (inclusive).
    pub col1: usize,
    /// Labeled grasp orientation in radians.
    pub angle: f32,
    /// Labeled gripper width in pixels.
    pub width: f32,
}

impl GraspRectangle {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(
        row0: usize,
        col0: usize,
        row1: usize,
        col1: usize,
        angle: f32,
        width: f32,
    ) -> Self {
        Self {
            row0,
            col0,
            row1,
            col1,
            angle,
            width,
        }
    }

    /// Creates a rectangle, validating the bounds.
    ///
    /// # Errors
    ///
    /// Returns `TypesError::InvalidBounds` if `row0 > row1` or `col0 > col1`.
    pub fn try_new(
        row0: usize,
        col0: usize,
        row1: usize,
        col1: usize,
        angle: f32,
        width: f32,
    ) -> Result<Self> {
        if row0 > row1 || col0 > col1 {
            return Err(TypesError::InvalidBounds(format!(
                "rows {row0}..={row1}, cols {col0}..={col1}"
            )));
        }
        Ok(Self::new(row0, col0, row1, col1, angle, width))
    }

    /// Returns `true` if the pixel lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row0 && row <= self.row1 && col >= self.col0 && col <= self.col1
    }

    /// Returns the rectangle center as fractional `(row, col)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center(&self) -> (f32, f32) {
        (
            (self.row0 as f32 + self.row1 as f32) / 2.0,
            (self.col0 as f32 + self.col1 as f32) / 2.0,
        )
    }

    /// Returns the covered height in pixels.
    #[must_use]
    pub const fn height_px(&self) -> usize {
        self.row1 - self.row0 + 1
    }

    /// Returns the covered width in pixels.
    #[must_use]
    pub const fn width_px(&self) -> usize {
        self.col1 - self.col0 + 1
    }

    /// Returns the covered area in pixels.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.height_px() * self.width_px()
    }

    /// Checks the rectangle fields.
    ///
    /// Valid means ordered bounds, a finite angle, and a non-negative finite
    /// width.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.row0 <= self.row1
            && self.col0 <= self.col1
            && self.angle.is_finite()
            && self.width >= 0.0
            && self.width.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_contains_inclusive_bounds() {
        let rect = GraspRectangle::new(8, 8, 12, 12, 0.35, 45.0);
        assert!(rect.contains(8, 8));
        assert!(rect.contains(12, 12));
        assert!(rect.contains(10, 10));
        assert!(!rect.contains(7, 10));
        assert!(!rect.contains(10, 13));
    }

    #[test]
    fn rectangle_dimensions() {
        let rect = GraspRectangle::new(8, 8, 12, 12, 0.0, 45.0);
        assert_eq!(rect.height_px(), 5);
        assert_eq!(rect.width_px(), 5);
        assert_eq!(rect.area(), 25);
    }

    #[test]
    fn rectangle_center() {
        let rect = GraspRectangle::new(8, 8, 12, 12, 0.0, 45.0);
        let (r, c) = rect.center();
        assert!((r - 10.0).abs() < 1e-6);
        assert!((c - 10.0).abs() < 1e-6);
    }

    #[test]
    fn rectangle_try_new_rejects_inverted_bounds() {
        let result = GraspRectangle::try_new(12, 8, 8, 12, 0.0, 45.0);
        assert!(matches!(result, Err(TypesError::InvalidBounds(_))));
    }

    #[test]
    fn rectangle_is_valid() {
        assert!(GraspRectangle::new(0, 0, 4, 4, 0.3, 30.0).is_valid());
        assert!(!GraspRectangle::new(0, 0, 4, 4, f32::NAN, 30.0).is_valid());
        assert!(!GraspRectangle::new(0, 0, 4, 4, 0.3, -1.0).is_valid());
    }

    #[test]
    fn rectangle_single_pixel() {
        let rect = GraspRectangle::new(5, 5, 5, 5, 0.0, 10.0);
        assert_eq!(rect.area(), 1);
        assert!(rect.contains(5, 5));
        assert!(!rect.contains(5, 6));
    }

    #[test]
    fn rectangle_serialization() {
        let rect = GraspRectangle::new(8, 8, 12, 12, 0.35, 45.0);
        let json = serde_json::to_string(&rect);
        assert!(json.is_ok());

        let parsed: std::result::Result<GraspRectangle, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(
            parsed.unwrap_or_else(|_| GraspRectangle::new(0, 0, 0, 0, 0.0, 0.0)),
            rect
        );
    }
}
