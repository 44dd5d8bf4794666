//! Dense 2D float maps and the raw/decoded network output sets.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};

/// A dense 2D `f32` map in row-major layout.
///
/// Used for every per-pixel quantity in the pipeline: position confidence,
/// angle channels, widths, and targets. Indexing is `(row, col)`.
///
/// # Example
///
/// ```
/// use grasp_types::GraspMap;
///
/// let mut map = GraspMap::zeros(4, 4);
/// map.set(1, 2, 0.9);
/// assert!((map.get(1, 2) - 0.9).abs() < 1e-6);
/// assert_eq!(map.max_position(), Some((1, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraspMap {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl GraspMap {
    /// Creates a map from row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        assert!(
            data.len() == rows * cols,
            "map data length {} does not match shape {rows}x{cols}",
            data.len()
        );
        Self { rows, cols, data }
    }

    /// Creates a map from row-major data, returning an error on a length
    /// mismatch.
    ///
    /// # Errors
    ///
    /// Returns `TypesError::DataLength` if `data.len() != rows * cols`.
    pub fn try_new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(TypesError::DataLength {
                rows,
                cols,
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a zero-filled map.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a map filled with a constant value.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates a map by evaluating `f(row, col)` at every pixel.
    #[must_use]
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the `(rows, cols)` shape.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the map has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if `other` has the same shape.
    #[must_use]
    pub const fn same_shape(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} map",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    /// Sets the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} map",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col] = value;
    }

    /// Returns one row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        assert!(row < self.rows, "row {row} out of bounds ({} rows)", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns the maximum value, or 0.0 for an empty map.
    #[must_use]
    pub fn max(&self) -> f32 {
        if self.data.is_empty() {
            0.0
        } else {
            self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
        }
    }

    /// Returns the `(row, col)` of the maximum value.
    ///
    /// The first maximum in row-major order wins ties. Returns `None` for an
    /// empty map.
    #[must_use]
    pub fn max_position(&self) -> Option<(usize, usize)> {
        if self.data.is_empty() {
            return None;
        }
        let mut best = (0, 0);
        let mut best_value = self.data[0];
        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.data[row * self.cols + col];
                if value > best_value {
                    best_value = value;
                    best = (row, col);
                }
            }
        }
        Some(best)
    }

    /// Returns the raw row-major data.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// The raw output channel set of a grasp network, transferred to host memory.
///
/// Four equal-shaped maps: `pos` (position confidence), `cos`/`sin`
/// (doubled-angle channels), and `width` (normalized grasp width). Immutable
/// after construction; the equal-shape invariant is checked once here so the
/// decode path never has to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMaps {
    pos: GraspMap,
    cos: GraspMap,
    sin: GraspMap,
    width: GraspMap,
}

impl OutputMaps {
    /// Creates an output set from four equal-shaped maps.
    ///
    /// # Panics
    ///
    /// Panics if the maps do not share a shape.
    #[must_use]
    pub fn new(pos: GraspMap, cos: GraspMap, sin: GraspMap, width: GraspMap) -> Self {
        assert!(
            pos.same_shape(&cos) && pos.same_shape(&sin) && pos.same_shape(&width),
            "output maps must share a shape"
        );
        Self {
            pos,
            cos,
            sin,
            width,
        }
    }

    /// Creates an output set, returning an error if the shapes differ.
    ///
    /// # Errors
    ///
    /// Returns `TypesError::ShapeMismatch` naming the first offending map.
    pub fn try_new(pos: GraspMap, cos: GraspMap, sin: GraspMap, width: GraspMap) -> Result<Self> {
        for other in [&cos, &sin, &width] {
            if !pos.same_shape(other) {
                return Err(TypesError::ShapeMismatch {
                    expected_rows: pos.rows(),
                    expected_cols: pos.cols(),
                    actual_rows: other.rows(),
                    actual_cols: other.cols(),
                });
            }
        }
        Ok(Self {
            pos,
            cos,
            sin,
            width,
        })
    }

    /// Returns the position confidence map.
    #[must_use]
    pub const fn pos(&self) -> &GraspMap {
        &self.pos
    }

    /// Returns the doubled-angle cosine channel.
    #[must_use]
    pub const fn cos(&self) -> &GraspMap {
        &self.cos
    }

    /// Returns the doubled-angle sine channel.
    #[must_use]
    pub const fn sin(&self) -> &GraspMap {
        &self.sin
    }

    /// Returns the normalized width map.
    #[must_use]
    pub const fn width(&self) -> &GraspMap {
        &self.width
    }

    /// Returns the shared `(rows, cols)` shape.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.pos.shape()
    }
}

/// The decoded grasp map set.
///
/// `position` is the (optionally smoothed) confidence map, `angle` holds
/// orientations in `(−π/2, π/2]`, and `width` holds gripper widths in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraspMaps {
    position: GraspMap,
    angle: GraspMap,
    width: GraspMap,
}

impl GraspMaps {
    /// Creates a decoded set from three equal-shaped maps.
    ///
    /// # Panics
    ///
    /// Panics if the maps do not share a shape.
    #[must_use]
    pub fn new(position: GraspMap, angle: GraspMap, width: GraspMap) -> Self {
        assert!(
            position.same_shape(&angle) && position.same_shape(&width),
            "decoded maps must share a shape"
        );
        Self {
            position,
            angle,
            width,
        }
    }

    /// Creates a decoded set, returning an error if the shapes differ.
    ///
    /// # Errors
    ///
    /// Returns `TypesError::ShapeMismatch` naming the first offending map.
    pub fn try_new(position: GraspMap, angle: GraspMap, width: GraspMap) -> Result<Self> {
        for other in [&angle, &width] {
            if !position.same_shape(other) {
                return Err(TypesError::ShapeMismatch {
                    expected_rows: position.rows(),
                    expected_cols: position.cols(),
                    actual_rows: other.rows(),
                    actual_cols: other.cols(),
                });
            }
        }
        Ok(Self {
            position,
            angle,
            width,
        })
    }

    /// Returns the position confidence map.
    #[must_use]
    pub const fn position(&self) -> &GraspMap {
        &self.position
    }

    /// Returns the orientation map, radians in `(−π/2, π/2]`.
    #[must_use]
    pub const fn angle(&self) -> &GraspMap {
        &self.angle
    }

    /// Returns the width map, in pixels.
    #[must_use]
    pub const fn width(&self) -> &GraspMap {
        &self.width
    }

    /// Returns the shared `(rows, cols)` shape.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.position.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_new_valid() {
        let map = GraspMap::new(2, 3, vec![0.0; 6]);
        assert_eq!(map.shape(), (2, 3));
        assert_eq!(map.len(), 6);
        assert!(!map.is_empty());
    }

    #[test]
    #[should_panic(expected = "does not match shape")]
    fn map_new_length_mismatch_panics() {
        let _ = GraspMap::new(2, 3, vec![0.0; 5]);
    }

    #[test]
    fn map_try_new_length_mismatch() {
        let result = GraspMap::try_new(2, 3, vec![0.0; 5]);
        assert!(matches!(result, Err(TypesError::DataLength { .. })));
    }

    #[test]
    fn map_get_set() {
        let mut map = GraspMap::zeros(3, 3);
        map.set(2, 1, 0.7);
        assert!((map.get(2, 1) - 0.7).abs() < 1e-6);
        assert!(map.get(0, 0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn map_get_out_of_bounds_panics() {
        let map = GraspMap::zeros(2, 2);
        let _ = map.get(2, 0);
    }

    #[test]
    fn map_from_fn() {
        #[allow(clippy::cast_precision_loss)]
        let map = GraspMap::from_fn(2, 2, |r, c| (r * 2 + c) as f32);
        assert!((map.get(0, 0)).abs() < 1e-6);
        assert!((map.get(1, 1) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn map_row_access() {
        let map = GraspMap::from_fn(2, 3, |r, _| if r == 1 { 1.0 } else { 0.0 });
        assert_eq!(map.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(map.row(1), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn map_max_and_position() {
        let mut map = GraspMap::zeros(5, 5);
        map.set(3, 4, 0.9);
        map.set(1, 1, 0.5);
        assert!((map.max() - 0.9).abs() < 1e-6);
        assert_eq!(map.max_position(), Some((3, 4)));
    }

    #[test]
    fn map_max_position_tie_is_row_major_first() {
        let map = GraspMap::filled(3, 3, 0.5);
        assert_eq!(map.max_position(), Some((0, 0)));
    }

    #[test]
    fn map_max_of_empty_is_zero() {
        let map = GraspMap::zeros(0, 0);
        assert!(map.max().abs() < 1e-6);
        assert_eq!(map.max_position(), None);
    }

    #[test]
    fn output_maps_valid() {
        let maps = OutputMaps::new(
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
        );
        assert_eq!(maps.shape(), (4, 4));
    }

    #[test]
    fn output_maps_shape_mismatch() {
        let result = OutputMaps::try_new(
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 2),
            GraspMap::zeros(4, 4),
        );
        assert!(matches!(result, Err(TypesError::ShapeMismatch { .. })));
    }

    #[test]
    #[should_panic(expected = "share a shape")]
    fn output_maps_mismatch_panics() {
        let _ = OutputMaps::new(
            GraspMap::zeros(4, 4),
            GraspMap::zeros(2, 4),
            GraspMap::zeros(4, 4),
            GraspMap::zeros(4, 4),
        );
    }

    #[test]
    fn grasp_maps_valid() {
        let maps = GraspMaps::new(
            GraspMap::zeros(3, 5),
            GraspMap::zeros(3, 5),
            GraspMap::zeros(3, 5),
        );
        assert_eq!(maps.shape(), (3, 5));
    }

    #[test]
    fn grasp_maps_shape_mismatch() {
        let result = GraspMaps::try_new(
            GraspMap::zeros(3, 5),
            GraspMap::zeros(5, 3),
            GraspMap::zeros(3, 5),
        );
        assert!(matches!(result, Err(TypesError::ShapeMismatch { .. })));
    }

    #[test]
    fn map_serialization() {
        let map = GraspMap::from_fn(2, 2, |r, c| (r + c) as f32);
        let json = serde_json::to_string(&map);
        assert!(json.is_ok());

        let parsed: std::result::Result<GraspMap, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_else(|_| GraspMap::zeros(0, 0)), map);
    }
}
