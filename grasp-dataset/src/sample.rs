//! Dataset sample types.

use grasp_types::{GraspMap, GraspRectangle, OutputMaps};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// A single grasp-training sample.
///
/// Carries the depth image, the four per-pixel regression targets, and the
/// labeled grasp rectangles used for evaluation. All maps are flat row-major
/// `Vec<f32>` in HW layout with the same `width`/`height` as the depth image.
///
/// The cos/sin targets encode the doubled grasp angle `(cos 2θ, sin 2θ)`; the
/// width target is normalized to `[0, 1]` by the decoder's width scale.
///
/// # Example
///
/// ```
/// use grasp_dataset::GraspSample;
/// use grasp_types::GraspRectangle;
///
/// let mut sample = GraspSample::empty(42);
/// assert!(sample.is_valid());
/// assert!(!sample.has_rectangles());
///
/// sample.rectangles.push(GraspRectangle::new(8, 8, 12, 12, 0.35, 45.0));
/// assert_eq!(sample.num_rectangles(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraspSample {
    /// Frame/sample ID.
    pub frame_id: u64,

    /// Depth image in HW layout, meters.
    pub depth: Vec<f32>,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Target position confidence map, values in `[0, 1]`.
    pub target_pos: Vec<f32>,

    /// Target doubled-angle cosine map, values in `[-1, 1]`.
    pub target_cos: Vec<f32>,

    /// Target doubled-angle sine map, values in `[-1, 1]`.
    pub target_sin: Vec<f32>,

    /// Target normalized width map, non-negative.
    pub target_width: Vec<f32>,

    /// Ground-truth grasp rectangles.
    pub rectangles: Vec<GraspRectangle>,
}

impl GraspSample {
    /// Creates a new sample.
    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::missing_const_for_fn)]
    pub fn new(
        frame_id: u64,
        depth: Vec<f32>,
        width: u32,
        height: u32,
        target_pos: Vec<f32>,
        target_cos: Vec<f32>,
        target_sin: Vec<f32>,
        target_width: Vec<f32>,
        rectangles: Vec<GraspRectangle>,
    ) -> Self {
        Self {
            frame_id,
            depth,
            width,
            height,
            target_pos,
            target_cos,
            target_sin,
            target_width,
            rectangles,
        }
    }

    /// Creates an empty sample with just an ID.
    ///
    /// Useful for testing or as a placeholder.
    #[must_use]
    pub const fn empty(frame_id: u64) -> Self {
        Self {
            frame_id,
            depth: Vec::new(),
            width: 0,
            height: 0,
            target_pos: Vec::new(),
            target_cos: Vec::new(),
            target_sin: Vec::new(),
            target_width: Vec::new(),
            rectangles: Vec::new(),
        }
    }

    /// Returns the expected map length (`width * height`).
    #[must_use]
    pub const fn map_len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns the number of ground-truth rectangles.
    #[must_use]
    pub fn num_rectangles(&self) -> usize {
        self.rectangles.len()
    }

    /// Returns `true` if the sample has any ground-truth rectangles.
    #[must_use]
    pub fn has_rectangles(&self) -> bool {
        !self.rectangles.is_empty()
    }

    /// Validates the sample data.
    ///
    /// Returns `true` if:
    /// - dimensions are zero and every map is empty, or
    /// - dimensions are positive, every map has `width * height` values, and
    ///   every rectangle is valid and inside the image.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.width == 0 || self.height == 0 {
            return self.depth.is_empty()
                && self.target_pos.is_empty()
                && self.target_cos.is_empty()
                && self.target_sin.is_empty()
                && self.target_width.is_empty();
        }

        let expected = self.map_len();
        let maps_ok = self.depth.len() == expected
            && self.target_pos.len() == expected
            && self.target_cos.len() == expected
            && self.target_sin.len() == expected
            && self.target_width.len() == expected;
        if !maps_ok {
            return false;
        }

        self.rectangles.iter().all(|rect| {
            rect.is_valid()
                && rect.row1 < self.height as usize
                && rect.col1 < self.width as usize
        })
    }

    /// Builds the target maps as an [`OutputMaps`] set.
    ///
    /// Lets validation decode and score ground truth with the same machinery
    /// used on predictions.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::MapLength` if any map violates the length
    /// contract.
    pub fn target_maps(&self) -> Result<OutputMaps> {
        let rows = self.height as usize;
        let cols = self.width as usize;
        let expected = self.map_len();

        for map in [
            &self.target_pos,
            &self.target_cos,
            &self.target_sin,
            &self.target_width,
        ] {
            if map.len() != expected {
                return Err(DatasetError::MapLength {
                    frame_id: self.frame_id,
                    expected,
                    actual: map.len(),
                });
            }
        }

        let pos = GraspMap::try_new(rows, cols, self.target_pos.clone())?;
        let cos = GraspMap::try_new(rows, cols, self.target_cos.clone())?;
        let sin = GraspMap::try_new(rows, cols, self.target_sin.clone())?;
        let width = GraspMap::try_new(rows, cols, self.target_width.clone())?;
        Ok(OutputMaps::try_new(pos, cos, sin, width)?)
    }
}
