//! Scoring predicted grasps against ground truth.

use std::f32::consts::FRAC_PI_6;

use grasp_types::{angle, GraspCandidate, GraspRectangle};
use serde::{Deserialize, Serialize};

/// Spatial rule for matching a candidate to a ground-truth rectangle.
///
/// The angular rule (difference modulo π within tolerance) always applies;
/// the criterion decides how the candidate's location must relate to the
/// rectangle.
///
/// # Example
///
/// ```
/// use grasp_training::MatchCriterion;
///
/// let criterion = MatchCriterion::region_overlap(0.25);
/// assert_eq!(criterion.threshold(), Some(0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum MatchCriterion {
    /// The candidate pixel must lie inside the rectangle.
    #[default]
    CenterInRegion,

    /// The candidate's gripper footprint must overlap the rectangle.
    ///
    /// The footprint is the oriented rectangle swept by the gripper: length
    /// equal to the predicted width along the grasp axis, breadth half of
    /// that. Overlap is measured as intersection-over-union of the
    /// rasterized footprint and the ground-truth region.
    RegionOverlap {
        /// Minimum intersection-over-union for a match.
        threshold: f32,
    },
}

impl MatchCriterion {
    /// Creates the center-in-region criterion.
    #[must_use]
    pub const fn center_in_region() -> Self {
        Self::CenterInRegion
    }

    /// Creates a region-overlap criterion.
    #[must_use]
    pub const fn region_overlap(threshold: f32) -> Self {
        Self::RegionOverlap { threshold }
    }

    /// Returns the overlap threshold, if this criterion uses one.
    #[must_use]
    pub const fn threshold(&self) -> Option<f32> {
        match self {
            Self::CenterInRegion => None,
            Self::RegionOverlap { threshold } => Some(*threshold),
        }
    }
}

/// Configuration for [`evaluate`].
///
/// # Example
///
/// ```
/// use grasp_training::EvalConfig;
/// use std::f32::consts::FRAC_PI_6;
///
/// let config = EvalConfig::default();
/// assert!((config.angle_tolerance - FRAC_PI_6).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Maximum angular difference (modulo π) for a match, radians.
    pub angle_tolerance: f32,

    /// Spatial matching rule.
    pub criterion: MatchCriterion,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            angle_tolerance: FRAC_PI_6,
            criterion: MatchCriterion::CenterInRegion,
        }
    }
}

impl EvalConfig {
    /// Sets the angle tolerance.
    #[must_use]
    pub const fn with_angle_tolerance(mut self, tolerance: f32) -> Self {
        self.angle_tolerance = tolerance;
        self
    }

    /// Sets the matching criterion.
    #[must_use]
    pub const fn with_criterion(mut self, criterion: MatchCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.angle_tolerance > 0.0
            && self.angle_tolerance.is_finite()
            && match self.criterion {
                MatchCriterion::CenterInRegion => true,
                MatchCriterion::RegionOverlap { threshold } => {
                    threshold > 0.0 && threshold <= 1.0
                }
            }
    }
}

/// Checks whether one candidate matches one ground-truth rectangle.
///
/// A match requires the angular difference modulo π to be within tolerance
/// (orientations π apart are the same grasp) and the spatial criterion to
/// hold.
#[must_use]
pub fn matches(
    candidate: &GraspCandidate,
    rect: &GraspRectangle,
    config: &EvalConfig,
) -> bool {
    if angle::angular_difference(candidate.angle, rect.angle) > config.angle_tolerance {
        return false;
    }

    match config.criterion {
        MatchCriterion::CenterInRegion => rect.contains(candidate.row, candidate.col),
        MatchCriterion::RegionOverlap { threshold } => {
            footprint_overlap(candidate, rect) >= threshold
        }
    }
}

/// Evaluates an image's candidates against its ground truth.
///
/// Succeeds if any candidate matches any rectangle: the network predicted at
/// least one valid grasp. Binary per image, no partial credit. Empty ground
/// truth (a malformed sample) or an empty candidate list both yield `false`,
/// never an error.
#[must_use]
pub fn evaluate(
    candidates: &[GraspCandidate],
    rectangles: &[GraspRectangle],
    config: &EvalConfig,
) -> bool {
    if candidates.is_empty() || rectangles.is_empty() {
        return false;
    }

    candidates
        .iter()
        .any(|candidate| rectangles.iter().any(|rect| matches(candidate, rect, config)))
}

/// Aggregate accuracy over per-image evaluation results.
///
/// The mean of the binary results; 0.0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy(results: &[bool]) -> f32 {
    if results.is_empty() {
        return 0.0;
    }
    let successes = results.iter().filter(|&&r| r).count();
    successes as f32 / results.len() as f32
}

/// Intersection-over-union between the candidate's rasterized gripper
/// footprint and the ground-truth region.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn footprint_overlap(candidate: &GraspCandidate, rect: &GraspRectangle) -> f32 {
    let half_length = candidate.width / 2.0;
    let half_breadth = candidate.width / 4.0;
    if half_length <= 0.0 {
        return 0.0;
    }

    let (sin, cos) = candidate.angle.sin_cos();
    let center_row = candidate.row as f32;
    let center_col = candidate.col as f32;

    // Scan the union of the ground-truth bounds and the footprint's bounding
    // box, clamped at zero.
    let reach = half_length.hypot(half_breadth).ceil() as isize;
    let row_lo = (candidate.row as isize - reach).min(rect.row0 as isize).max(0);
    let row_hi = (candidate.row as isize + reach).max(rect.row1 as isize);
    let col_lo = (candidate.col as isize - reach).min(rect.col0 as isize).max(0);
    let col_hi = (candidate.col as isize + reach).max(rect.col1 as isize);

    let mut intersection = 0_usize;
    let mut union = 0_usize;
    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let dy = row as f32 - center_row;
            let dx = col as f32 - center_col;
            // Rotate into the footprint frame: u along the grasp axis.
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            let in_footprint = u.abs() <= half_length && v.abs() <= half_breadth;

            #[allow(clippy::cast_sign_loss)]
            let in_region =
                row >= 0 && col >= 0 && rect.contains(row as usize, col as usize);

            if in_footprint && in_region {
                intersection += 1;
            }
            if in_footprint || in_region {
                union += 1;
            }
        }
    }

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}
