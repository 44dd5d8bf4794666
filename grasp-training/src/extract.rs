//! Extracting grasp candidates from decoded maps.

use grasp_types::{GraspCandidate, GraspMap, GraspMaps};
use serde::{Deserialize, Serialize};

/// Configuration for [`extract`].
///
/// # Example
///
/// ```
/// use grasp_training::ExtractConfig;
///
/// let config = ExtractConfig::default();
/// assert_eq!(config.max_candidates, 1);
/// assert!((config.min_quality - 0.2).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Maximum number of candidates to return.
    pub max_candidates: usize,

    /// Confidence floor: pixels below this never become candidates.
    ///
    /// A map uniformly below the floor yields an empty candidate list —
    /// "no graspable location found" is a normal result.
    pub min_quality: f32,

    /// Chebyshev radius for non-maximum suppression.
    ///
    /// A pixel only counts as a peak if nothing in its window beats it, and
    /// accepted peaks suppress further peaks within this radius.
    pub suppression_radius: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_candidates: 1,
            min_quality: 0.2,
            suppression_radius: 2,
        }
    }
}

impl ExtractConfig {
    /// Sets the maximum candidate count.
    #[must_use]
    pub const fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Sets the confidence floor.
    #[must_use]
    pub const fn with_min_quality(mut self, min_quality: f32) -> Self {
        self.min_quality = min_quality;
        self
    }

    /// Sets the suppression radius.
    #[must_use]
    pub const fn with_suppression_radius(mut self, radius: usize) -> Self {
        self.suppression_radius = radius;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.max_candidates > 0 && self.min_quality.is_finite()
    }
}

/// Extracts the highest-confidence grasp candidates from decoded maps.
///
/// Scans the position map for local maxima at or above the confidence floor,
/// ranks them by descending quality (row-major pixel order breaks ties), and
/// greedily keeps peaks that are farther than the suppression radius from
/// every already-kept peak, up to `max_candidates`. Each kept peak reads its
/// angle and width from the matching map position.
///
/// Deterministic: identical inputs produce identical candidate lists in
/// identical order.
#[must_use]
pub fn extract(maps: &GraspMaps, config: &ExtractConfig) -> Vec<GraspCandidate> {
    let position = maps.position();
    let (rows, cols) = position.shape();
    let radius = config.suppression_radius;

    let mut peaks = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let quality = position.get(row, col);
            if quality < config.min_quality {
                continue;
            }
            if !is_local_maximum(position, row, col, radius) {
                continue;
            }
            peaks.push(GraspCandidate::new(
                row,
                col,
                maps.angle().get(row, col),
                maps.width().get(row, col),
                quality,
            ));
        }
    }

    peaks.sort_by(GraspCandidate::ranking);

    let mut selected: Vec<GraspCandidate> = Vec::with_capacity(config.max_candidates);
    for peak in peaks {
        if selected.len() >= config.max_candidates {
            break;
        }
        let separated = selected.iter().all(|kept| {
            kept.row.abs_diff(peak.row) > radius || kept.col.abs_diff(peak.col) > radius
        });
        if separated {
            selected.push(peak);
        }
    }

    selected
}

/// Checks whether `(row, col)` dominates its Chebyshev-radius window.
///
/// Strictly greater than every neighbor, except that on plateaus the
/// row-major-first pixel wins: an equal-valued neighbor earlier in scan
/// order disqualifies this one.
fn is_local_maximum(position: &GraspMap, row: usize, col: usize, radius: usize) -> bool {
    let (rows, cols) = position.shape();
    let value = position.get(row, col);

    let row_lo = row.saturating_sub(radius);
    let row_hi = (row + radius).min(rows - 1);
    let col_lo = col.saturating_sub(radius);
    let col_hi = (col + radius).min(cols - 1);

    for r in row_lo..=row_hi {
        for c in col_lo..=col_hi {
            if r == row && c == col {
                continue;
            }
            let neighbor = position.get(r, c);
            if neighbor > value {
                return false;
            }
            if neighbor == value && (r, c) < (row, col) {
                return false;
            }
        }
    }
    true
}
