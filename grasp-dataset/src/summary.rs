//! Dataset summary and statistics.

use serde::{Deserialize, Serialize};

use crate::sample::GraspSample;

/// Summary statistics for a grasp dataset.
///
/// Aggregate information about dataset composition, useful for validation
/// and debugging before a training run.
///
/// # Example
///
/// ```
/// use grasp_dataset::{DatasetSummary, GraspSample};
///
/// let samples: Vec<GraspSample> = (0..10).map(GraspSample::empty).collect();
///
/// let summary = DatasetSummary::from_samples(&samples);
/// assert_eq!(summary.total_samples, 10);
/// assert_eq!(summary.labeled_samples, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Total number of samples.
    pub total_samples: usize,

    /// Number of samples with at least one ground-truth rectangle.
    pub labeled_samples: usize,

    /// Number of samples with no ground-truth rectangles.
    pub unlabeled_samples: usize,

    /// Total number of ground-truth rectangles across all samples.
    pub total_rectangles: usize,

    /// Average rectangles per labeled sample.
    pub avg_rectangles_per_labeled: f32,

    /// Labeled sample ratio (0 to 1).
    pub labeled_ratio: f32,

    /// Distribution of rectangle counts (index = count, value = frequency).
    pub rectangle_count_histogram: Vec<usize>,

    /// Mean labeled gripper width in pixels, 0.0 if no rectangles.
    pub mean_rectangle_width: f32,
}

impl Default for DatasetSummary {
    fn default() -> Self {
        Self {
            total_samples: 0,
            labeled_samples: 0,
            unlabeled_samples: 0,
            total_rectangles: 0,
            avg_rectangles_per_labeled: 0.0,
            labeled_ratio: 0.0,
            rectangle_count_histogram: Vec::new(),
            mean_rectangle_width: 0.0,
        }
    }
}

impl DatasetSummary {
    /// Creates a summary from a slice of samples.
    #[must_use]
    pub fn from_samples(samples: &[GraspSample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let total_samples = samples.len();
        let mut labeled_samples = 0;
        let mut total_rectangles = 0;
        let mut max_rectangles = 0;
        let mut width_sum = 0.0_f32;

        for sample in samples {
            let count = sample.num_rectangles();
            if count > 0 {
                labeled_samples += 1;
            }
            total_rectangles += count;
            max_rectangles = max_rectangles.max(count);
            for rect in &sample.rectangles {
                width_sum += rect.width;
            }
        }

        let unlabeled_samples = total_samples - labeled_samples;

        #[allow(clippy::cast_precision_loss)]
        let avg_rectangles_per_labeled = if labeled_samples > 0 {
            total_rectangles as f32 / labeled_samples as f32
        } else {
            0.0
        };

        #[allow(clippy::cast_precision_loss)]
        let labeled_ratio = labeled_samples as f32 / total_samples as f32;

        #[allow(clippy::cast_precision_loss)]
        let mean_rectangle_width = if total_rectangles > 0 {
            width_sum / total_rectangles as f32
        } else {
            0.0
        };

        let mut rectangle_count_histogram = vec![0; max_rectangles + 1];
        for sample in samples {
            rectangle_count_histogram[sample.num_rectangles()] += 1;
        }

        Self {
            total_samples,
            labeled_samples,
            unlabeled_samples,
            total_rectangles,
            avg_rectangles_per_labeled,
            labeled_ratio,
            rectangle_count_histogram,
            mean_rectangle_width,
        }
    }

    /// Returns `true` if every sample carries at least one rectangle.
    #[must_use]
    pub fn is_fully_labeled(&self) -> bool {
        self.total_samples > 0 && self.labeled_samples == self.total_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_types::GraspRectangle;

    fn sample_with_rectangles(frame_id: u64, count: usize, width: f32) -> GraspSample {
        let mut sample = GraspSample::empty(frame_id);
        for _ in 0..count {
            sample
                .rectangles
                .push(GraspRectangle::new(0, 0, 4, 4, 0.0, width));
        }
        sample
    }

    #[test]
    fn summary_empty_dataset() {
        let summary = DatasetSummary::from_samples(&[]);
        assert_eq!(summary, DatasetSummary::default());
        assert!(!summary.is_fully_labeled());
    }

    #[test]
    fn summary_counts() {
        let samples = vec![
            sample_with_rectangles(0, 2, 30.0),
            sample_with_rectangles(1, 1, 60.0),
            GraspSample::empty(2),
        ];
        let summary = DatasetSummary::from_samples(&samples);

        assert_eq!(summary.total_samples, 3);
        assert_eq!(summary.labeled_samples, 2);
        assert_eq!(summary.unlabeled_samples, 1);
        assert_eq!(summary.total_rectangles, 3);
        assert!((summary.avg_rectangles_per_labeled - 1.5).abs() < 1e-6);
        assert!((summary.labeled_ratio - 2.0 / 3.0).abs() < 1e-6);
        assert!((summary.mean_rectangle_width - 40.0).abs() < 1e-6);
    }

    #[test]
    fn summary_histogram() {
        let samples = vec![
            sample_with_rectangles(0, 2, 30.0),
            sample_with_rectangles(1, 2, 30.0),
            GraspSample::empty(2),
        ];
        let summary = DatasetSummary::from_samples(&samples);

        assert_eq!(summary.rectangle_count_histogram, vec![1, 0, 2]);
    }

    #[test]
    fn summary_fully_labeled() {
        let samples = vec![
            sample_with_rectangles(0, 1, 30.0),
            sample_with_rectangles(1, 3, 30.0),
        ];
        let summary = DatasetSummary::from_samples(&samples);
        assert!(summary.is_fully_labeled());
    }

    #[test]
    fn summary_serialization() {
        let samples = vec![sample_with_rectangles(0, 1, 30.0)];
        let summary = DatasetSummary::from_samples(&samples);

        let json = serde_json::to_string(&summary);
        assert!(json.is_ok());

        let parsed: std::result::Result<DatasetSummary, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), summary);
    }
}
