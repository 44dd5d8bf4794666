//! Dataset splitting utilities.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::sample::GraspSample;

/// Ratio for splitting datasets into train/validation sets.
///
/// The ratio specifies the proportion of data to use for training.
/// The remainder goes to validation.
///
/// # Example
///
/// ```
/// use grasp_dataset::SplitRatio;
///
/// // 80% train, 20% validation
/// let ratio = SplitRatio::new(0.8);
/// assert!((ratio.train_ratio() - 0.8).abs() < 1e-6);
/// assert!((ratio.val_ratio() - 0.2).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatio {
    train: f32,
}

impl SplitRatio {
    /// Creates a new split ratio.
    ///
    /// # Arguments
    ///
    /// - `train`: Proportion for training (must be in `(0, 1)`)
    ///
    /// # Panics
    ///
    /// Panics if ratio is not in `(0, 1)`.
    #[must_use]
    pub fn new(train: f32) -> Self {
        assert!(
            train > 0.0 && train < 1.0,
            "Split ratio must be in (0, 1), got {train}"
        );
        Self { train }
    }

    /// Creates a split ratio, returning `None` if invalid.
    #[must_use]
    pub fn try_new(train: f32) -> Option<Self> {
        if train > 0.0 && train < 1.0 {
            Some(Self { train })
        } else {
            None
        }
    }

    /// Returns the training ratio.
    #[must_use]
    pub const fn train_ratio(&self) -> f32 {
        self.train
    }

    /// Returns the validation ratio.
    #[must_use]
    pub fn val_ratio(&self) -> f32 {
        1.0 - self.train
    }

    /// Computes the split point for a given dataset size.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn split_point(&self, total: usize) -> usize {
        (total as f32 * self.train).round() as usize
    }

    /// Common 80/20 split.
    pub const EIGHTY_TWENTY: Self = Self { train: 0.8 };

    /// Common 90/10 split.
    pub const NINETY_TEN: Self = Self { train: 0.9 };
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self::EIGHTY_TWENTY
    }
}

/// Splits a dataset into training and validation sets.
///
/// The shuffle is driven by a locally constructed RNG — a fixed `seed` gives
/// a fully deterministic split, and nothing touches process-global random
/// state.
///
/// # Arguments
///
/// - `samples`: The samples to split
/// - `ratio`: Train/val ratio
/// - `seed`: Optional random seed for reproducibility
///
/// # Returns
///
/// Tuple of `(train, val)` sample vectors.
///
/// # Example
///
/// ```
/// use grasp_dataset::{GraspSample, split_dataset, SplitRatio};
///
/// let samples: Vec<GraspSample> = (0..10).map(GraspSample::empty).collect();
///
/// let (train, val) = split_dataset(&samples, SplitRatio::EIGHTY_TWENTY, Some(42));
/// assert_eq!(train.len(), 8);
/// assert_eq!(val.len(), 2);
/// ```
#[must_use]
pub fn split_dataset(
    samples: &[GraspSample],
    ratio: SplitRatio,
    seed: Option<u64>,
) -> (Vec<GraspSample>, Vec<GraspSample>) {
    if samples.is_empty() {
        return (Vec::new(), Vec::new());
    }

    // Create shuffled indices
    let mut indices: Vec<usize> = (0..samples.len()).collect();

    let mut rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    indices.shuffle(&mut rng);

    // Split at the computed point
    let split = ratio
        .split_point(samples.len())
        .max(1)
        .min(samples.len() - 1);

    let train_indices = &indices[..split];
    let val_indices = &indices[split..];

    let train = train_indices.iter().map(|&i| samples[i].clone()).collect();
    let val = val_indices.iter().map(|&i| samples[i].clone()).collect();

    (train, val)
}

/// Splits a dataset with stratification by labeled/unlabeled samples.
///
/// Ensures both train and val sets have similar proportions of samples
/// with/without ground-truth rectangles.
///
/// # Arguments
///
/// - `samples`: The samples to split
/// - `ratio`: Train/val ratio
/// - `seed`: Optional random seed for reproducibility
///
/// # Returns
///
/// Tuple of `(train, val)` sample vectors.
///
/// # Example
///
/// ```
/// use grasp_dataset::{GraspSample, split_stratified, SplitRatio};
/// use grasp_types::GraspRectangle;
///
/// let mut samples: Vec<GraspSample> = (0..10).map(GraspSample::empty).collect();
///
/// // Label a couple of samples
/// samples[0].rectangles.push(GraspRectangle::new(0, 0, 4, 4, 0.0, 10.0));
/// samples[1].rectangles.push(GraspRectangle::new(0, 0, 4, 4, 0.0, 10.0));
///
/// let (train, val) = split_stratified(&samples, SplitRatio::EIGHTY_TWENTY, Some(42));
/// assert_eq!(train.len() + val.len(), 10);
/// ```
#[must_use]
pub fn split_stratified(
    samples: &[GraspSample],
    ratio: SplitRatio,
    seed: Option<u64>,
) -> (Vec<GraspSample>, Vec<GraspSample>) {
    if samples.is_empty() {
        return (Vec::new(), Vec::new());
    }

    // Separate labeled and unlabeled samples
    let (labeled, unlabeled): (Vec<_>, Vec<_>) =
        samples.iter().partition(|s| s.has_rectangles());

    // Split each group with decorrelated seeds
    let (labeled_train, labeled_val) = split_dataset(
        &labeled.iter().map(|&s| s.clone()).collect::<Vec<_>>(),
        ratio,
        seed,
    );
    let unlabeled_seed = seed.map(|s| s.wrapping_add(1));
    let (unlabeled_train, unlabeled_val) = split_dataset(
        &unlabeled.iter().map(|&s| s.clone()).collect::<Vec<_>>(),
        ratio,
        unlabeled_seed,
    );

    let mut train = labeled_train;
    train.extend(unlabeled_train);
    let mut val = labeled_val;
    val.extend(unlabeled_val);

    (train, val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_types::GraspRectangle;

    fn labeled_sample(frame_id: u64) -> GraspSample {
        let mut sample = GraspSample::empty(frame_id);
        sample
            .rectangles
            .push(GraspRectangle::new(0, 0, 4, 4, 0.0, 10.0));
        sample
    }

    #[test]
    fn split_ratio_accessors() {
        let ratio = SplitRatio::new(0.75);
        assert!((ratio.train_ratio() - 0.75).abs() < 1e-6);
        assert!((ratio.val_ratio() - 0.25).abs() < 1e-6);
        assert_eq!(ratio.split_point(100), 75);
    }

    #[test]
    #[should_panic(expected = "must be in (0, 1)")]
    fn split_ratio_rejects_out_of_range() {
        let _ = SplitRatio::new(1.0);
    }

    #[test]
    fn split_ratio_try_new() {
        assert!(SplitRatio::try_new(0.5).is_some());
        assert!(SplitRatio::try_new(0.0).is_none());
        assert!(SplitRatio::try_new(1.5).is_none());
    }

    #[test]
    fn split_dataset_sizes() {
        let samples: Vec<GraspSample> = (0..10).map(GraspSample::empty).collect();
        let (train, val) = split_dataset(&samples, SplitRatio::EIGHTY_TWENTY, Some(42));
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(), 2);
    }

    #[test]
    fn split_dataset_empty() {
        let (train, val) = split_dataset(&[], SplitRatio::default(), Some(1));
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn split_dataset_seeded_is_deterministic() {
        let samples: Vec<GraspSample> = (0..20).map(GraspSample::empty).collect();
        let (train_a, val_a) = split_dataset(&samples, SplitRatio::default(), Some(7));
        let (train_b, val_b) = split_dataset(&samples, SplitRatio::default(), Some(7));
        assert_eq!(train_a, train_b);
        assert_eq!(val_a, val_b);
    }

    #[test]
    fn split_dataset_different_seeds_differ() {
        let samples: Vec<GraspSample> = (0..50).map(GraspSample::empty).collect();
        let (train_a, _) = split_dataset(&samples, SplitRatio::default(), Some(1));
        let (train_b, _) = split_dataset(&samples, SplitRatio::default(), Some(2));
        let ids_a: Vec<u64> = train_a.iter().map(|s| s.frame_id).collect();
        let ids_b: Vec<u64> = train_b.iter().map(|s| s.frame_id).collect();
        assert_ne!(ids_a, ids_b);
    }

    #[test]
    fn split_dataset_never_empties_either_side() {
        let samples: Vec<GraspSample> = (0..2).map(GraspSample::empty).collect();
        let (train, val) = split_dataset(&samples, SplitRatio::new(0.99), Some(3));
        assert_eq!(train.len(), 1);
        assert_eq!(val.len(), 1);
    }

    #[test]
    fn split_stratified_preserves_all_samples() {
        let mut samples: Vec<GraspSample> = (0..10).map(GraspSample::empty).collect();
        samples[0] = labeled_sample(0);
        samples[5] = labeled_sample(5);

        let (train, val) = split_stratified(&samples, SplitRatio::EIGHTY_TWENTY, Some(42));
        assert_eq!(train.len() + val.len(), 10);
    }

    #[test]
    fn split_stratified_balances_labeled() {
        let samples: Vec<GraspSample> = (0..20)
            .map(|i| {
                if i < 10 {
                    labeled_sample(i)
                } else {
                    GraspSample::empty(i)
                }
            })
            .collect();

        let (train, val) = split_stratified(&samples, SplitRatio::EIGHTY_TWENTY, Some(42));
        let train_labeled = train.iter().filter(|s| s.has_rectangles()).count();
        let val_labeled = val.iter().filter(|s| s.has_rectangles()).count();
        assert_eq!(train_labeled, 8);
        assert_eq!(val_labeled, 2);
    }

    #[test]
    fn split_ratio_serialization() {
        let ratio = SplitRatio::new(0.7);
        let json = serde_json::to_string(&ratio);
        assert!(json.is_ok());

        let parsed: std::result::Result<SplitRatio, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), ratio);
    }
}
