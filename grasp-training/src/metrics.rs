//! Training metrics and validation records.

use serde::{Deserialize, Serialize};

use crate::loss::LossTerms;

/// Metrics for a single training epoch.
///
/// # Example
///
/// ```
/// use grasp_training::EpochMetrics;
///
/// let metrics = EpochMetrics::new(0, 0.5, Some(0.4)).with_accuracy(0.7);
/// assert_eq!(metrics.epoch, 0);
/// assert!((metrics.accuracy.unwrap() - 0.7).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Epoch number (0-indexed).
    pub epoch: usize,

    /// Training loss for this epoch.
    pub train_loss: f32,

    /// Per-term training loss breakdown.
    pub train_terms: LossTerms,

    /// Validation loss (if computed).
    pub val_loss: Option<f32>,

    /// Per-term validation loss breakdown (if computed).
    pub val_terms: Option<LossTerms>,

    /// Validation grasp accuracy (fraction of images with a valid grasp).
    pub accuracy: Option<f32>,

    /// Mean peak position confidence over validation images.
    pub graspable: Option<f32>,

    /// Learning rate used.
    pub learning_rate: f32,

    /// Training time in seconds.
    pub train_time_secs: f32,

    /// Validation time in seconds.
    pub val_time_secs: Option<f32>,

    /// Number of training samples processed.
    pub train_samples: usize,

    /// Number of validation samples processed.
    pub val_samples: Option<usize>,
}

impl EpochMetrics {
    /// Creates new epoch metrics.
    #[must_use]
    pub const fn new(epoch: usize, train_loss: f32, val_loss: Option<f32>) -> Self {
        Self {
            epoch,
            train_loss,
            train_terms: LossTerms::new(0.0, 0.0, 0.0, 0.0),
            val_loss,
            val_terms: None,
            accuracy: None,
            graspable: None,
            learning_rate: 0.0,
            train_time_secs: 0.0,
            val_time_secs: None,
            train_samples: 0,
            val_samples: None,
        }
    }

    /// Sets the per-term training losses.
    #[must_use]
    pub const fn with_train_terms(mut self, terms: LossTerms) -> Self {
        self.train_terms = terms;
        self
    }

    /// Sets the per-term validation losses.
    #[must_use]
    pub const fn with_val_terms(mut self, terms: LossTerms) -> Self {
        self.val_terms = Some(terms);
        self
    }

    /// Sets the validation accuracy.
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Sets the graspable score.
    #[must_use]
    pub const fn with_graspable(mut self, graspable: f32) -> Self {
        self.graspable = Some(graspable);
        self
    }

    /// Sets the learning rate.
    #[must_use]
    pub const fn with_learning_rate(mut self, lr: f32) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Sets the training time.
    #[must_use]
    pub const fn with_train_time(mut self, secs: f32) -> Self {
        self.train_time_secs = secs;
        self
    }

    /// Sets the validation time.
    #[must_use]
    pub const fn with_val_time(mut self, secs: f32) -> Self {
        self.val_time_secs = Some(secs);
        self
    }

    /// Sets sample counts.
    #[must_use]
    pub const fn with_samples(mut self, train: usize, val: Option<usize>) -> Self {
        self.train_samples = train;
        self.val_samples = val;
        self
    }

    /// Returns total time (train + val) in seconds.
    #[must_use]
    pub fn total_time_secs(&self) -> f32 {
        self.train_time_secs + self.val_time_secs.unwrap_or(0.0)
    }

    /// Returns true if validation loss improved on the previous best.
    #[must_use]
    pub fn val_improved(&self, previous_best: Option<f32>) -> bool {
        match (self.val_loss, previous_best) {
            (Some(current), Some(best)) => current < best,
            (Some(_), None) => true, // First validation
            (None, _) => false,
        }
    }
}

/// Aggregate metrics for a training run.
///
/// # Example
///
/// ```
/// use grasp_training::{EpochMetrics, TrainingMetrics};
///
/// let mut metrics = TrainingMetrics::new();
/// metrics.add_epoch(EpochMetrics::new(0, 0.5, Some(0.4)).with_accuracy(0.6));
/// metrics.add_epoch(EpochMetrics::new(1, 0.3, Some(0.35)).with_accuracy(0.8));
///
/// assert_eq!(metrics.epochs_completed(), 2);
/// assert!((metrics.best_accuracy.unwrap() - 0.8).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Metrics for each epoch.
    pub epoch_metrics: Vec<EpochMetrics>,

    /// Best validation loss seen.
    pub best_val_loss: Option<f32>,

    /// Epoch with best validation loss.
    pub best_epoch: Option<usize>,

    /// Best validation accuracy seen.
    pub best_accuracy: Option<f32>,

    /// Epoch with best validation accuracy.
    pub best_accuracy_epoch: Option<usize>,

    /// Total training time in seconds.
    pub total_time_secs: f32,

    /// Whether training was early stopped.
    pub early_stopped: bool,

    /// Reason for stopping (if not completed normally).
    pub stop_reason: Option<String>,
}

impl TrainingMetrics {
    /// Creates new empty training metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds metrics for an epoch.
    pub fn add_epoch(&mut self, metrics: EpochMetrics) {
        if let Some(val_loss) = metrics.val_loss {
            if self.best_val_loss.is_none() || val_loss < self.best_val_loss.unwrap_or(f32::MAX) {
                self.best_val_loss = Some(val_loss);
                self.best_epoch = Some(metrics.epoch);
            }
        }

        if let Some(accuracy) = metrics.accuracy {
            if self.best_accuracy.is_none()
                || accuracy >= self.best_accuracy.unwrap_or(f32::MIN)
            {
                self.best_accuracy = Some(accuracy);
                self.best_accuracy_epoch = Some(metrics.epoch);
            }
        }

        self.total_time_secs += metrics.total_time_secs();
        self.epoch_metrics.push(metrics);
    }

    /// Returns the number of completed epochs.
    #[must_use]
    pub fn epochs_completed(&self) -> usize {
        self.epoch_metrics.len()
    }

    /// Returns the final training loss.
    #[must_use]
    pub fn final_loss(&self) -> f32 {
        self.epoch_metrics.last().map_or(f32::NAN, |m| m.train_loss)
    }

    /// Returns the final validation loss.
    #[must_use]
    pub fn final_val_loss(&self) -> Option<f32> {
        self.epoch_metrics.last().and_then(|m| m.val_loss)
    }

    /// Returns the initial training loss.
    #[must_use]
    pub fn initial_loss(&self) -> f32 {
        self.epoch_metrics
            .first()
            .map_or(f32::NAN, |m| m.train_loss)
    }

    /// Returns the loss improvement ratio.
    #[must_use]
    pub fn loss_improvement(&self) -> f32 {
        let initial = self.initial_loss();
        let final_loss = self.final_loss();
        if initial > 0.0 && !initial.is_nan() && !final_loss.is_nan() {
            1.0 - (final_loss / initial)
        } else {
            0.0
        }
    }

    /// Returns training losses as a vector.
    #[must_use]
    pub fn train_losses(&self) -> Vec<f32> {
        self.epoch_metrics.iter().map(|m| m.train_loss).collect()
    }

    /// Returns validation accuracies as a vector.
    #[must_use]
    pub fn accuracies(&self) -> Vec<Option<f32>> {
        self.epoch_metrics.iter().map(|m| m.accuracy).collect()
    }

    /// Marks training as early stopped.
    pub fn set_early_stopped(&mut self, reason: impl Into<String>) {
        self.early_stopped = true;
        self.stop_reason = Some(reason.into());
    }

    /// Returns a human-readable summary.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut s = String::new();
        let _ = writeln!(s, "Training Summary");
        let _ = writeln!(s, "================");
        let _ = writeln!(s, "Epochs completed: {}", self.epochs_completed());
        let _ = writeln!(s, "Total time: {:.1}s", self.total_time_secs);
        let _ = writeln!(
            s,
            "Initial loss: {:.4} -> Final loss: {:.4}",
            self.initial_loss(),
            self.final_loss()
        );
        let _ = writeln!(s, "Improvement: {:.1}%", self.loss_improvement() * 100.0);

        if let Some(best) = self.best_val_loss {
            let _ = writeln!(
                s,
                "Best val loss: {:.4} (epoch {})",
                best,
                self.best_epoch.unwrap_or(0)
            );
        }

        if let Some(best) = self.best_accuracy {
            let _ = writeln!(
                s,
                "Best accuracy: {:.4} (epoch {})",
                best,
                self.best_accuracy_epoch.unwrap_or(0)
            );
        }

        if self.early_stopped {
            let _ = writeln!(
                s,
                "Early stopped: {}",
                self.stop_reason.as_deref().unwrap_or("yes")
            );
        }

        s
    }
}

/// Fixed-shape result of one validation pass.
///
/// The per-image quantities (evaluation success, peak confidence) are
/// averaged into `accuracy` and `graspable`; [`ValidationAccumulator`]
/// builds one of these incrementally over the validation set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Mean validation loss.
    pub loss: f32,

    /// Mean per-term validation losses.
    pub terms: LossTerms,

    /// Fraction of images where a predicted grasp matched ground truth.
    pub accuracy: f32,

    /// Mean peak position confidence.
    pub graspable: f32,
}

/// Incremental accumulator for a validation pass.
///
/// # Example
///
/// ```
/// use grasp_training::{LossTerms, ValidationAccumulator};
///
/// let mut acc = ValidationAccumulator::new();
/// acc.add(0.4, LossTerms::new(0.1, 0.1, 0.1, 0.1), true, 0.9);
/// acc.add(0.6, LossTerms::new(0.2, 0.2, 0.1, 0.1), false, 0.5);
///
/// let outcome = acc.finish();
/// assert!((outcome.loss - 0.5).abs() < 1e-6);
/// assert!((outcome.accuracy - 0.5).abs() < 1e-6);
/// assert!((outcome.graspable - 0.7).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationAccumulator {
    loss_sum: f32,
    terms_sum: LossTerms,
    successes: usize,
    graspable_sum: f32,
    count: usize,
}

impl ValidationAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one validation image.
    pub fn add(&mut self, loss: f32, terms: LossTerms, success: bool, peak_confidence: f32) {
        self.loss_sum += loss;
        self.terms_sum.accumulate(&terms);
        if success {
            self.successes += 1;
        }
        self.graspable_sum += peak_confidence;
        self.count += 1;
    }

    /// Returns the number of recorded images.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Finishes the pass and returns the averaged outcome.
    ///
    /// An empty accumulator yields all zeros.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self) -> ValidationOutcome {
        if self.count == 0 {
            return ValidationOutcome {
                loss: 0.0,
                terms: LossTerms::default(),
                accuracy: 0.0,
                graspable: 0.0,
            };
        }

        let n = self.count as f32;
        let mut terms = self.terms_sum;
        terms.scale(1.0 / n);

        ValidationOutcome {
            loss: self.loss_sum / n,
            terms,
            accuracy: self.successes as f32 / n,
            graspable: self.graspable_sum / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_metrics_new() {
        let metrics = EpochMetrics::new(0, 0.5, Some(0.4));
        assert_eq!(metrics.epoch, 0);
        assert!((metrics.train_loss - 0.5).abs() < 1e-6);
        assert!((metrics.val_loss.unwrap() - 0.4).abs() < 1e-6);
        assert!(metrics.accuracy.is_none());
    }

    #[test]
    fn epoch_metrics_builder() {
        let metrics = EpochMetrics::new(1, 0.3, None)
            .with_train_terms(LossTerms::new(0.1, 0.05, 0.05, 0.1))
            .with_accuracy(0.85)
            .with_graspable(0.9)
            .with_learning_rate(1e-3)
            .with_train_time(10.0)
            .with_val_time(2.0)
            .with_samples(1000, Some(200));

        assert!((metrics.train_terms.pos - 0.1).abs() < 1e-6);
        assert!((metrics.accuracy.unwrap() - 0.85).abs() < 1e-6);
        assert!((metrics.graspable.unwrap() - 0.9).abs() < 1e-6);
        assert!((metrics.learning_rate - 1e-3).abs() < 1e-6);
        assert!((metrics.total_time_secs() - 12.0).abs() < 1e-6);
        assert_eq!(metrics.train_samples, 1000);
        assert_eq!(metrics.val_samples, Some(200));
    }

    #[test]
    fn epoch_metrics_val_improved() {
        let metrics = EpochMetrics::new(0, 0.5, Some(0.4));

        assert!(metrics.val_improved(Some(0.5)));
        assert!(!metrics.val_improved(Some(0.3)));
        assert!(metrics.val_improved(None));
    }

    #[test]
    fn training_metrics_add_epoch() {
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(EpochMetrics::new(0, 0.5, Some(0.4)).with_train_time(10.0));
        metrics.add_epoch(EpochMetrics::new(1, 0.3, Some(0.35)).with_train_time(10.0));

        assert_eq!(metrics.epochs_completed(), 2);
        assert!((metrics.final_loss() - 0.3).abs() < 1e-6);
        assert!((metrics.final_val_loss().unwrap() - 0.35).abs() < 1e-6);
        assert!((metrics.best_val_loss.unwrap() - 0.35).abs() < 1e-6);
        assert_eq!(metrics.best_epoch, Some(1));
        assert!((metrics.total_time_secs - 20.0).abs() < 1e-6);
    }

    #[test]
    fn training_metrics_tracks_best_accuracy() {
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(EpochMetrics::new(0, 0.5, None).with_accuracy(0.6));
        metrics.add_epoch(EpochMetrics::new(1, 0.4, None).with_accuracy(0.8));
        metrics.add_epoch(EpochMetrics::new(2, 0.3, None).with_accuracy(0.7));

        assert!((metrics.best_accuracy.unwrap() - 0.8).abs() < 1e-6);
        assert_eq!(metrics.best_accuracy_epoch, Some(1));
    }

    #[test]
    fn training_metrics_ties_prefer_later_epoch() {
        // A repeat of the best accuracy moves the best epoch forward, the
        // same way the best checkpoint is overwritten on ties.
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(EpochMetrics::new(0, 0.5, None).with_accuracy(0.8));
        metrics.add_epoch(EpochMetrics::new(1, 0.4, None).with_accuracy(0.8));

        assert_eq!(metrics.best_accuracy_epoch, Some(1));
    }

    #[test]
    fn training_metrics_loss_improvement() {
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(EpochMetrics::new(0, 1.0, None));
        metrics.add_epoch(EpochMetrics::new(1, 0.5, None));

        assert!((metrics.loss_improvement() - 0.5).abs() < 1e-6);
        assert!((metrics.initial_loss() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn training_metrics_vectors() {
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(EpochMetrics::new(0, 0.5, None).with_accuracy(0.6));
        metrics.add_epoch(EpochMetrics::new(1, 0.3, None));

        assert_eq!(metrics.train_losses(), vec![0.5, 0.3]);
        assert_eq!(metrics.accuracies(), vec![Some(0.6), None]);
    }

    #[test]
    fn training_metrics_early_stopped() {
        let mut metrics = TrainingMetrics::new();
        metrics.set_early_stopped("no improvement for 10 epochs");

        assert!(metrics.early_stopped);
        assert_eq!(
            metrics.stop_reason,
            Some("no improvement for 10 epochs".to_string())
        );
    }

    #[test]
    fn training_metrics_summary() {
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(
            EpochMetrics::new(0, 1.0, Some(0.9))
                .with_accuracy(0.5)
                .with_train_time(5.0),
        );
        metrics.add_epoch(
            EpochMetrics::new(1, 0.5, Some(0.45))
                .with_accuracy(0.7)
                .with_train_time(5.0),
        );

        let summary = metrics.summary();
        assert!(summary.contains("Epochs completed: 2"));
        assert!(summary.contains("Best val loss:"));
        assert!(summary.contains("Best accuracy:"));
    }

    #[test]
    fn validation_accumulator_averages() {
        let mut acc = ValidationAccumulator::new();
        acc.add(0.4, LossTerms::new(0.1, 0.1, 0.1, 0.1), true, 0.9);
        acc.add(0.6, LossTerms::new(0.3, 0.1, 0.1, 0.1), false, 0.5);
        assert_eq!(acc.count(), 2);

        let outcome = acc.finish();
        assert!((outcome.loss - 0.5).abs() < 1e-6);
        assert!((outcome.terms.pos - 0.2).abs() < 1e-6);
        assert!((outcome.accuracy - 0.5).abs() < 1e-6);
        assert!((outcome.graspable - 0.7).abs() < 1e-6);
    }

    #[test]
    fn validation_accumulator_empty() {
        let outcome = ValidationAccumulator::new().finish();
        assert!(outcome.loss.abs() < 1e-6);
        assert!(outcome.accuracy.abs() < 1e-6);
        assert!(outcome.graspable.abs() < 1e-6);
    }

    #[test]
    fn epoch_metrics_serialization() {
        let metrics = EpochMetrics::new(0, 0.5, Some(0.4)).with_accuracy(0.85);

        let json = serde_json::to_string(&metrics);
        assert!(json.is_ok());

        let parsed: Result<EpochMetrics, _> = serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        if let Ok(m) = parsed {
            assert_eq!(m, metrics);
        }
    }

    #[test]
    fn training_metrics_serialization() {
        let mut metrics = TrainingMetrics::new();
        metrics.add_epoch(EpochMetrics::new(0, 0.5, Some(0.4)));

        let json = serde_json::to_string(&metrics);
        assert!(json.is_ok());

        let parsed: Result<TrainingMetrics, _> = serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), metrics);
    }
}
