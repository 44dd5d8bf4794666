//! Training loop state machine.

use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::metrics::{EpochMetrics, TrainingMetrics};

/// State of a training run.
///
/// # Example
///
/// ```
/// use grasp_training::TrainingState;
///
/// let state = TrainingState::new();
/// assert_eq!(state.epoch, 0);
/// assert!(!state.is_finished());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingState {
    /// Current epoch (0-indexed).
    pub epoch: usize,

    /// Current batch within epoch.
    pub batch: usize,

    /// Total epochs to run.
    pub total_epochs: usize,

    /// Best validation loss seen.
    pub best_val_loss: Option<f32>,

    /// Best validation accuracy seen.
    pub best_accuracy: Option<f32>,

    /// Epochs without improvement (for early stopping).
    pub epochs_without_improvement: usize,

    /// Whether training has finished.
    pub finished: bool,

    /// Accumulated metrics.
    pub metrics: TrainingMetrics,
}

impl Default for TrainingState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingState {
    /// Creates a new training state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: 0,
            batch: 0,
            total_epochs: 0,
            best_val_loss: None,
            best_accuracy: None,
            epochs_without_improvement: 0,
            finished: false,
            metrics: TrainingMetrics::new(),
        }
    }

    /// Creates a training state for the given config.
    #[must_use]
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self {
            total_epochs: config.epochs,
            ..Self::new()
        }
    }

    /// Returns true if training is finished.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the progress as a fraction [0, 1].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.total_epochs == 0 {
            0.0
        } else {
            self.epoch as f32 / self.total_epochs as f32
        }
    }

    /// Advances to the next epoch.
    pub const fn next_epoch(&mut self) {
        self.epoch += 1;
        self.batch = 0;
        if self.epoch >= self.total_epochs {
            self.finished = true;
        }
    }

    /// Advances to the next batch.
    pub const fn next_batch(&mut self) {
        self.batch += 1;
    }

    /// Records validation loss and checks for improvement.
    ///
    /// Returns true if this is a new best.
    pub fn record_val_loss(&mut self, val_loss: f32) -> bool {
        let improved =
            self.best_val_loss.is_none() || val_loss < self.best_val_loss.unwrap_or(f32::MAX);

        if improved {
            self.best_val_loss = Some(val_loss);
            self.epochs_without_improvement = 0;
        } else {
            self.epochs_without_improvement += 1;
        }

        improved
    }

    /// Records validation accuracy and checks for improvement.
    ///
    /// Returns true if this accuracy matches or beats the best seen — the
    /// signal for saving a best-model checkpoint. Ties count as improvement
    /// so a later equally-good model replaces an earlier one.
    pub fn record_accuracy(&mut self, accuracy: f32) -> bool {
        let improved =
            self.best_accuracy.is_none() || accuracy >= self.best_accuracy.unwrap_or(f32::MIN);

        if improved {
            self.best_accuracy = Some(accuracy);
        }

        improved
    }

    /// Checks if early stopping should trigger.
    #[must_use]
    pub const fn should_early_stop(&self, patience: usize) -> bool {
        patience > 0 && self.epochs_without_improvement >= patience
    }

    /// Marks training as early stopped.
    pub fn early_stop(&mut self, reason: impl Into<String>) {
        self.finished = true;
        self.metrics.set_early_stopped(reason);
    }

    /// Adds epoch metrics.
    pub fn add_epoch_metrics(&mut self, metrics: EpochMetrics) {
        self.metrics.add_epoch(metrics);
    }
}

/// Trainer for running training loops.
///
/// This provides the loop structure: scheduling, batch arithmetic, and
/// validation/checkpoint cadence. The epoch loop itself — forward, backward,
/// optimizer stepping — belongs to the caller, which drives this state
/// machine with model-specific closures.
///
/// # Example
///
/// ```
/// use grasp_training::{Trainer, TrainingConfig};
///
/// let trainer = Trainer::new(TrainingConfig::new(10));
/// assert_eq!(trainer.config().epochs, 10);
/// assert!(trainer.should_validate(0));
/// ```
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

impl Trainer {
    /// Creates a new trainer with the given config.
    #[must_use]
    pub const fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Returns the training configuration.
    #[must_use]
    pub const fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Creates initial training state.
    #[must_use]
    pub fn initial_state(&self) -> TrainingState {
        TrainingState::from_config(&self.config)
    }

    /// Computes the learning rate for the current epoch.
    #[must_use]
    pub fn compute_lr(&self, epoch: usize) -> f32 {
        self.config.lr_schedule.compute_lr(
            self.config.optimizer.learning_rate,
            epoch,
            self.config.epochs,
        )
    }

    /// Returns whether validation should run this epoch.
    #[must_use]
    pub const fn should_validate(&self, epoch: usize) -> bool {
        self.config.val_frequency > 0 && (epoch + 1) % self.config.val_frequency == 0
    }

    /// Returns whether a checkpoint should be saved this epoch.
    #[must_use]
    pub const fn should_checkpoint(&self, epoch: usize) -> bool {
        self.config.checkpoint_frequency > 0 && (epoch + 1) % self.config.checkpoint_frequency == 0
    }

    /// Computes the number of batches for a dataset size.
    #[must_use]
    pub const fn num_batches(&self, dataset_size: usize) -> usize {
        if self.config.batch_size == 0 {
            0
        } else {
            dataset_size.div_ceil(self.config.batch_size)
        }
    }

    /// Gets batch indices for a given batch number.
    ///
    /// Returns (start, end) indices into the dataset.
    #[must_use]
    pub fn batch_indices(&self, batch: usize, dataset_size: usize) -> (usize, usize) {
        let start = batch * self.config.batch_size;
        let end = ((batch + 1) * self.config.batch_size).min(dataset_size);
        (start, end)
    }
}
