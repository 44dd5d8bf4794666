//! Training configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a training run.
///
/// # Example
///
/// ```
/// use grasp_training::TrainingConfig;
///
/// let config = TrainingConfig::default();
/// assert_eq!(config.epochs, 100);
/// assert_eq!(config.batch_size, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training epochs.
    pub epochs: usize,

    /// Batch size.
    pub batch_size: usize,

    /// Optimizer configuration.
    pub optimizer: OptimizerConfig,

    /// Learning rate schedule.
    pub lr_schedule: LearningRateSchedule,

    /// Whether to shuffle data each epoch.
    pub shuffle: bool,

    /// Validation frequency (epochs between validations).
    pub val_frequency: usize,

    /// Checkpoint frequency (epochs between saves).
    pub checkpoint_frequency: usize,

    /// Maximum non-best checkpoints kept on disk (0 = unlimited).
    pub max_checkpoints: usize,

    /// Early stopping patience (0 = disabled).
    pub early_stopping_patience: usize,

    /// Gradient clipping threshold (0.0 = disabled).
    pub gradient_clip: f32,

    /// Random seed for reproducibility.
    ///
    /// Threaded explicitly into every stochastic operation; process-global
    /// RNG state is never touched.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 8,
            optimizer: OptimizerConfig::default(),
            lr_schedule: LearningRateSchedule::default(),
            shuffle: true,
            val_frequency: 1,
            checkpoint_frequency: 1,
            max_checkpoints: 3,
            early_stopping_patience: 0,
            gradient_clip: 0.0,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Creates a new training config with the given epochs.
    #[must_use]
    pub const fn new(epochs: usize) -> Self {
        Self {
            epochs,
            batch_size: 8,
            optimizer: OptimizerConfig::adam(1e-3),
            lr_schedule: LearningRateSchedule::Constant,
            shuffle: true,
            val_frequency: 1,
            checkpoint_frequency: 1,
            max_checkpoints: 3,
            early_stopping_patience: 0,
            gradient_clip: 0.0,
            seed: None,
        }
    }

    /// Sets the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the optimizer.
    #[must_use]
    pub const fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets the learning rate schedule.
    #[must_use]
    pub const fn with_lr_schedule(mut self, schedule: LearningRateSchedule) -> Self {
        self.lr_schedule = schedule;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Disables shuffling.
    #[must_use]
    pub const fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `true` if all values are valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.epochs > 0
            && self.batch_size > 0
            && self.val_frequency > 0
            && self.checkpoint_frequency > 0
            && self.gradient_clip >= 0.0
            && self.optimizer.is_valid()
    }
}

/// Optimizer configuration.
///
/// # Example
///
/// ```
/// use grasp_training::OptimizerConfig;
///
/// let adam = OptimizerConfig::adam(1e-3);
/// assert_eq!(adam.learning_rate, 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Base learning rate.
    pub learning_rate: f32,

    /// Weight decay (L2 regularization).
    pub weight_decay: f32,

    /// Optimizer type.
    pub optimizer_type: OptimizerType,

    /// Momentum (for SGD).
    pub momentum: f32,

    /// Beta1 (for Adam).
    pub beta1: f32,

    /// Beta2 (for Adam).
    pub beta2: f32,

    /// Epsilon for numerical stability.
    pub epsilon: f32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::adam(1e-3)
    }
}

impl OptimizerConfig {
    /// Creates an Adam optimizer config.
    #[must_use]
    pub const fn adam(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            weight_decay: 0.0,
            optimizer_type: OptimizerType::Adam,
            momentum: 0.0,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }

    /// Creates an SGD optimizer config.
    #[must_use]
    pub const fn sgd(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            weight_decay: 0.0,
            optimizer_type: OptimizerType::Sgd,
            momentum: 0.0,
            beta1: 0.0,
            beta2: 0.0,
            epsilon: 1e-8,
        }
    }

    /// Creates an SGD with momentum optimizer config.
    #[must_use]
    pub const fn sgd_momentum(learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            weight_decay: 0.0,
            optimizer_type: OptimizerType::SgdMomentum,
            momentum,
            beta1: 0.0,
            beta2: 0.0,
            epsilon: 1e-8,
        }
    }

    /// Sets weight decay.
    #[must_use]
    pub const fn with_weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.learning_rate > 0.0
            && self.weight_decay >= 0.0
            && self.momentum >= 0.0
            && self.momentum <= 1.0
            && self.beta1 >= 0.0
            && self.beta1 < 1.0
            && self.beta2 >= 0.0
            && self.beta2 < 1.0
            && self.epsilon > 0.0
    }
}

/// Type of optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizerType {
    /// Stochastic Gradient Descent.
    Sgd,
    /// SGD with momentum.
    SgdMomentum,
    /// Adam optimizer.
    Adam,
}

/// Learning rate schedule.
///
/// # Example
///
/// ```
/// use grasp_training::LearningRateSchedule;
///
/// let schedule = LearningRateSchedule::step(0.5, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum LearningRateSchedule {
    /// Constant learning rate.
    #[default]
    Constant,

    /// Step decay: multiply by factor every `step_size` epochs.
    Step {
        /// Decay factor.
        factor: f32,
        /// Epochs between decays.
        step_size: usize,
    },

    /// Exponential decay: lr * gamma^epoch.
    Exponential {
        /// Decay rate per epoch.
        gamma: f32,
    },

    /// Cosine annealing to minimum.
    Cosine {
        /// Minimum learning rate.
        min_lr: f32,
    },

    /// Linear warmup followed by cosine decay.
    WarmupCosine {
        /// Warmup epochs.
        warmup_epochs: usize,
        /// Minimum learning rate.
        min_lr: f32,
    },
}

impl LearningRateSchedule {
    /// Creates a step decay schedule.
    #[must_use]
    pub const fn step(factor: f32, step_size: usize) -> Self {
        Self::Step { factor, step_size }
    }

    /// Creates an exponential decay schedule.
    #[must_use]
    pub const fn exponential(gamma: f32) -> Self {
        Self::Exponential { gamma }
    }

    /// Creates a cosine annealing schedule.
    #[must_use]
    pub const fn cosine(min_lr: f32) -> Self {
        Self::Cosine { min_lr }
    }

    /// Creates a warmup + cosine schedule.
    #[must_use]
    pub const fn warmup_cosine(warmup_epochs: usize, min_lr: f32) -> Self {
        Self::WarmupCosine {
            warmup_epochs,
            min_lr,
        }
    }

    /// Computes the learning rate for a given epoch.
    ///
    /// # Arguments
    ///
    /// - `base_lr`: The base learning rate
    /// - `epoch`: Current epoch (0-indexed)
    /// - `total_epochs`: Total number of epochs
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap
    )]
    pub fn compute_lr(&self, base_lr: f32, epoch: usize, total_epochs: usize) -> f32 {
        match self {
            Self::Constant => base_lr,

            Self::Step { factor, step_size } => {
                let decays = epoch / step_size;
                base_lr * factor.powi(decays as i32)
            }

            Self::Exponential { gamma } => base_lr * gamma.powi(epoch as i32),

            Self::Cosine { min_lr } => {
                let progress = epoch as f32 / total_epochs as f32;
                let cosine = (std::f32::consts::PI * progress).cos();
                min_lr + (base_lr - min_lr) * (1.0 + cosine) / 2.0
            }

            Self::WarmupCosine {
                warmup_epochs,
                min_lr,
            } => {
                if epoch < *warmup_epochs {
                    // Linear warmup
                    base_lr * (epoch + 1) as f32 / *warmup_epochs as f32
                } else {
                    // Cosine decay
                    let remaining = total_epochs.saturating_sub(*warmup_epochs);
                    let progress = (epoch - warmup_epochs) as f32 / remaining.max(1) as f32;
                    let cosine = (std::f32::consts::PI * progress).cos();
                    min_lr + (base_lr - min_lr) * (1.0 + cosine) / 2.0
                }
            }
        }
    }
}
