//! Grasp map decoding, candidate extraction, evaluation, and training
//! plumbing.
//!
//! The network regresses four raw per-pixel channels from a depth image;
//! everything that turns those channels into a physically meaningful grasp —
//! and into a training signal — lives here:
//!
//! # Inference Path
//!
//! - [`decode`] - Raw channels → position/angle/width maps ([`DecodeConfig`])
//! - [`extract`] - Position-map peaks → ranked [`GraspCandidate`]s
//!   ([`ExtractConfig`])
//! - [`evaluate`] / [`accuracy`] - Candidates vs. ground-truth rectangles
//!   ([`EvalConfig`], [`MatchCriterion`])
//!
//! All three are pure, stateless, host-side functions — safe to call
//! concurrently on independent inputs, no device access, no locking.
//!
//! # Training Path
//!
//! - [`grasp_loss`] / [`smooth_l1`] - Per-channel Huber regression with a
//!   fixed-shape [`LossTerms`] breakdown and the raw predictions returned
//!   for reuse ([`LossWeights`])
//! - [`TrainingConfig`] / [`Trainer`] / [`TrainingState`] - Loop structure,
//!   schedules, early stopping
//! - [`EpochMetrics`] / [`TrainingMetrics`] / [`ValidationAccumulator`] -
//!   Run bookkeeping
//!
//! # Example
//!
//! ```
//! use grasp_training::{decode, evaluate, extract, DecodeConfig, EvalConfig, ExtractConfig};
//! use grasp_types::{angle, GraspMap, GraspRectangle, OutputMaps};
//!
//! // A raw output set with one confident grasp at (10, 10).
//! let mut pos = GraspMap::zeros(24, 24);
//! pos.set(10, 10, 0.9);
//! let (cos, sin) = angle::encode_doubled(0.3);
//! let raw = OutputMaps::new(
//!     pos,
//!     GraspMap::filled(24, 24, cos),
//!     GraspMap::filled(24, 24, sin),
//!     GraspMap::filled(24, 24, 40.0 / 150.0),
//! );
//!
//! let maps = decode(&raw, &DecodeConfig::default().with_smooth_passes(0));
//! let candidates = extract(&maps, &ExtractConfig::default());
//! assert_eq!(candidates[0].pixel(), (10, 10));
//!
//! let truth = [GraspRectangle::new(8, 8, 12, 12, 0.35, 45.0)];
//! assert!(evaluate(&candidates, &truth, &EvalConfig::default()));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod decode;
mod error;
mod evaluate;
mod extract;
mod loss;
mod metrics;
mod trainer;

// Re-export the decode/extract/evaluate pipeline
pub use decode::{decode, DecodeConfig, WIDTH_SCALE};
pub use evaluate::{accuracy, evaluate, matches, EvalConfig, MatchCriterion};
pub use extract::{extract, ExtractConfig};

// Re-export loss functions
pub use loss::{grasp_loss, smooth_l1, GraspLossOutput, GraspTargets, LossTerms, LossWeights};

// Re-export configuration
pub use config::{LearningRateSchedule, OptimizerConfig, OptimizerType, TrainingConfig};

// Re-export metrics
pub use metrics::{
    EpochMetrics, TrainingMetrics, ValidationAccumulator, ValidationOutcome,
};

// Re-export trainer
pub use trainer::{Trainer, TrainingState};

// Re-export error types
pub use error::{Result, TrainingError};

// Convenience re-export: the candidate type the pipeline produces.
pub use grasp_types::GraspCandidate;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        accuracy, decode, evaluate, extract, grasp_loss, smooth_l1, DecodeConfig, EpochMetrics,
        EvalConfig, ExtractConfig, GraspLossOutput, GraspTargets, LearningRateSchedule,
        LossTerms, LossWeights, MatchCriterion, OptimizerConfig, Trainer, TrainingConfig,
        TrainingError, TrainingMetrics, TrainingState, ValidationAccumulator, ValidationOutcome,
    };
}
