//! Loss functions for grasp map regression.

use burn::prelude::Backend;
use burn::tensor::{ElementConversion, Tensor};
use serde::{Deserialize, Serialize};

use grasp_models::{GraspNetwork, GraspPrediction};

/// Smooth-L1 transition point.
const BETA: f32 = 1.0;

/// Weights for combining the four per-channel losses.
///
/// The total loss is the weighted sum of the position, cos, sin, and width
/// terms. The default weights every term equally, matching the observed
/// training behavior; the weights exist so that balance can be tuned without
/// touching the loss itself.
///
/// # Example
///
/// ```
/// use grasp_training::LossWeights;
///
/// let weights = LossWeights::default();
/// assert!((weights.pos - 1.0).abs() < 1e-6);
/// assert!(weights.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossWeights {
    /// Weight for the position confidence term.
    pub pos: f32,

    /// Weight for the doubled-angle cosine term.
    pub cos: f32,

    /// Weight for the doubled-angle sine term.
    pub sin: f32,

    /// Weight for the width term.
    pub width: f32,
}

impl Default for LossWeights {
    fn default() -> Self {
        Self {
            pos: 1.0,
            cos: 1.0,
            sin: 1.0,
            width: 1.0,
        }
    }
}

impl LossWeights {
    /// Creates new loss weights.
    #[must_use]
    pub const fn new(pos: f32, cos: f32, sin: f32, width: f32) -> Self {
        Self {
            pos,
            cos,
            sin,
            width,
        }
    }

    /// Validates the weights.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.pos >= 0.0 && self.cos >= 0.0 && self.sin >= 0.0 && self.width >= 0.0
    }
}

/// Per-term loss record for one step.
///
/// A fixed-shape record with one named field per channel — consumers read
/// the fields directly instead of probing a growing key/value map.
///
/// # Example
///
/// ```
/// use grasp_training::LossTerms;
///
/// let terms = LossTerms::new(0.4, 0.1, 0.1, 0.2);
/// assert!((terms.sum() - 0.8).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LossTerms {
    /// Position confidence loss.
    pub pos: f32,

    /// Doubled-angle cosine loss.
    pub cos: f32,

    /// Doubled-angle sine loss.
    pub sin: f32,

    /// Width loss.
    pub width: f32,
}

impl LossTerms {
    /// Creates a new term record.
    #[must_use]
    pub const fn new(pos: f32, cos: f32, sin: f32, width: f32) -> Self {
        Self {
            pos,
            cos,
            sin,
            width,
        }
    }

    /// Returns the unweighted sum of the terms.
    #[must_use]
    pub fn sum(&self) -> f32 {
        self.pos + self.cos + self.sin + self.width
    }

    /// Accumulates another record element-wise.
    ///
    /// Used with [`LossTerms::scale`] to average terms over an epoch.
    pub fn accumulate(&mut self, other: &Self) {
        self.pos += other.pos;
        self.cos += other.cos;
        self.sin += other.sin;
        self.width += other.width;
    }

    /// Scales every term by a factor.
    pub fn scale(&mut self, factor: f32) {
        self.pos *= factor;
        self.cos *= factor;
        self.sin *= factor;
        self.width *= factor;
    }
}

/// Ground-truth map batch for the loss, `[batch, 1, rows, cols]` each.
#[derive(Debug, Clone)]
pub struct GraspTargets<B: Backend> {
    /// Target position confidence maps.
    pub pos: Tensor<B, 4>,
    /// Target doubled-angle cosine maps.
    pub cos: Tensor<B, 4>,
    /// Target doubled-angle sine maps.
    pub sin: Tensor<B, 4>,
    /// Target normalized width maps.
    pub width: Tensor<B, 4>,
}

impl<B: Backend> GraspTargets<B> {
    /// Returns the target dimensions `[batch, channels, rows, cols]`.
    #[must_use]
    pub fn dims(&self) -> [usize; 4] {
        self.pos.dims()
    }
}

/// The result of one loss computation.
///
/// `total` stays a tensor so the caller can run the backward pass;
/// `predictions` hands the raw output maps back so validation can decode
/// them without a second forward pass.
#[derive(Debug)]
pub struct GraspLossOutput<B: Backend> {
    /// Weighted total loss, a scalar tensor.
    pub total: Tensor<B, 1>,

    /// Per-term scalar breakdown.
    pub terms: LossTerms,

    /// The raw network prediction the loss was computed from.
    pub predictions: GraspPrediction<B>,
}

/// Computes smooth-L1 (Huber) loss between two tensors.
///
/// Quadratic for residuals below `beta`, linear above — less sensitive to
/// outliers than plain L2:
/// - For |x| < beta: `0.5 * x^2 / beta`
/// - For |x| >= beta: `|x| - 0.5 * beta`
///
/// Returns the mean over all elements as a scalar tensor.
pub fn smooth_l1<B: Backend, const D: usize>(
    pred: Tensor<B, D>,
    target: Tensor<B, D>,
    beta: f32,
) -> Tensor<B, 1> {
    let diff = pred - target;
    let abs_diff = diff.clone().abs();

    let quadratic = diff.powf_scalar(2.0) / (2.0 * beta);
    let linear = abs_diff.clone() - (beta / 2.0);

    // Mask for which formula to use
    let mask = abs_diff
        .clone()
        .lower(Tensor::full(abs_diff.shape(), beta, &abs_diff.device()));
    let smooth = mask.clone().float() * quadratic + (mask.bool_not()).float() * linear;

    smooth.mean()
}

/// Runs the network forward and computes the per-channel grasp loss.
///
/// One smooth-L1 term per raw output channel against its target map, with
/// the weighted sum as the trainable total.
///
/// # Panics
///
/// Panics if the prediction and target shapes differ — matching shapes are a
/// precondition of the caller's data pipeline, not a recoverable condition.
pub fn grasp_loss<B: Backend, N: GraspNetwork<B>>(
    network: &N,
    input: Tensor<B, 4>,
    targets: &GraspTargets<B>,
    weights: &LossWeights,
) -> GraspLossOutput<B> {
    let predictions = network.forward(input);

    assert!(
        predictions.pos.dims() == targets.pos.dims()
            && predictions.cos.dims() == targets.cos.dims()
            && predictions.sin.dims() == targets.sin.dims()
            && predictions.width.dims() == targets.width.dims(),
        "prediction shape {:?} does not match target shape {:?}",
        predictions.pos.dims(),
        targets.pos.dims()
    );

    let loss_pos = smooth_l1(predictions.pos.clone(), targets.pos.clone(), BETA);
    let loss_cos = smooth_l1(predictions.cos.clone(), targets.cos.clone(), BETA);
    let loss_sin = smooth_l1(predictions.sin.clone(), targets.sin.clone(), BETA);
    let loss_width = smooth_l1(predictions.width.clone(), targets.width.clone(), BETA);

    let terms = LossTerms::new(
        loss_pos.clone().into_scalar().elem(),
        loss_cos.clone().into_scalar().elem(),
        loss_sin.clone().into_scalar().elem(),
        loss_width.clone().into_scalar().elem(),
    );

    let total = loss_pos * weights.pos
        + loss_cos * weights.cos
        + loss_sin * weights.sin
        + loss_width * weights.width;

    GraspLossOutput {
        total,
        terms,
        predictions,
    }
}
