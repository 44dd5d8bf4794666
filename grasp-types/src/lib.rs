//! Core types for per-pixel grasp prediction.
//!
//! This crate provides the plain-data vocabulary shared by the dataset,
//! model, and training crates:
//!
//! # Map Types
//!
//! - [`GraspMap`] - Dense row-major 2D float map
//! - [`OutputMaps`] - Raw network output channels (pos, cos, sin, width)
//! - [`GraspMaps`] - Decoded maps (position, angle, width)
//!
//! # Grasp Types
//!
//! - [`GraspCandidate`] - A predicted grasp (pixel, orientation, width, quality)
//! - [`GraspRectangle`] - A labeled ground-truth grasp region
//!
//! # Angle Arithmetic
//!
//! Grasp orientation is π-periodic (a gripper rotated by 180° grasps the same
//! way), so the [`angle`] module provides modulo-π normalization and
//! difference, plus the doubled-angle `(cos 2θ, sin 2θ)` encoding the network
//! regresses against.
//!
//! # Example
//!
//! ```
//! use grasp_types::{angle, GraspCandidate, GraspRectangle};
//!
//! let candidate = GraspCandidate::new(10, 10, 0.3, 40.0, 0.9);
//! let rect = GraspRectangle::new(8, 8, 12, 12, 0.35, 45.0);
//!
//! assert!(rect.contains(candidate.row, candidate.col));
//! assert!(angle::angular_difference(candidate.angle, rect.angle) < 0.1);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod angle;
mod candidate;
mod error;
mod map;
mod rectangle;

// Re-export map types
pub use map::{GraspMap, GraspMaps, OutputMaps};

// Re-export grasp types
pub use candidate::GraspCandidate;
pub use rectangle::GraspRectangle;

// Re-export error types
pub use error::{Result, TypesError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::angle;
    pub use super::{
        GraspCandidate, GraspMap, GraspMaps, GraspRectangle, OutputMaps, Result, TypesError,
    };
}
