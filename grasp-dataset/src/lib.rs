//! Dataset lifecycle management for grasp training.
//!
//! This crate provides the in-memory dataset layer:
//!
//! # Dataset Operations
//!
//! - [`GraspSample`] - Single training sample: depth image, target maps,
//!   ground-truth rectangles
//! - [`split_dataset`] / [`split_stratified`] - Seeded train/validation splits
//! - [`DatasetSummary`] - Statistics about a dataset
//!
//! Parsing dataset files from disk (Cornell/Jacquard layouts, image formats)
//! is the loader's concern, not this crate's — everything here consumes
//! already-loaded numeric arrays and rectangle lists.
//!
//! # Reproducibility
//!
//! Every stochastic operation takes an explicit `Option<u64>` seed and builds
//! its RNG locally. Process-global random state is never touched, so tests
//! and training runs can use isolated, independent seeds.
//!
//! # Example
//!
//! ```
//! use grasp_dataset::{split_dataset, DatasetSummary, GraspSample, SplitRatio};
//!
//! let samples: Vec<GraspSample> = (0..10).map(GraspSample::empty).collect();
//!
//! let (train, val) = split_dataset(&samples, SplitRatio::new(0.75), Some(42));
//! assert_eq!(train.len(), 8);
//! assert_eq!(val.len(), 2);
//!
//! let summary = DatasetSummary::from_samples(&train);
//! assert_eq!(summary.total_samples, 8);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod sample;
mod splits;
mod summary;

// Re-export sample types
pub use sample::GraspSample;

// Re-export split utilities
pub use splits::{split_dataset, split_stratified, SplitRatio};

// Re-export summary types
pub use summary::DatasetSummary;

// Re-export error types
pub use error::{DatasetError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        split_dataset, split_stratified, DatasetError, DatasetSummary, GraspSample, SplitRatio,
    };
}
