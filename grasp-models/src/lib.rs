//! Burn architectures for grasp-quality networks.
//!
//! This crate provides the neural networks that regress per-pixel grasp maps
//! from depth images, along with checkpoint persistence:
//!
//! # Architectures
//!
//! - [`Ggcnn`] - The compact strided-convolution network
//! - [`Ggcnn2`] - The deeper dilated variant
//! - [`GraspNetwork`] - The trait seam the training crate programs against
//! - [`GraspPrediction`] - The four raw output channels of a forward pass
//!
//! Both networks are fully convolutional and spatially size-preserving: the
//! four raw output channels (position, cos, sin, width) match the input
//! image, so per-pixel targets apply directly and decoded maps index back
//! into image coordinates.
//!
//! # Checkpoint Persistence
//!
//! Models save and load their weights through Burn's recorder system:
//! - Binary format (compact, fast)
//! - JSON format (human-readable, debuggable)
//!
//! # Backend Support
//!
//! Models are generic over Burn backends. The backend is picked once at
//! startup ([`BackendType`]) and its device threaded through construction;
//! [`GraspPrediction::to_output_maps`] is the single device→host transfer
//! point before decoding.
//!
//! # Example
//!
//! ```ignore
//! use grasp_models::{Ggcnn, GgcnnConfig};
//!
//! let device = Default::default();
//! let model = Ggcnn::<MyBackend>::new(GgcnnConfig::default(), &device);
//!
//! let prediction = model.forward(depth_batch);
//! let maps = prediction.to_output_maps(0)?;
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod backend;
mod checkpoint;
mod error;
mod ggcnn;
mod ggcnn2;
mod network;

// Re-export model types
pub use ggcnn::{Ggcnn, GgcnnConfig};
pub use ggcnn2::{Ggcnn2, Ggcnn2Config};
pub use network::{GraspNetwork, GraspPrediction};

// Re-export checkpoint utilities
pub use checkpoint::{checkpoint_stem, load_checkpoint, save_checkpoint, CheckpointFormat};

// Re-export backend utilities
pub use backend::BackendType;

// Re-export error types
pub use error::{ModelError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        checkpoint_stem, load_checkpoint, save_checkpoint, BackendType, CheckpointFormat, Ggcnn,
        Ggcnn2, Ggcnn2Config, GgcnnConfig, GraspNetwork, GraspPrediction, ModelError,
    };
}
