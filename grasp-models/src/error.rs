//! Error types for grasp-models crate.

use thiserror::Error;

/// Errors that can occur in model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to save a checkpoint.
    #[error("failed to save checkpoint to {path}: {reason}")]
    SaveCheckpoint {
        /// Target path.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// Failed to load a checkpoint.
    #[error("failed to load checkpoint from {path}: {reason}")]
    LoadCheckpoint {
        /// Source path.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// Checkpoint file does not exist.
    #[error("checkpoint not found: {0}")]
    CheckpointNotFound(String),

    /// Checkpoint format could not be determined from the file extension.
    #[error("unsupported checkpoint format: {0}")]
    UnsupportedFormat(String),

    /// Device-to-host transfer of prediction maps failed.
    #[error("host transfer failed: {0}")]
    HostTransfer(String),

    /// Batch index out of range when extracting per-image maps.
    #[error("batch index {index} out of range for batch of {batch}")]
    BatchIndex {
        /// Requested index.
        index: usize,
        /// Batch size.
        batch: usize,
    },
}

impl ModelError {
    /// Creates a save-checkpoint error.
    #[must_use]
    pub fn save_checkpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SaveCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a load-checkpoint error.
    #[must_use]
    pub fn load_checkpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a checkpoint-not-found error.
    #[must_use]
    pub fn checkpoint_not_found(path: impl Into<String>) -> Self {
        Self::CheckpointNotFound(path.into())
    }

    /// Creates an unsupported-format error.
    #[must_use]
    pub fn unsupported_format(path: impl Into<String>) -> Self {
        Self::UnsupportedFormat(path.into())
    }

    /// Creates a host-transfer error.
    #[must_use]
    pub fn host_transfer(reason: impl Into<String>) -> Self {
        Self::HostTransfer(reason.into())
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_save_checkpoint() {
        let err = ModelError::save_checkpoint("model.bin", "disk full");
        assert!(err.to_string().contains("model.bin"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn error_load_checkpoint() {
        let err = ModelError::load_checkpoint("model.bin", "corrupt");
        assert!(err.to_string().contains("failed to load"));
    }

    #[test]
    fn error_checkpoint_not_found() {
        let err = ModelError::checkpoint_not_found("missing.bin");
        assert!(err.to_string().contains("missing.bin"));
    }

    #[test]
    fn error_unsupported_format() {
        let err = ModelError::unsupported_format("model.xyz");
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn error_host_transfer() {
        let err = ModelError::host_transfer("wrong element type");
        assert!(err.to_string().contains("host transfer"));
    }

    #[test]
    fn error_batch_index() {
        let err = ModelError::BatchIndex { index: 4, batch: 2 };
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('2'));
    }
}
