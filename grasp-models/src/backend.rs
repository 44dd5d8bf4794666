//! Backend type definitions and device selection.

use serde::{Deserialize, Serialize};

/// Supported Burn backend types.
///
/// Selected once at startup and threaded through model construction via the
/// backend's device type; nothing downstream re-queries placement per call.
/// The prediction arrays the decode/evaluation path consumes are host-side
/// regardless of which backend produced them.
///
/// # Example
///
/// ```
/// use grasp_models::BackendType;
///
/// let backend = BackendType::NdArray;
/// assert!(backend.is_cpu());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BackendType {
    /// CPU backend using ndarray.
    ///
    /// Always available; the default for tests and CPU-only training.
    #[default]
    NdArray,

    /// GPU backend using WGPU.
    Wgpu,

    /// `LibTorch` backend (requires a libtorch installation).
    LibTorch,
}

impl BackendType {
    /// Returns `true` if this is a CPU backend.
    #[must_use]
    pub const fn is_cpu(&self) -> bool {
        matches!(self, Self::NdArray)
    }

    /// Returns `true` if this is a GPU backend.
    #[must_use]
    pub const fn is_gpu(&self) -> bool {
        matches!(self, Self::Wgpu | Self::LibTorch)
    }

    /// Returns the backend name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NdArray => "ndarray",
            Self::Wgpu => "wgpu",
            Self::LibTorch => "libtorch",
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_type_default() {
        assert_eq!(BackendType::default(), BackendType::NdArray);
    }

    #[test]
    fn backend_type_cpu_gpu() {
        assert!(BackendType::NdArray.is_cpu());
        assert!(!BackendType::NdArray.is_gpu());
        assert!(BackendType::Wgpu.is_gpu());
        assert!(BackendType::LibTorch.is_gpu());
    }

    #[test]
    fn backend_type_display() {
        assert_eq!(format!("{}", BackendType::NdArray), "ndarray");
        assert_eq!(format!("{}", BackendType::Wgpu), "wgpu");
        assert_eq!(format!("{}", BackendType::LibTorch), "libtorch");
    }

    #[test]
    fn backend_type_serialization() {
        let backend = BackendType::Wgpu;
        let json = serde_json::to_string(&backend);
        assert!(json.is_ok());

        let parsed: Result<BackendType, _> = serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), backend);
    }
}
