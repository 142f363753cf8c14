//! Error types for isoscope.

use thiserror::Error;

/// The main error type for isoscope operations.
#[derive(Error, Debug)]
pub enum IsoscopeError {
    /// isoscope has not been initialized.
    #[error("isoscope not initialized - call isoscope::init() first")]
    NotInitialized,

    /// isoscope has already been initialized.
    #[error("isoscope already initialized")]
    AlreadyInitialized,

    /// A structure with the given name already exists.
    #[error("structure '{0}' already exists")]
    StructureExists(String),

    /// A structure with the given name was not found.
    #[error("structure '{0}' not found")]
    StructureNotFound(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A grid axis has fewer than two samples.
    #[error("grid axis needs at least 2 samples, got {0}")]
    InvalidDimensions(usize),

    /// Rectilinear axis coordinates are not strictly increasing.
    #[error("axis coordinates must be strictly increasing (violated at index {0})")]
    NonMonotonicAxis(usize),

    /// An axis extent is empty, inverted, or not finite.
    #[error("invalid axis extent [{min}, {max}]")]
    InvalidExtent { min: f32, max: f32 },

    /// An option value is out of its valid range.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for isoscope operations.
pub type Result<T> = std::result::Result<T, IsoscopeError>;
