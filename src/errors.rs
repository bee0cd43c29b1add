//! Error types for area source placement
//!
//! The numeric core only produces `InvalidVector`, `DegeneratePatch` and
//! `SingularRotation`. The remaining variants belong to the mesh and
//! configuration layers.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the areasource crate
#[derive(Error, Debug)]
pub enum AreaSourceError {
    /// A direction vector with zero (or non-finite) magnitude
    #[error("Invalid {name} vector ({x}, {y}, {z}): magnitude must be finite and non-zero")]
    InvalidVector {
        /// Which input was rejected ("reference", "target", ...)
        name: &'static str,
        x: f64,
        y: f64,
        z: f64,
    },

    /// Too few vertices, or a first triangle without area
    #[error("Degenerate patch: {0}")]
    DegeneratePatch(String),

    /// Parallel or antiparallel directions rejected by the strict solver
    #[error("Singular rotation: directions are parallel (cosine {cosine})")]
    SingularRotation {
        /// Cosine of the angle between the normalized inputs
        cosine: f64,
    },

    /// Error when a file I/O operation fails
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Malformed mesh description
    #[error("Invalid mesh data at line {line}: {message}")]
    MeshFormat { line: usize, message: String },

    /// Invalid placement configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AreaSourceError {
    fn from(err: serde_json::Error) -> Self {
        AreaSourceError::Config(err.to_string())
    }
}

/// Result type for areasource operations
pub type Result<T> = std::result::Result<T, AreaSourceError>;

/// Helper function to convert a std::io::Error to AreaSourceError
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> AreaSourceError {
    AreaSourceError::FileError {
        path: path.into(),
        source: err,
    }
}
