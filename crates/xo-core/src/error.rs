//! Error types for the xo transform crates

use thiserror::Error;

/// Transform error type
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid construction parameters (e.g. `max_radius <= min_radius`)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Event length or array rank does not match what the transform expects
    #[error("Shape error: {0}")]
    Shape(String),

    /// A dynamic quantity has no value at the supplied point
    #[error("Unresolved quantity: {0}")]
    Unresolved(String),

    /// Operation structurally not offered by a transform
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
