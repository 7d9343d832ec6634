//! Crate-wide error type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Visibility value the fitted encoder was never trained on.
    #[error("unknown visibility category: {value:?}")]
    UnknownCategory { value: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("feature width mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("row {row}: invalid value {value:?} for column {column}")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },

    #[error("{field} = {value} is outside the accepted range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("csv: {0}")]
    Csv(String),

    #[error("artifact {path}: {reason}")]
    Artifact { path: PathBuf, reason: String },

    #[error("model inference failed: {0}")]
    Model(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn artifact(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Error::Artifact {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
