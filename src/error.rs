//! Error types for the pulse-cluster library.

use thiserror::Error;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors that can occur during clustering and analysis operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A series identifier was not found in the series set.
    #[error("unknown series id: {0}")]
    UnknownSeries(String),

    /// A series contains a NaN or infinite sample.
    #[error("non-finite value in series {id} at index {index}")]
    NonFiniteValue { id: String, index: usize },

    /// I/O failure while loading series data.
    #[error("io error: {0}")]
    Io(String),

    /// A CSV cell could not be parsed as a number.
    #[error("parse error in {path}: {msg}")]
    Parse { path: String, msg: String },
}

impl From<std::io::Error> for ClusterError {
    fn from(err: std::io::Error) -> Self {
        ClusterError::Io(err.to_string())
    }
}
