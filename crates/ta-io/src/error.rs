//! I/O-subsystem error type.

use thiserror::Error;

use ta_network::NetworkError;

/// Errors produced by `ta-io`.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Structurally valid file with inconsistent contents (parallel-array
    /// length mismatch and the like).
    #[error("malformed input: {0}")]
    Parse(String),

    /// A link or demand entry referenced a node name the network file never
    /// declared.
    #[error("unknown node name {0:?}")]
    UnknownNode(String),

    /// A link's derived attributes are unusable (zero geometric length,
    /// non-positive speed).
    #[error("invalid link {from:?} -> {to:?}: {what}")]
    InvalidLink {
        from: String,
        to:   String,
        what: &'static str,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type IoResult<T> = Result<T, IoError>;
