//! Assignment-subsystem error type.

use thiserror::Error;

use ta_network::NetworkError;

/// Errors produced by `ta-assign`.
///
/// Unroutable OD pairs are deliberately *not* an error: they surface as
/// structured [`SkippedPair`](crate::SkippedPair) values on the assignment
/// result, and the run continues.
#[derive(Debug, Error)]
pub enum AssignError {
    /// Bad assignment parameters (zero increment count, malformed BPR
    /// coefficients).  Fails fast, before any computation starts.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type AssignResult<T> = Result<T, AssignError>;
