//! Network-subsystem error type.

use thiserror::Error;

use ta_core::{EdgeId, NodeId};

/// Errors produced by `ta-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// An operation referenced a directed edge `(from, to)` absent from the
    /// network.  Fatal to that operation, not to the run.
    #[error("no edge from {from} to {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("duplicate node name {0:?}")]
    DuplicateNode(String),

    /// The same ordered `(from, to)` pair was added twice.  Flows and costs
    /// are keyed by ordered pair, so parallel directed edges are rejected.
    #[error("duplicate directed edge from {from} to {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    /// Non-finite, non-positive free-flow time, or negative capacity on an
    /// edge.  Caught at build time, before any assignment starts.
    #[error("invalid {what} on edge from {from} to {to}")]
    InvalidEdgeAttribute {
        from: NodeId,
        to: NodeId,
        what: &'static str,
    },

    /// Negative or non-finite amount passed to the flow accumulator.  This is
    /// a caller bug, not a data problem; abort the run.
    #[error("invalid flow amount {amount} on edge {edge}")]
    InvalidFlow { edge: EdgeId, amount: f64 },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
