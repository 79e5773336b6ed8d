//! BPR volume-delay function.
//!
//! The Bureau of Public Roads formula maps an edge's volume/capacity ratio to
//! a multiplicative travel-time penalty:
//!
//! ```text
//! t(q) = t0 * (1 + alpha * (q / c)^beta)
//! ```
//!
//! For `alpha, beta >= 0` this is non-decreasing in `q` and never drops below
//! the free-flow time `t0` — the monotonicity the assignment loop relies on.

use ta_network::Impedance;

use crate::error::{AssignError, AssignResult};

/// BPR coefficients.
///
/// - `alpha` shapes the magnitude of the congestion penalty.
/// - `beta` is the power of the penalty (steepness near capacity).
///
/// The defaults (0.15, 4) are the classical BPR constants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BprParams {
    pub alpha: f64,
    pub beta:  f64,
}

impl Default for BprParams {
    fn default() -> Self {
        Self { alpha: 0.15, beta: 4.0 }
    }
}

impl BprParams {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Reject coefficients that would break the impedance contract
    /// (non-finite, or negative — a negative `alpha` would price congested
    /// edges *below* free flow).
    pub fn validate(&self) -> AssignResult<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(AssignError::InvalidConfig(format!(
                "BPR alpha must be finite and >= 0, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(AssignError::InvalidConfig(format!(
                "BPR beta must be finite and >= 0, got {}",
                self.beta
            )));
        }
        Ok(())
    }

    /// Congested travel time for one edge.
    ///
    /// Pure and total for all `flow >= 0`.  `capacity <= 0` yields `+inf`
    /// (the edge is impassable; the router will never relax it).
    pub fn travel_time(&self, free_flow_time: f64, capacity: f64, flow: f64) -> f64 {
        if capacity <= 0.0 {
            return f64::INFINITY;
        }
        free_flow_time * (1.0 + self.alpha * (flow / capacity).powf(self.beta))
    }
}

impl Impedance for BprParams {
    fn travel_time(&self, free_flow_time: f64, capacity: f64, flow: f64) -> f64 {
        BprParams::travel_time(self, free_flow_time, capacity, flow)
    }
}
