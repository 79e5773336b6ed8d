//! One All-or-Nothing pass.
//!
//! Congestion-blind by construction: the whole pass runs against a single
//! frozen cost field and never refreshes it.  Congestion feedback is layered
//! on top by the incremental policy, which re-prices edges *between* passes.

use ta_core::NodeId;
use ta_network::{CostField, FlowField, Network};

use crate::demand::DemandMatrix;
use crate::error::AssignResult;
use crate::router::{shortest_path, Path};

/// An OD pair whose demand could not be routed (no path under the pass's
/// cost field).  The pair's volume for this pass is dropped, per contract;
/// callers detect the loss from this record rather than from a log line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedPair {
    pub origin:      NodeId,
    pub destination: NodeId,
    /// Demand volume lost for this pass.
    pub volume:      f64,
}

/// Result of one All-or-Nothing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AonOutcome {
    /// Pairs skipped because no path existed, in demand-matrix order.
    pub skipped: Vec<SkippedPair>,
    /// Total volume successfully loaded onto the network.
    pub routed_volume: f64,
}

impl AonOutcome {
    /// `true` if every OD pair found a path.
    pub fn fully_routed(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Load every OD pair's entire volume onto its single cheapest path under
/// `costs`, accumulating into `flows`.
///
/// Mutates only `flows`; the cost field stays frozen.  Pair iteration order
/// does not affect the final flow map (contributions are additive and
/// independent), but the matrix's sorted order is kept so `skipped` is
/// deterministic.
pub fn all_or_nothing(
    net: &Network,
    costs: &CostField,
    demand: &DemandMatrix,
    flows: &mut FlowField,
) -> AssignResult<AonOutcome> {
    let routes = route_pairs(net, costs, demand);

    let mut skipped = Vec::new();
    let mut routed_volume = 0.0;

    for (entry, path) in demand.iter().zip(routes) {
        match path {
            None => skipped.push(SkippedPair {
                origin:      entry.origin,
                destination: entry.destination,
                volume:      entry.volume,
            }),
            Some(path) => {
                for &edge in &path.edges {
                    flows.add_edge(edge, entry.volume)?;
                }
                routed_volume += entry.volume;
            }
        }
    }

    Ok(AonOutcome { skipped, routed_volume })
}

/// Route every demand entry against the frozen cost field.
///
/// The per-pair queries are independent reads, so with the `parallel`
/// feature they fan out across Rayon workers; collection preserves entry
/// order either way, keeping the subsequent (sequential) loading loop — and
/// its floating-point summation order — deterministic.
#[cfg(feature = "parallel")]
fn route_pairs(net: &Network, costs: &CostField, demand: &DemandMatrix) -> Vec<Option<Path>> {
    use rayon::prelude::*;

    demand
        .entries()
        .par_iter()
        .map(|e| shortest_path(net, costs, e.origin, e.destination))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn route_pairs(net: &Network, costs: &CostField, demand: &DemandMatrix) -> Vec<Option<Path>> {
    demand
        .iter()
        .map(|e| shortest_path(net, costs, e.origin, e.destination))
        .collect()
}
