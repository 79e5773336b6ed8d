//! Per-edge value fields: travel costs and accumulated flows.
//!
//! Assignment never mutates the graph.  Each step works against an explicit
//! [`CostField`] (frozen for the duration of one All-or-Nothing pass) and
//! writes into a [`FlowField`]; the incremental policy rebuilds the cost
//! field from a [`FlowSnapshot`] between steps.  The signatures make the
//! step-order dependency of incremental assignment visible: a cost field is
//! constructed *from* a snapshot, never updated in place mid-pass.

use ta_core::{EdgeId, NodeId};

use crate::error::{NetworkError, NetworkResult};
use crate::network::Network;

// ── Impedance seam ────────────────────────────────────────────────────────────

/// Volume-delay seam: converts an edge's static attributes plus its current
/// flow into a travel cost.
///
/// The standard implementation is the BPR function in `ta-assign`; custom
/// impedances (piecewise-linear lookup tables, tolled links) plug in here
/// without touching the network crate.
///
/// # Contract
///
/// For fixed `free_flow_time > 0` and `capacity >= 0`, implementations must
/// be non-decreasing in `flow` and must never return less than
/// `free_flow_time` for any `flow >= 0`.  `+inf` is the designated "edge is
/// impassable" value.
pub trait Impedance {
    fn travel_time(&self, free_flow_time: f64, capacity: f64, flow: f64) -> f64;
}

// ── CostField ─────────────────────────────────────────────────────────────────

/// Current travel cost per directed edge, indexed by `EdgeId`.
///
/// Invariant: every cost is >= the edge's free-flow time (impedances are
/// non-decreasing in flow, and flow is never negative).  `+inf` marks an
/// impassable edge; the shortest-path engine skips such edges entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct CostField {
    cost: Vec<f64>,
}

impl CostField {
    /// Cost field at zero flow: every edge costs its free-flow time, except
    /// zero-capacity edges which are impassable from the start.
    pub fn free_flow(net: &Network) -> Self {
        let cost = net
            .edge_free_flow
            .iter()
            .zip(&net.edge_capacity)
            .map(|(&fft, &cap)| if cap > 0.0 { fft } else { f64::INFINITY })
            .collect();
        Self { cost }
    }

    /// Cost field derived from an accumulated flow snapshot via `imp`.
    pub fn from_flows(net: &Network, flows: &FlowSnapshot, imp: &impl Impedance) -> Self {
        debug_assert_eq!(flows.edge_count(), net.edge_count());
        let cost = (0..net.edge_count())
            .map(|i| {
                imp.travel_time(
                    net.edge_free_flow[i],
                    net.edge_capacity[i],
                    flows.flow(EdgeId(i as u32)),
                )
            })
            .collect();
        Self { cost }
    }

    /// Cost of one edge.  Hot-path accessor for the shortest-path inner loop.
    #[inline]
    pub fn cost(&self, edge: EdgeId) -> f64 {
        self.cost[edge.index()]
    }

    /// Cost of the directed edge `(from, to)`, by node pair.
    pub fn get(&self, net: &Network, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        Ok(self.cost(net.edge(from, to)?))
    }

    /// Overwrite the cost of the directed edge `(from, to)`.
    pub fn set(
        &mut self,
        net: &Network,
        from: NodeId,
        to: NodeId,
        value: f64,
    ) -> NetworkResult<()> {
        let edge = net.edge(from, to)?;
        self.cost[edge.index()] = value;
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.cost.len()
    }

    /// Iterate `(EdgeId, cost)` pairs in `EdgeId` order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, f64)> + '_ {
        self.cost
            .iter()
            .enumerate()
            .map(|(i, &c)| (EdgeId(i as u32), c))
    }
}

// ── FlowField ─────────────────────────────────────────────────────────────────

/// Accumulated flow per directed edge — the mutable ledger of one assignment
/// pass.  Flows are never negative; a negative `add` is a caller bug and
/// fails with [`NetworkError::InvalidFlow`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    flow: Vec<f64>,
}

impl FlowField {
    /// All-zero flow field sized for `net`.
    pub fn zeroed(net: &Network) -> Self {
        Self { flow: vec![0.0; net.edge_count()] }
    }

    /// Zero every tracked flow.  Idempotent.
    pub fn reset(&mut self) {
        self.flow.fill(0.0);
    }

    /// Add `amount` (fractional ok) to the directed edge `(from, to)`.
    pub fn add(
        &mut self,
        net: &Network,
        from: NodeId,
        to: NodeId,
        amount: f64,
    ) -> NetworkResult<()> {
        let edge = net.edge(from, to)?;
        self.add_edge(edge, amount)
    }

    /// Hot-path variant of [`add`](Self::add) when the `EdgeId` is already
    /// known (path loading walks edges, not node pairs).
    pub fn add_edge(&mut self, edge: EdgeId, amount: f64) -> NetworkResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(NetworkError::InvalidFlow { edge, amount });
        }
        self.flow[edge.index()] += amount;
        Ok(())
    }

    /// Current flow on one edge.
    #[inline]
    pub fn flow(&self, edge: EdgeId) -> f64 {
        self.flow[edge.index()]
    }

    /// Per-edge addition of a snapshot into this field (incremental
    /// accumulation across steps).
    pub fn merge(&mut self, other: &FlowSnapshot) {
        debug_assert_eq!(self.flow.len(), other.edge_count());
        for (f, o) in self.flow.iter_mut().zip(&other.flow) {
            *f += o;
        }
    }

    /// Immutable copy of the current edge→flow mapping.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot { flow: self.flow.clone() }
    }

    pub fn edge_count(&self) -> usize {
        self.flow.len()
    }
}

// ── FlowSnapshot ──────────────────────────────────────────────────────────────

/// Immutable edge→flow mapping taken at one instant.
///
/// This is the conserved ledger handed across assignment steps and out to
/// reporting: summing the per-step snapshots of an incremental run yields the
/// run's final snapshot exactly (per-edge addition, no renormalization).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    flow: Vec<f64>,
}

impl FlowSnapshot {
    /// All-zero snapshot sized for `net`.
    pub fn zeroed(net: &Network) -> Self {
        Self { flow: vec![0.0; net.edge_count()] }
    }

    #[inline]
    pub fn flow(&self, edge: EdgeId) -> f64 {
        self.flow[edge.index()]
    }

    pub fn edge_count(&self) -> usize {
        self.flow.len()
    }

    /// Iterate `(EdgeId, flow)` pairs in `EdgeId` order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, f64)> + '_ {
        self.flow
            .iter()
            .enumerate()
            .map(|(i, &f)| (EdgeId(i as u32), f))
    }

    /// Sum of flow over all edges.
    pub fn total(&self) -> f64 {
        self.flow.iter().sum()
    }
}
