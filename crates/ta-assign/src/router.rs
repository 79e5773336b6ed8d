//! Shortest-path engine over a frozen cost field.
//!
//! Standard binary-heap Dijkstra.  Cost fields satisfy the non-negativity
//! precondition by construction (every cost >= free-flow time > 0); edges
//! priced `+inf` (zero capacity) are skipped during expansion, so a
//! destination reachable only through an impassable edge reports *no path*
//! rather than an infinite-cost one.
//!
//! # Determinism
//!
//! When several paths tie on cost, the engine settles the smaller `NodeId`
//! first and keeps the first predecessor that reached each node, so the
//! returned path is stable across runs — required for reproducible fixtures.

use std::collections::BinaryHeap;

use ta_core::{EdgeId, NodeId};
use ta_network::{CostField, Network};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Node sequence from origin to destination (inclusive).  A trivial
    /// origin-equals-destination path is a single node.
    pub nodes: Vec<NodeId>,
    /// Edges traversed, in order; always `nodes.len() - 1` entries.
    pub edges: Vec<EdgeId>,
    /// Total cost under the queried cost field.  Always finite.
    pub cost: f64,
}

impl Path {
    /// `true` if the origin and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Min-heap entry: ordered by ascending cost, then ascending `NodeId` for a
/// deterministic tie-break.  Costs are never NaN (finite by construction),
/// so `total_cmp` is a plain total order here.
#[derive(Copy, Clone, PartialEq)]
struct QueueEntry {
    cost: f64,
    node: NodeId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so std's max-heap pops the cheapest entry first.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ── Single target ─────────────────────────────────────────────────────────────

/// Minimum-cost path from `from` to `to` under `costs`, or `None` if `to` is
/// unreachable.  Callers must check — no-path is a value, not an error.
pub fn shortest_path(net: &Network, costs: &CostField, from: NodeId, to: NodeId) -> Option<Path> {
    if from == to {
        return Some(Path { nodes: vec![from], edges: vec![], cost: 0.0 });
    }

    let n = net.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry { cost: 0.0, node: from });

    while let Some(QueueEntry { cost, node }) = heap.pop() {
        if node == to {
            return Some(reconstruct(net, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in net.out_edges(node) {
            let edge_cost = costs.cost(edge);
            if !edge_cost.is_finite() {
                continue; // impassable (zero capacity)
            }
            let neighbor = net.edge_to[edge.index()];
            let new_cost = cost + edge_cost;

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(QueueEntry { cost: new_cost, node: neighbor });
            }
        }
    }

    None
}

// ── Single source, all targets ────────────────────────────────────────────────

/// Full Dijkstra tree from one source: distances and predecessor edges for
/// every reachable node.  Shared by the all-pairs variant; also useful to
/// reporting collaborators that want one origin's whole skim row.
pub struct ShortestPathTree {
    source:    NodeId,
    dist:      Vec<f64>,
    prev_edge: Vec<EdgeId>,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Cost to reach `to`, or `None` if unreachable.
    pub fn distance(&self, to: NodeId) -> Option<f64> {
        let d = self.dist[to.index()];
        d.is_finite().then_some(d)
    }

    /// Reconstruct the path to `to`, or `None` if unreachable.
    pub fn path_to(&self, net: &Network, to: NodeId) -> Option<Path> {
        let cost = self.distance(to)?;
        if to == self.source {
            return Some(Path { nodes: vec![self.source], edges: vec![], cost: 0.0 });
        }
        Some(reconstruct(net, &self.prev_edge, self.source, to, cost))
    }
}

/// Run Dijkstra to exhaustion from `from` (no early exit).
pub fn shortest_path_tree(net: &Network, costs: &CostField, from: NodeId) -> ShortestPathTree {
    let n = net.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry { cost: 0.0, node: from });

    while let Some(QueueEntry { cost, node }) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }

        for edge in net.out_edges(node) {
            let edge_cost = costs.cost(edge);
            if !edge_cost.is_finite() {
                continue;
            }
            let neighbor = net.edge_to[edge.index()];
            let new_cost = cost + edge_cost;

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(QueueEntry { cost: new_cost, node: neighbor });
            }
        }
    }

    ShortestPathTree { source: from, dist, prev_edge }
}

// ── All pairs ─────────────────────────────────────────────────────────────────

/// Shortest path for every ordered node pair, source-major:
/// `result[s.index()][t.index()]`.
///
/// Used by reporting collaborators (skim tables, topology summaries); the
/// assignment loop itself only ever routes per OD pair.  O(N · E log N) —
/// fine at planning-network sizes, do not call per step.
pub fn all_shortest_paths(net: &Network, costs: &CostField) -> Vec<Vec<Option<Path>>> {
    (0..net.node_count())
        .map(|s| {
            let source = NodeId(s as u32);
            let tree = shortest_path_tree(net, costs, source);
            (0..net.node_count())
                .map(|t| tree.path_to(net, NodeId(t as u32)))
                .collect()
        })
        .collect()
}

// ── Reconstruction ────────────────────────────────────────────────────────────

fn reconstruct(net: &Network, prev_edge: &[EdgeId], from: NodeId, to: NodeId, cost: f64) -> Path {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert_ne!(e, EdgeId::INVALID, "reconstruct called for unreached node");
        edges.push(e);
        cur = net.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|&e| net.edge_to[e.index()]));

    Path { nodes, edges, cost }
}
