//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_free_flow`,
//! `edge_capacity`) are sorted by source node and indexed by `EdgeId`.
//! Iteration over a node's outgoing edges is therefore a contiguous memory
//! scan — ideal for Dijkstra's inner loop.
//!
//! # Edge directionality
//!
//! Every edge is directed.  A bidirectional road is two independent directed
//! edges with identical free-flow time and capacity but independently tracked
//! flow and cost; callers model that explicitly via
//! [`NetworkBuilder::add_two_way`] (which simply calls
//! [`add_edge`](NetworkBuilder::add_edge) once per direction).

use rustc_hash::FxHashMap;

use ta_core::{EdgeId, NodeId, Point};

use crate::error::{NetworkError, NetworkResult};

// ── Network ───────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// Structurally immutable; mutable per-edge state (costs, flows) lives in
/// [`CostField`](crate::CostField) / [`FlowField`](crate::FlowField) values
/// indexed by `EdgeId`.  CSR arrays are `pub` for direct indexed access on
/// hot paths.  Do not construct directly; use [`NetworkBuilder`].
#[derive(Debug)]
pub struct Network {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Stable external identifier of each node.  Indexed by `NodeId`.
    pub node_names: Vec<String>,

    /// Planar position of each node.  Consulted only at load time to derive
    /// edge lengths; the assignment algorithms never read it.
    pub node_pos: Vec<Point>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Redundant with CSR but required for
    /// efficient path reconstruction (trace `prev_edge` back to source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Free-flow travel time of each edge.  Always finite and > 0.
    pub edge_free_flow: Vec<f64>,

    /// Capacity of each edge (vehicles per unit time).  Always finite and
    /// >= 0; a zero capacity makes the edge impassable under any congestion
    /// pricing (its cost is `+inf` for every positive flow level).
    pub edge_capacity: Vec<f64>,

    // ── Lookup indexes ────────────────────────────────────────────────────
    name_index: FxHashMap<String, NodeId>,
    edge_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl Network {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_names.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// `(source, destination)` pair of an edge.
    #[inline]
    pub fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
        (self.edge_from[edge.index()], self.edge_to[edge.index()])
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Resolve a node name to its `NodeId`.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// External name of a node.
    ///
    /// # Panics
    /// Panics if `id` is out of range (IDs handed out by the builder are
    /// always in range).
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.node_names[id.index()]
    }

    /// `EdgeId` of the directed edge `(from, to)`, if present.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.edge_index.get(&(from, to)).copied()
    }

    /// Like [`find_edge`](Self::find_edge), but absent pairs are an error.
    pub fn edge(&self, from: NodeId, to: NodeId) -> NetworkResult<EdgeId> {
        self.find_edge(from, to)
            .ok_or(NetworkError::MissingEdge { from, to })
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// validates edge attributes, sorts edges by source node, and constructs the
/// CSR arrays and lookup indexes.
///
/// # Example
///
/// ```
/// use ta_core::Point;
/// use ta_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_node("A", Point::new(0.0, 0.0));
/// let c = b.add_node("B", Point::new(4.0, 3.0));
/// b.add_two_way(a, c, 10.0, 100.0); // free-flow time 10, capacity 100
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // one directed edge per direction
/// ```
pub struct NetworkBuilder {
    names:     Vec<String>,
    positions: Vec<Point>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:      NodeId,
    to:        NodeId,
    free_flow: f64,
    capacity:  f64,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            names:     Vec::new(),
            positions: Vec::new(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading from a network file.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            names:     Vec::with_capacity(nodes),
            positions: Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    ///
    /// Name uniqueness is checked at [`build`](Self::build) time.
    pub fn add_node(&mut self, name: impl Into<String>, pos: Point) -> NodeId {
        let id = NodeId(self.names.len() as u32);
        self.names.push(name.into());
        self.positions.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// - `free_flow_time`: travel time at zero flow; must be finite and > 0.
    /// - `capacity`: flow capacity; must be finite and >= 0 (0 = impassable).
    ///
    /// Attribute validation happens at [`build`](Self::build) time.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, free_flow_time: f64, capacity: f64) {
        self.raw_edges.push(RawEdge {
            from,
            to,
            free_flow: free_flow_time,
            capacity,
        });
    }

    /// Convenience: add one directed edge per direction for a bidirectional
    /// road, both with the same free-flow time and capacity.  Flow and cost
    /// are still tracked per direction.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, free_flow_time: f64, capacity: f64) {
        self.add_edge(a, b, free_flow_time, capacity);
        self.add_edge(b, a, free_flow_time, capacity);
    }

    /// Look up the position of a node added earlier (used by the loader to
    /// compute edge lengths between link endpoints).
    pub fn node_pos(&self, id: NodeId) -> Point {
        self.positions[id.index()]
    }

    pub fn node_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`Network`].
    ///
    /// Fails fast on duplicate node names, out-of-range endpoints, duplicate
    /// ordered edge pairs, non-positive or non-finite free-flow times, and
    /// negative or non-finite capacities.
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> NetworkResult<Network> {
        let node_count = self.names.len();
        let edge_count = self.raw_edges.len();

        let mut name_index = FxHashMap::default();
        name_index.reserve(node_count);
        for (i, name) in self.names.iter().enumerate() {
            if name_index.insert(name.clone(), NodeId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateNode(name.clone()));
            }
        }

        for e in &self.raw_edges {
            if e.from.index() >= node_count {
                return Err(NetworkError::NodeNotFound(e.from));
            }
            if e.to.index() >= node_count {
                return Err(NetworkError::NodeNotFound(e.to));
            }
            if !e.free_flow.is_finite() || e.free_flow <= 0.0 {
                return Err(NetworkError::InvalidEdgeAttribute {
                    from: e.from,
                    to:   e.to,
                    what: "free-flow time",
                });
            }
            if !e.capacity.is_finite() || e.capacity < 0.0 {
                return Err(NetworkError::InvalidEdgeAttribute {
                    from: e.from,
                    to:   e.to,
                    what: "capacity",
                });
            }
        }

        // Sort edges by source node for CSR construction.  Stable sort keeps
        // insertion order within a source node, so EdgeId assignment is
        // deterministic for a given builder call sequence.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:      Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_free_flow: Vec<f64>    = raw.iter().map(|e| e.free_flow).collect();
        let edge_capacity:  Vec<f64>    = raw.iter().map(|e| e.capacity).collect();

        let mut edge_index = FxHashMap::default();
        edge_index.reserve(edge_count);
        for (i, e) in raw.iter().enumerate() {
            if edge_index.insert((e.from, e.to), EdgeId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateEdge { from: e.from, to: e.to });
            }
        }

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        Ok(Network {
            node_names: self.names,
            node_pos: self.positions,
            node_out_start,
            edge_from,
            edge_to,
            edge_free_flow,
            edge_capacity,
            name_index,
            edge_index,
        })
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
