//! Unit tests for ta-network.
//!
//! All tests use hand-crafted networks; no input files required.

#[cfg(test)]
mod helpers {
    use ta_core::{NodeId, Point};

    use crate::{Network, NetworkBuilder};

    /// Build a small diamond network for testing.
    ///
    /// Nodes (x, y):
    ///   A:(0,0)  B:(1,1)  C:(1,-1)  D:(2,0)
    ///
    /// Directed edges (free-flow time, capacity):
    ///   A→B (10, 100)   B→D (10, 100)    upper route, total 20
    ///   A→C (12, 200)   C→D (12, 200)    lower route, total 24
    pub fn diamond() -> (Network, [NodeId; 4]) {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let n_b = b.add_node("B", Point::new(1.0, 1.0));
        let c = b.add_node("C", Point::new(1.0, -1.0));
        let d = b.add_node("D", Point::new(2.0, 0.0));

        b.add_edge(a, n_b, 10.0, 100.0);
        b.add_edge(n_b, d, 10.0, 100.0);
        b.add_edge(a, c, 12.0, 200.0);
        b.add_edge(c, d, 12.0, 200.0);

        (b.build().unwrap(), [a, n_b, c, d])
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ta_core::{NodeId, Point};

    use crate::{NetworkBuilder, NetworkError};

    #[test]
    fn empty_build() {
        let net = NetworkBuilder::new().build().unwrap();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn two_way_adds_both_directions() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(3.0, 4.0));
        b.add_two_way(a, c, 5.0, 50.0);
        let net = b.build().unwrap();
        assert_eq!(net.edge_count(), 2);
        assert!(net.find_edge(a, c).is_some());
        assert!(net.find_edge(c, a).is_some());
    }

    #[test]
    fn directed_only_edge() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(0.0, 1.0));
        b.add_edge(a, c, 1.0, 10.0);
        let net = b.build().unwrap();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_degree(a), 1);
        assert_eq!(net.out_degree(c), 0); // no return edge
        assert!(net.find_edge(c, a).is_none());
    }

    #[test]
    fn csr_out_edges() {
        let (net, [a, b, c, d]) = super::helpers::diamond();

        assert_eq!(net.out_degree(a), 2); // A→B, A→C
        assert_eq!(net.out_degree(b), 1);
        assert_eq!(net.out_degree(c), 1);
        assert_eq!(net.out_degree(d), 0);

        // Every outgoing edge from A should have A as its source.
        for e in net.out_edges(a) {
            assert_eq!(net.edge_from[e.index()], a);
        }
    }

    #[test]
    fn name_lookup_roundtrip() {
        let (net, [a, _, c, _]) = super::helpers::diamond();
        assert_eq!(net.node_id("A"), Some(a));
        assert_eq!(net.node_id("C"), Some(c));
        assert_eq!(net.node_id("Z"), None);
        assert_eq!(net.node_name(a), "A");
    }

    #[test]
    fn duplicate_node_name_rejected() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point::new(0.0, 0.0));
        b.add_node("A", Point::new(1.0, 0.0));
        assert!(matches!(b.build(), Err(NetworkError::DuplicateNode(name)) if name == "A"));
    }

    #[test]
    fn duplicate_directed_edge_rejected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(1.0, 0.0));
        b.add_edge(a, c, 1.0, 10.0);
        b.add_edge(a, c, 2.0, 20.0);
        assert!(matches!(b.build(), Err(NetworkError::DuplicateEdge { .. })));
    }

    #[test]
    fn out_of_range_endpoint_rejected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        b.add_edge(a, NodeId(7), 1.0, 10.0);
        assert!(matches!(b.build(), Err(NetworkError::NodeNotFound(NodeId(7)))));
    }

    #[test]
    fn bad_free_flow_time_rejected() {
        for fft in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut b = NetworkBuilder::new();
            let a = b.add_node("A", Point::new(0.0, 0.0));
            let c = b.add_node("B", Point::new(1.0, 0.0));
            b.add_edge(a, c, fft, 10.0);
            assert!(
                matches!(
                    b.build(),
                    Err(NetworkError::InvalidEdgeAttribute { what: "free-flow time", .. })
                ),
                "free-flow time {fft} should be rejected"
            );
        }
    }

    #[test]
    fn negative_capacity_rejected_zero_allowed() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(1.0, 0.0));
        b.add_edge(a, c, 1.0, -5.0);
        assert!(matches!(
            b.build(),
            Err(NetworkError::InvalidEdgeAttribute { what: "capacity", .. })
        ));

        // Zero capacity builds fine; the edge is just impassable.
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(1.0, 0.0));
        b.add_edge(a, c, 1.0, 0.0);
        assert!(b.build().is_ok());
    }

    #[test]
    fn missing_edge_error() {
        let (net, [a, _, _, d]) = super::helpers::diamond();
        // No direct A→D edge in the diamond.
        assert!(matches!(
            net.edge(a, d),
            Err(NetworkError::MissingEdge { from, to }) if from == a && to == d
        ));
    }
}

// ── Cost & flow fields ────────────────────────────────────────────────────────

#[cfg(test)]
mod fields {
    use ta_core::{EdgeId, Point};

    use crate::{CostField, FlowField, Impedance, NetworkBuilder, NetworkError};

    /// Test impedance: cost = fft + flow / capacity (or +inf at capacity 0).
    struct Linear;

    impl Impedance for Linear {
        fn travel_time(&self, free_flow_time: f64, capacity: f64, flow: f64) -> f64 {
            if capacity <= 0.0 {
                f64::INFINITY
            } else {
                free_flow_time + flow / capacity
            }
        }
    }

    #[test]
    fn free_flow_costs() {
        let (net, [a, b, c, _]) = super::helpers::diamond();
        let costs = CostField::free_flow(&net);
        assert_eq!(costs.get(&net, a, b).unwrap(), 10.0);
        assert_eq!(costs.get(&net, a, c).unwrap(), 12.0);
    }

    #[test]
    fn zero_capacity_edge_starts_impassable() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(1.0, 0.0));
        b.add_edge(a, c, 1.0, 0.0);
        let net = b.build().unwrap();
        let costs = CostField::free_flow(&net);
        assert_eq!(costs.get(&net, a, c).unwrap(), f64::INFINITY);
    }

    #[test]
    fn set_and_get_by_pair() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let mut costs = CostField::free_flow(&net);
        costs.set(&net, a, b, 17.5).unwrap();
        assert_eq!(costs.get(&net, a, b).unwrap(), 17.5);

        // Absent pair fails on both paths.
        let d = net.node_id("D").unwrap();
        assert!(matches!(costs.get(&net, a, d), Err(NetworkError::MissingEdge { .. })));
        assert!(matches!(costs.set(&net, a, d, 1.0), Err(NetworkError::MissingEdge { .. })));
    }

    #[test]
    fn from_flows_applies_impedance() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let mut flows = FlowField::zeroed(&net);
        flows.add(&net, a, b, 50.0).unwrap();

        let costs = CostField::from_flows(&net, &flows.snapshot(), &Linear);
        // A→B: 10 + 50/100; others untouched at free-flow.
        assert_eq!(costs.get(&net, a, b).unwrap(), 10.5);
        let c = net.node_id("C").unwrap();
        assert_eq!(costs.get(&net, a, c).unwrap(), 12.0);
    }

    #[test]
    fn accumulate_and_snapshot() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let mut flows = FlowField::zeroed(&net);
        flows.add(&net, a, b, 10.0).unwrap();
        flows.add(&net, a, b, 2.5).unwrap();

        let snap = flows.snapshot();
        let e = net.find_edge(a, b).unwrap();
        assert_eq!(snap.flow(e), 12.5);
        assert_eq!(snap.total(), 12.5);

        // Snapshot is a copy: later mutation doesn't leak into it.
        flows.add(&net, a, b, 1.0).unwrap();
        assert_eq!(snap.flow(e), 12.5);
        assert_eq!(flows.flow(e), 13.5);
    }

    #[test]
    fn merge_is_per_edge_addition() {
        let (net, [a, b, c, _]) = super::helpers::diamond();
        let mut total = FlowField::zeroed(&net);

        let mut step1 = FlowField::zeroed(&net);
        step1.add(&net, a, b, 5.0).unwrap();
        let mut step2 = FlowField::zeroed(&net);
        step2.add(&net, a, b, 3.0).unwrap();
        step2.add(&net, a, c, 7.0).unwrap();

        total.merge(&step1.snapshot());
        total.merge(&step2.snapshot());

        assert_eq!(total.flow(net.find_edge(a, b).unwrap()), 8.0);
        assert_eq!(total.flow(net.find_edge(a, c).unwrap()), 7.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let mut flows = FlowField::zeroed(&net);
        flows.add(&net, a, b, 42.0).unwrap();

        flows.reset();
        for (_, f) in flows.snapshot().iter() {
            assert_eq!(f, 0.0);
        }
        flows.reset(); // second reset is a no-op
        assert_eq!(flows.snapshot().total(), 0.0);
    }

    #[test]
    fn negative_flow_is_a_caller_bug() {
        let (net, [a, b, _, _]) = super::helpers::diamond();
        let mut flows = FlowField::zeroed(&net);
        let err = flows.add(&net, a, b, -1.0).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidFlow { amount, .. } if amount == -1.0));
        // NaN is equally invalid.
        assert!(flows.add_edge(EdgeId(0), f64::NAN).is_err());
    }
}
