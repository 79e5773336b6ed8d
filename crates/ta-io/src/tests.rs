//! Unit tests for ta-io.
//!
//! Loader tests feed JSON through `Cursor`s; no files on disk.

#[cfg(test)]
mod helpers {
    use ta_core::Point;
    use ta_network::{Network, NetworkBuilder};

    /// 3-4-5 triangle network JSON: distance A-B = 5, speedmax 2 → each
    /// direction gets free-flow time 2.5 and capacity 100.
    pub const NETWORK_JSON: &str = r#"{
        "nodes": { "name": ["A", "B", "C"], "x": [0.0, 3.0, 6.0], "y": [0.0, 4.0, 0.0] },
        "links": {
            "between": [["A", "B"], ["B", "C"]],
            "speedmax": [2.0, 2.0],
            "capacity": [100.0, 80.0]
        }
    }"#;

    pub const DEMAND_JSON: &str = r#"{
        "from":   ["A", "A", "B"],
        "to":     ["C", "C", "A"],
        "amount": [30.0, 20.0, 7.5]
    }"#;

    /// Two nodes, one directed edge A→B (free-flow 10, capacity 100).
    pub fn one_edge() -> Network {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let n_b = b.add_node("B", Point::new(10.0, 0.0));
        b.add_edge(a, n_b, 10.0, 100.0);
        b.build().unwrap()
    }
}

// ── Network loader ────────────────────────────────────────────────────────────

#[cfg(test)]
mod network_loader {
    use std::io::Cursor;

    use crate::{load_network_reader, IoError};

    use super::helpers::NETWORK_JSON;

    #[test]
    fn happy_path_derives_edge_attributes() {
        let net = load_network_reader(Cursor::new(NETWORK_JSON)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 4); // 2 links × 2 directions

        let a = net.node_id("A").unwrap();
        let b = net.node_id("B").unwrap();

        // distance 5, speedmax 2 → free-flow time 2.5, both directions.
        let ab = net.find_edge(a, b).unwrap();
        let ba = net.find_edge(b, a).unwrap();
        assert!((net.edge_free_flow[ab.index()] - 2.5).abs() < 1e-12);
        assert!((net.edge_free_flow[ba.index()] - 2.5).abs() < 1e-12);
        assert_eq!(net.edge_capacity[ab.index()], 100.0);
    }

    #[test]
    fn parallel_array_mismatch_rejected() {
        let json = r#"{
            "nodes": { "name": ["A", "B"], "x": [0.0], "y": [0.0, 1.0] },
            "links": { "between": [], "speedmax": [], "capacity": [] }
        }"#;
        let err = load_network_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn link_array_mismatch_rejected() {
        let json = r#"{
            "nodes": { "name": ["A", "B"], "x": [0.0, 1.0], "y": [0.0, 0.0] },
            "links": { "between": [["A", "B"]], "speedmax": [], "capacity": [10.0] }
        }"#;
        let err = load_network_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn unknown_link_endpoint_rejected() {
        let json = r#"{
            "nodes": { "name": ["A", "B"], "x": [0.0, 1.0], "y": [0.0, 0.0] },
            "links": { "between": [["A", "Q"]], "speedmax": [1.0], "capacity": [10.0] }
        }"#;
        let err = load_network_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, IoError::UnknownNode(name) if name == "Q"));
    }

    #[test]
    fn non_positive_speed_rejected() {
        let json = r#"{
            "nodes": { "name": ["A", "B"], "x": [0.0, 1.0], "y": [0.0, 0.0] },
            "links": { "between": [["A", "B"]], "speedmax": [0.0], "capacity": [10.0] }
        }"#;
        let err = load_network_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, IoError::InvalidLink { .. }));
    }

    #[test]
    fn zero_length_link_rejected() {
        let json = r#"{
            "nodes": { "name": ["A", "B"], "x": [1.0, 1.0], "y": [2.0, 2.0] },
            "links": { "between": [["A", "B"]], "speedmax": [1.0], "capacity": [10.0] }
        }"#;
        let err = load_network_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, IoError::InvalidLink { .. }));
    }

    #[test]
    fn malformed_json_surfaces_as_json_error() {
        let err = load_network_reader(Cursor::new("{ not json")).unwrap_err();
        assert!(matches!(err, IoError::Json(_)));
    }
}

// ── Demand loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod demand_loader {
    use std::io::Cursor;

    use crate::{load_demand_reader, load_network_reader, IoError};

    use super::helpers::{DEMAND_JSON, NETWORK_JSON};

    #[test]
    fn duplicates_merge_additively() {
        let net = load_network_reader(Cursor::new(NETWORK_JSON)).unwrap();
        let demand = load_demand_reader(Cursor::new(DEMAND_JSON), &net).unwrap();

        // (A, C) appears twice: 30 + 20.
        assert_eq!(demand.len(), 2);
        assert_eq!(demand.total_volume(), 57.5);

        let a = net.node_id("A").unwrap();
        let c = net.node_id("C").unwrap();
        let ac = demand
            .iter()
            .find(|e| e.origin == a && e.destination == c)
            .unwrap();
        assert_eq!(ac.volume, 50.0);
    }

    #[test]
    fn unknown_name_rejected() {
        let net = load_network_reader(Cursor::new(NETWORK_JSON)).unwrap();
        let json = r#"{ "from": ["A"], "to": ["Nowhere"], "amount": [1.0] }"#;
        let err = load_demand_reader(Cursor::new(json), &net).unwrap_err();
        assert!(matches!(err, IoError::UnknownNode(name) if name == "Nowhere"));
    }

    #[test]
    fn array_mismatch_rejected() {
        let net = load_network_reader(Cursor::new(NETWORK_JSON)).unwrap();
        let json = r#"{ "from": ["A", "B"], "to": ["C"], "amount": [1.0, 2.0] }"#;
        let err = load_demand_reader(Cursor::new(json), &net).unwrap_err();
        assert!(matches!(err, IoError::Parse(_)));
    }
}

// ── CSV report ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use ta_assign::{assign, assign_traced, BprParams, DemandMatrix, Policy};

    use crate::{write_flow_report, write_step_trace};

    use super::helpers::one_edge;

    fn parse_rows(bytes: &[u8]) -> Vec<Vec<String>> {
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .lines()
            .map(|l| l.split(',').map(str::to_owned).collect())
            .collect()
    }

    #[test]
    fn flow_report_rows() {
        let net = one_edge();
        let a = net.node_id("A").unwrap();
        let b = net.node_id("B").unwrap();
        let demand = DemandMatrix::from_entries([(a, b, 50.0)]);
        let run = assign(&net, &demand, Policy::AllOrNothing, &BprParams::default()).unwrap();

        let mut out = Vec::new();
        write_flow_report(&mut out, &net, &run).unwrap();

        let rows = parse_rows(&out);
        assert_eq!(rows[0], vec!["from", "to", "flow", "travel_time"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "A");
        assert_eq!(rows[1][1], "B");
        assert_eq!(rows[1][2].parse::<f64>().unwrap(), 50.0);
        let t: f64 = rows[1][3].parse().unwrap();
        assert!((t - 10.09375).abs() < 1e-9);
    }

    #[test]
    fn step_trace_rows() {
        let net = one_edge();
        let a = net.node_id("A").unwrap();
        let b = net.node_id("B").unwrap();
        let demand = DemandMatrix::from_entries([(a, b, 50.0)]);
        let run = assign_traced(
            &net,
            &demand,
            Policy::Incremental { steps: 2 },
            &BprParams::default(),
        )
        .unwrap();

        let mut out = Vec::new();
        write_step_trace(&mut out, &net, run.trace.as_ref().unwrap()).unwrap();

        let rows = parse_rows(&out);
        assert_eq!(rows[0], vec!["step", "from", "to", "flow", "travel_time"]);
        assert_eq!(rows.len(), 3); // 2 steps × 1 edge

        // Step 1 routes at free flow; step 2 at BPR(25).
        assert_eq!(rows[1][0], "1");
        assert_eq!(rows[1][4].parse::<f64>().unwrap(), 10.0);
        assert_eq!(rows[2][0], "2");
        let t2: f64 = rows[2][4].parse().unwrap();
        assert!((t2 - 10.005859375).abs() < 1e-9);
        // Each step contributes half the demand.
        assert_eq!(rows[1][3].parse::<f64>().unwrap(), 25.0);
        assert_eq!(rows[2][3].parse::<f64>().unwrap(), 25.0);
    }
}
