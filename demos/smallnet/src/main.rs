//! smallnet — smallest end-to-end example for the rust_ta workspace.
//!
//! Loads a synthetic 6-node, 8-link planar network plus a 4-pair demand
//! matrix from embedded JSON, runs both assignment policies, and prints the
//! per-edge flow/travel-time reports as CSV.  Swap the embedded fixtures for
//! real network and demand files to run an actual study area.

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;

use ta_assign::{assign, BprParams, Policy};
use ta_io::{load_demand_reader, load_network_reader, write_flow_report};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Number of incremental steps.  Larger K tracks congestion more closely at
/// the price of K shortest-path passes.
const INCREMENTS: u32 = 50;

// ── Embedded fixtures ─────────────────────────────────────────────────────────

// Two east-west corridors (A-B-C fast, D-E-F slower) with three connectors
// and one diagonal shortcut.  Coordinates in km, speedmax in km/h, so
// free-flow times come out in hours; capacities in vehicles/hour.
const NETWORK_JSON: &str = r#"{
    "nodes": {
        "name": ["A", "B", "C", "D", "E", "F"],
        "x":    [0.0, 4.0, 8.0, 0.0, 4.0, 8.0],
        "y":    [0.0, 0.0, 0.0, 3.0, 3.0, 3.0]
    },
    "links": {
        "between":  [["A","B"], ["B","C"], ["D","E"], ["E","F"],
                     ["A","D"], ["B","E"], ["C","F"], ["A","E"]],
        "speedmax": [40.0, 40.0, 30.0, 30.0, 30.0, 30.0, 30.0, 50.0],
        "capacity": [600.0, 600.0, 500.0, 500.0, 400.0, 400.0, 400.0, 300.0]
    }
}"#;

const DEMAND_JSON: &str = r#"{
    "from":   ["A", "A", "D", "B"],
    "to":     ["C", "F", "C", "F"],
    "amount": [700.0, 500.0, 300.0, 200.0]
}"#;

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let net = load_network_reader(Cursor::new(NETWORK_JSON))?;
    let demand = load_demand_reader(Cursor::new(DEMAND_JSON), &net)?;
    let bpr = BprParams::default();

    println!(
        "network: {} nodes, {} directed edges; demand: {} pairs, {} vehicles",
        net.node_count(),
        net.edge_count(),
        demand.len(),
        demand.total_volume()
    );

    for (label, policy) in [
        ("all-or-nothing", Policy::AllOrNothing),
        ("incremental", Policy::Incremental { steps: INCREMENTS }),
    ] {
        let started = Instant::now();
        let run = assign(&net, &demand, policy, &bpr)?;
        let elapsed = started.elapsed();

        println!("\n== {label} ({elapsed:.2?}) ==");
        for s in &run.skipped {
            println!(
                "skipped step {}: {} -> {} ({} vehicles)",
                s.step,
                net.node_name(s.pair.origin),
                net.node_name(s.pair.destination),
                s.pair.volume
            );
        }
        if run.lost_volume() > 0.0 {
            println!("lost volume: {}", run.lost_volume());
        }

        let mut out = Vec::new();
        write_flow_report(&mut out, &net, &run)?;
        print!("{}", String::from_utf8(out)?);
    }

    Ok(())
}
