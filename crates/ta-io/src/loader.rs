//! JSON network and demand loaders.
//!
//! # Network file format
//!
//! Parallel arrays, one entry per node / per link:
//!
//! ```json
//! {
//!   "nodes": { "name": ["A", "B"], "x": [0.0, 3.0], "y": [0.0, 4.0] },
//!   "links": { "between": [["A", "B"]], "speedmax": [2.0], "capacity": [100.0] }
//! }
//! ```
//!
//! Each link is a bidirectional road: the loader derives
//! `distance = euclidean(pos[begin], pos[end])` and
//! `free_flow_time = distance / speedmax`, then adds one directed edge per
//! direction with identical attributes (flow and cost stay per-direction).
//!
//! # Demand file format
//!
//! ```json
//! { "from": ["A"], "to": ["B"], "amount": [50.0] }
//! ```
//!
//! Node names are resolved against an already-loaded network; duplicate
//! `(from, to)` pairs merge additively.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ta_core::{NodeId, Point};
use ta_assign::DemandMatrix;
use ta_network::{Network, NetworkBuilder};

use crate::error::{IoError, IoResult};

// ── File records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NetworkFile {
    nodes: NodeArrays,
    links: LinkArrays,
}

#[derive(Deserialize)]
struct NodeArrays {
    name: Vec<String>,
    x:    Vec<f64>,
    y:    Vec<f64>,
}

#[derive(Deserialize)]
struct LinkArrays {
    between:  Vec<(String, String)>,
    speedmax: Vec<f64>,
    capacity: Vec<f64>,
}

#[derive(Deserialize)]
struct DemandFile {
    #[serde(rename = "from")]
    origins:      Vec<String>,
    #[serde(rename = "to")]
    destinations: Vec<String>,
    #[serde(rename = "amount")]
    amounts:      Vec<f64>,
}

// ── Network loading ───────────────────────────────────────────────────────────

/// Load a [`Network`] from a JSON file.
pub fn load_network_json(path: &Path) -> IoResult<Network> {
    let file = std::fs::File::open(path)?;
    load_network_reader(file)
}

/// Like [`load_network_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded fixture data.
pub fn load_network_reader<R: Read>(reader: R) -> IoResult<Network> {
    let file: NetworkFile = serde_json::from_reader(reader)?;

    let node_count = file.nodes.name.len();
    if file.nodes.x.len() != node_count || file.nodes.y.len() != node_count {
        return Err(IoError::Parse(format!(
            "nodes arrays disagree on length: {} names, {} x, {} y",
            node_count,
            file.nodes.x.len(),
            file.nodes.y.len()
        )));
    }

    let link_count = file.links.between.len();
    if file.links.speedmax.len() != link_count || file.links.capacity.len() != link_count {
        return Err(IoError::Parse(format!(
            "links arrays disagree on length: {} between, {} speedmax, {} capacity",
            link_count,
            file.links.speedmax.len(),
            file.links.capacity.len()
        )));
    }

    // Two directed edges per link.
    let mut builder = NetworkBuilder::with_capacity(node_count, link_count * 2);

    let mut by_name: HashMap<&str, NodeId> = HashMap::with_capacity(node_count);
    for (i, name) in file.nodes.name.iter().enumerate() {
        let id = builder.add_node(name.clone(), Point::new(file.nodes.x[i], file.nodes.y[i]));
        by_name.insert(name.as_str(), id);
        // Duplicate names are caught at build time.
    }

    for (i, (begin, end)) in file.links.between.iter().enumerate() {
        let from = *by_name
            .get(begin.as_str())
            .ok_or_else(|| IoError::UnknownNode(begin.clone()))?;
        let to = *by_name
            .get(end.as_str())
            .ok_or_else(|| IoError::UnknownNode(end.clone()))?;

        let speedmax = file.links.speedmax[i];
        if !(speedmax > 0.0) || !speedmax.is_finite() {
            return Err(IoError::InvalidLink {
                from: begin.clone(),
                to:   end.clone(),
                what: "speedmax must be finite and > 0",
            });
        }

        let distance = builder.node_pos(from).distance(builder.node_pos(to));
        if distance <= 0.0 {
            return Err(IoError::InvalidLink {
                from: begin.clone(),
                to:   end.clone(),
                what: "endpoints coincide, link has zero length",
            });
        }

        let free_flow_time = distance / speedmax;
        builder.add_two_way(from, to, free_flow_time, file.links.capacity[i]);
    }

    Ok(builder.build()?)
}

// ── Demand loading ────────────────────────────────────────────────────────────

/// Load a [`DemandMatrix`] from a JSON file, resolving names against `net`.
pub fn load_demand_json(path: &Path, net: &Network) -> IoResult<DemandMatrix> {
    let file = std::fs::File::open(path)?;
    load_demand_reader(file, net)
}

/// Like [`load_demand_json`] but accepts any `Read` source.
pub fn load_demand_reader<R: Read>(reader: R, net: &Network) -> IoResult<DemandMatrix> {
    let file: DemandFile = serde_json::from_reader(reader)?;

    let entry_count = file.origins.len();
    if file.destinations.len() != entry_count || file.amounts.len() != entry_count {
        return Err(IoError::Parse(format!(
            "demand arrays disagree on length: {} from, {} to, {} amount",
            entry_count,
            file.destinations.len(),
            file.amounts.len()
        )));
    }

    let mut entries = Vec::with_capacity(entry_count);
    for i in 0..entry_count {
        let origin = net
            .node_id(&file.origins[i])
            .ok_or_else(|| IoError::UnknownNode(file.origins[i].clone()))?;
        let destination = net
            .node_id(&file.destinations[i])
            .ok_or_else(|| IoError::UnknownNode(file.destinations[i].clone()))?;
        entries.push((origin, destination, file.amounts[i]));
    }

    Ok(DemandMatrix::from_entries(entries))
}
