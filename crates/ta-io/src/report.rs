//! CSV flow report — the core→reporting boundary.
//!
//! One row per directed edge, keyed by node names:
//!
//! ```csv
//! from,to,flow,travel_time
//! A,B,50,10.09375
//! B,A,0,10
//! ```
//!
//! [`write_step_trace`] emits the same columns per incremental step (plus a
//! leading `step` column) for callers that requested process visibility.

use std::io::Write;

use csv::Writer;

use ta_assign::{AssignmentRun, StepTrace};
use ta_network::Network;

use crate::error::IoResult;

/// Write the final per-edge flow and travel-time mapping of `run` as CSV.
///
/// Rows are emitted in `EdgeId` order, which is deterministic for a given
/// network.  Impassable edges print their cost as `inf`.
pub fn write_flow_report<W: Write>(writer: W, net: &Network, run: &AssignmentRun) -> IoResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["from", "to", "flow", "travel_time"])?;

    for (edge, flow) in run.flows.iter() {
        let (from, to) = net.endpoints(edge);
        csv.write_record(&[
            net.node_name(from).to_owned(),
            net.node_name(to).to_owned(),
            flow.to_string(),
            run.costs.cost(edge).to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the per-step trace of an incremental run as CSV.
///
/// Each step contributes one row per edge: the step's own flow contribution
/// and the cost field the step routed against.
pub fn write_step_trace<W: Write>(writer: W, net: &Network, trace: &[StepTrace]) -> IoResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["step", "from", "to", "flow", "travel_time"])?;

    for step in trace {
        for (edge, flow) in step.flows.iter() {
            let (from, to) = net.endpoints(edge);
            csv.write_record(&[
                step.step.to_string(),
                net.node_name(from).to_owned(),
                net.node_name(to).to_owned(),
                flow.to_string(),
                step.costs.cost(edge).to_string(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}
