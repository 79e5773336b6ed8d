//! K-step incremental assignment loop.
//!
//! Each step routes `1/K` of the demand with All-or-Nothing against a cost
//! field derived from the flow accumulated in *earlier* steps only, then
//! merges the step's loads into the running total.  Steps therefore form a
//! strict data dependency chain and run sequentially; only the routing
//! inside one step may fan out (see [`crate::aon`]).
//!
//! As K grows the result approaches a fixed point of shortest-path routing
//! under congestion, but no equilibrium convergence is guaranteed — this is
//! an approximation policy, not a solver.

use ta_network::{CostField, FlowField, FlowSnapshot, Network};

use crate::aon::{all_or_nothing, SkippedPair};
use crate::bpr::BprParams;
use crate::demand::DemandMatrix;
use crate::error::AssignResult;
use crate::policy::{AssignmentRun, SkippedStep};

/// Snapshot of one incremental step, recorded when tracing is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTrace {
    /// 1-based step number.
    pub step: u32,
    /// The cost field the step routed against (derived from flow accumulated
    /// *before* this step).
    pub costs: CostField,
    /// This step's own flow contribution (not the running total).
    pub flows: FlowSnapshot,
    /// Pairs that found no path in this step.
    pub skipped: Vec<SkippedPair>,
}

/// Run `steps` incremental iterations.  `steps` is validated by the caller
/// ([`crate::policy::assign`]); `record_trace` controls whether per-step
/// snapshots are kept.
pub(crate) fn run(
    net: &Network,
    demand: &DemandMatrix,
    steps: u32,
    bpr: &BprParams,
    record_trace: bool,
) -> AssignResult<AssignmentRun> {
    debug_assert!(steps >= 1);

    let step_demand = demand.scaled(1.0 / steps as f64);

    let mut total = FlowField::zeroed(net);
    let mut skipped: Vec<SkippedStep> = Vec::new();
    let mut trace: Vec<StepTrace> = Vec::new();

    for step in 1..=steps {
        // Price edges from the flow accumulated in steps 1..step-1.  The
        // first step prices everything at free flow (zero accumulated flow).
        let costs = CostField::from_flows(net, &total.snapshot(), bpr);

        // Route this step's demand fraction into a fresh field, so the
        // pass's loads can be merged (and traced) as one unit.
        let mut step_flows = FlowField::zeroed(net);
        let outcome = all_or_nothing(net, &costs, &step_demand, &mut step_flows)?;

        // An unroutable pair loses only this step's fraction; later steps
        // retry it against refreshed costs.
        skipped.extend(
            outcome
                .skipped
                .iter()
                .map(|&pair| SkippedStep { step, pair }),
        );

        let step_snapshot = step_flows.snapshot();
        total.merge(&step_snapshot);

        if record_trace {
            trace.push(StepTrace {
                step,
                costs,
                flows: step_snapshot,
                skipped: outcome.skipped,
            });
        }
    }

    // Final reported link performance: re-price once from the cumulative flow.
    let flows = total.snapshot();
    let costs = CostField::from_flows(net, &flows, bpr);

    Ok(AssignmentRun {
        flows,
        costs,
        skipped,
        trace: record_trace.then_some(trace),
    })
}
