//! Assignment policy selection and the run result.
//!
//! One canonical entry point for both policies: All-or-Nothing is the
//! degenerate single-pass case, Incremental layers the congestion feedback
//! loop on top of the same AON primitive.  Selecting via [`Policy`] keeps
//! the two strategies sharing one router and one impedance implementation.

use ta_network::{CostField, FlowField, FlowSnapshot, Network};

use crate::aon::{all_or_nothing, SkippedPair};
use crate::bpr::BprParams;
use crate::demand::DemandMatrix;
use crate::error::{AssignError, AssignResult};
use crate::incremental::{self, StepTrace};

// ── Policy ────────────────────────────────────────────────────────────────────

/// Which assignment procedure to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    /// One congestion-blind pass: every pair's full demand rides its
    /// cheapest free-flow path.
    AllOrNothing,
    /// `steps` passes over `demand / steps` fractions, re-pricing edges
    /// between passes.  `steps` must be >= 1.
    Incremental { steps: u32 },
}

// ── Result ────────────────────────────────────────────────────────────────────

/// A skipped OD pair tagged with the 1-based step it was skipped in
/// (always 1 for All-or-Nothing).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedStep {
    pub step: u32,
    pub pair: SkippedPair,
}

/// The complete result of one assignment run — the core→reporting interface.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRun {
    /// Final accumulated flow per directed edge.
    pub flows: FlowSnapshot,
    /// Final travel time per directed edge, re-priced from `flows`.
    pub costs: CostField,
    /// Every (step, pair) whose demand fraction was dropped for lack of a
    /// path.  Empty on a fully connected network.
    pub skipped: Vec<SkippedStep>,
    /// Per-step snapshots, present only for traced runs.
    pub trace: Option<Vec<StepTrace>>,
}

impl AssignmentRun {
    /// Total demand volume that was dropped across all steps.  When this is
    /// nonzero, total assigned flow is less than total input demand — the
    /// documented consequence of skip-and-continue on disconnected networks.
    pub fn lost_volume(&self) -> f64 {
        self.skipped.iter().map(|s| s.pair.volume).sum()
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Run `policy` over `net` and `demand` with the given BPR coefficients.
///
/// Fails fast on invalid configuration (`steps == 0`, malformed BPR
/// coefficients) before touching any flow state.  Unroutable pairs do not
/// fail the run; they are reported on [`AssignmentRun::skipped`].
pub fn assign(
    net: &Network,
    demand: &DemandMatrix,
    policy: Policy,
    bpr: &BprParams,
) -> AssignResult<AssignmentRun> {
    run(net, demand, policy, bpr, false)
}

/// Like [`assign`], but records a per-step [`StepTrace`] for process
/// visibility (an All-or-Nothing run traces as a single step).
pub fn assign_traced(
    net: &Network,
    demand: &DemandMatrix,
    policy: Policy,
    bpr: &BprParams,
) -> AssignResult<AssignmentRun> {
    run(net, demand, policy, bpr, true)
}

fn run(
    net: &Network,
    demand: &DemandMatrix,
    policy: Policy,
    bpr: &BprParams,
    record_trace: bool,
) -> AssignResult<AssignmentRun> {
    bpr.validate()?;

    match policy {
        Policy::AllOrNothing => run_aon(net, demand, bpr, record_trace),
        Policy::Incremental { steps: 0 } => Err(AssignError::InvalidConfig(
            "incremental assignment requires at least 1 step".into(),
        )),
        Policy::Incremental { steps } => incremental::run(net, demand, steps, bpr, record_trace),
    }
}

/// One AON pass at free-flow costs, then a single re-pricing of the loaded
/// network for the reported link performance.
fn run_aon(
    net: &Network,
    demand: &DemandMatrix,
    bpr: &BprParams,
    record_trace: bool,
) -> AssignResult<AssignmentRun> {
    let free_flow = CostField::free_flow(net);

    let mut flow_field = FlowField::zeroed(net);
    let outcome = all_or_nothing(net, &free_flow, demand, &mut flow_field)?;

    let flows = flow_field.snapshot();
    let costs = CostField::from_flows(net, &flows, bpr);

    let trace = record_trace.then(|| {
        vec![StepTrace {
            step: 1,
            costs: free_flow,
            flows: flows.clone(),
            skipped: outcome.skipped.clone(),
        }]
    });

    Ok(AssignmentRun {
        flows,
        costs,
        skipped: outcome
            .skipped
            .into_iter()
            .map(|pair| SkippedStep { step: 1, pair })
            .collect(),
        trace,
    })
}
