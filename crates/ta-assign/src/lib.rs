//! `ta-assign` — the static traffic assignment engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`bpr`]         | `BprParams` volume-delay function                      |
//! | [`demand`]      | `DemandMatrix`, `DemandEntry`                          |
//! | [`router`]      | Dijkstra engine: `shortest_path`, trees, all-pairs     |
//! | [`aon`]         | One All-or-Nothing pass over a fixed cost field        |
//! | [`incremental`] | K-step incremental loop with cost refresh              |
//! | [`policy`]      | `Policy` enum, `assign`, `AssignmentRun`               |
//! | [`error`]       | `AssignError`, `AssignResult<T>`                       |
//!
//! # Control flow
//!
//! ```text
//! Network + DemandMatrix ──▶ assign(policy) ──▶ AssignmentRun
//!                              │
//!                              ├─ AllOrNothing: one pass at free-flow costs
//!                              └─ Incremental:  K × (refresh costs ▶ AON pass ▶ merge)
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Rayon fan-out of per-OD routing inside an AON pass.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod aon;
pub mod bpr;
pub mod demand;
pub mod error;
pub mod incremental;
pub mod policy;
pub mod router;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use aon::{all_or_nothing, AonOutcome, SkippedPair};
pub use bpr::BprParams;
pub use demand::{DemandEntry, DemandMatrix};
pub use error::{AssignError, AssignResult};
pub use incremental::StepTrace;
pub use policy::{assign, assign_traced, AssignmentRun, Policy, SkippedStep};
pub use router::{all_shortest_paths, shortest_path, shortest_path_tree, Path, ShortestPathTree};
