//! `ta-io` — external interfaces of the assignment core.
//!
//! Everything in here is a collaborator around the engine, not part of it:
//! JSON loaders producing a [`ta_network::Network`] and a
//! [`ta_assign::DemandMatrix`], and a CSV writer consuming an
//! [`ta_assign::AssignmentRun`].
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`loader`] | `load_network_json` / `load_demand_json` (+ readers)  |
//! | [`report`] | `write_flow_report`, `write_step_trace`               |
//! | [`error`]  | `IoError`, `IoResult<T>`                              |

pub mod error;
pub mod loader;
pub mod report;

#[cfg(test)]
mod tests;

pub use error::{IoError, IoResult};
pub use loader::{load_demand_json, load_demand_reader, load_network_json, load_network_reader};
pub use report::{write_flow_report, write_step_trace};
