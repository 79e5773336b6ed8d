//! `ta-network` — directed road network and per-edge value fields.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`network`] | `Network` (CSR graph), `NetworkBuilder`                  |
//! | [`fields`]  | `CostField`, `FlowField`, `FlowSnapshot`, `Impedance`    |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                       |
//!
//! # Mutability model
//!
//! The graph itself is structurally immutable after `NetworkBuilder::build`.
//! The two mutable aspects of an assignment run — current edge costs and
//! accumulated edge flows — live in standalone [`CostField`] and
//! [`FlowField`] values keyed by `EdgeId`, passed explicitly into each
//! assignment step.  This keeps the step-to-step data dependency visible in
//! function signatures instead of hidden in shared graph state.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod error;
pub mod fields;
pub mod network;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use fields::{CostField, FlowField, FlowSnapshot, Impedance};
pub use network::{Network, NetworkBuilder};
