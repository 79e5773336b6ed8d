//! `ta-core` — foundational types for the `rust_ta` traffic assignment
//! workspace.
//!
//! This crate is a dependency of every other `ta-*` crate.  It intentionally
//! has no `ta-*` dependencies and no required external ones (only optional
//! `serde`).  Error enums live with the subsystems that raise them
//! (`ta-network`, `ta-assign`, `ta-io`).
//!
//! # What lives here
//!
//! | Module    | Contents                    |
//! |-----------|-----------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`          |
//! | [`point`] | `Point`, Euclidean distance |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod point;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{EdgeId, NodeId};
pub use point::Point;
