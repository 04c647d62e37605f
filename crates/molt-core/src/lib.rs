//! `molt-core` — foundational types for the `molt_sim` procession framework.
//!
//! This crate is a dependency of every other `molt-*` crate.  It has no
//! `molt-*` dependencies and only `rand` and `thiserror` externally, plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `NodeId`                                       |
//! | [`geo`]   | `Point`, `Step`, straight-line stepping                   |
//! | [`time`]  | `Frame`, `FrameClock`, `SimConfig`                        |
//! | [`cue`]   | `Cue<E>`, `CueTable<E>` — frame-threshold effect tables   |
//! | [`kind`]  | `NodeKind`, `AgentRole`, `Skin`                           |
//! | [`rng`]   | `SimRng` (seeded, deterministic)                          |
//! | [`error`] | `MoltError`, `MoltResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cue;
pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cue::{Cue, CueTable};
pub use error::{MoltError, MoltResult};
pub use geo::{Point, Step};
pub use ids::{AgentId, NodeId};
pub use kind::{AgentRole, NodeKind, Skin};
pub use rng::SimRng;
pub use time::{Frame, FrameClock, SimConfig};
