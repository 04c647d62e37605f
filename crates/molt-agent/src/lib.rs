//! `molt-agent` — agents that walk the position graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`state`]   | `MotionState`, `Facing`                                         |
//! | [`gesture`] | `Gesture` — the claw pinch sequence, `PINCH_SEQUENCE` cue table |
//! | [`agent`]   | `Agent` — per-frame movement state machine                      |
//! | [`sprite`]  | `Sprite` — read-only render projection of an agent              |
//! | [`store`]   | `AgentStore` — agents in collection order, occupancy audit      |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                  |
//!
//! # Movement model
//!
//! Two movement modes share one stepping routine:
//!
//! 1. **Node moves** (`Moving`): the agent follows its `route` one node at a
//!    time.  It reserves the next node before taking a step toward it and
//!    becomes that node's occupant on arrival, releasing the node it left.
//!    A node that is occupied or reserved by someone else leaves the agent
//!    `Waiting`; it retries every frame.
//! 2. **Free walks** (`Walking`): the agent heads for an arbitrary point
//!    without touching any occupancy claims.  Used for stepping up to the
//!    altar and for the preacher's pacing.
//!
//! Either way the agent covers `speed` canvas units per frame and snaps
//! exactly onto its target once it is closer than one step.

pub mod agent;
pub mod error;
pub mod gesture;
pub mod sprite;
pub mod state;
pub mod store;


pub use agent::Agent;
pub use error::{AgentError, AgentResult};
pub use gesture::{Gesture, Pinch, PINCH_SEQUENCE};
pub use sprite::Sprite;
pub use state::{Facing, MotionState};
pub use store::AgentStore;
