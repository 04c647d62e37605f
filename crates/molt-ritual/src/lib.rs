//! `molt-ritual` — scene choreography layered on top of agent movement.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`director`] | `Director` trait — one per-frame choreography hook               |
//! | [`stage`]    | `Stage<'a>` — mutable frame view handed to every director        |
//! | [`event`]    | `StageEvent`, `PhaseChange`                                      |
//! | [`script`]   | `ScriptConfig` (authored keys) → `RitualScript` (resolved ids)   |
//! | [`ritual`]   | `RitualController` — leader phases, rotation, follower advance   |
//! | [`ambient`]  | `AmbientGestures` — timed random pinch among the congregation    |
//! | [`pacing`]   | `Pacer` — the preacher walking side to side                      |
//! | [`error`]    | `RitualError`, `RitualResult<T>`                                 |
//!
//! # Frame order
//!
//! Directors run before any agent moves.  `molt-sim` calls them in the
//! order pacer → ambient → ritual, then updates the agents:
//!
//! 1. Directors only *command* agents (`set_route`, `walk_to`, `hold`,
//!    `start_gesture`) and flip claw state; positions change only in
//!    `Agent::update`.
//! 2. Follower advance ([`RitualController::advance_follower`]) runs right
//!    after each procession member's own update, so a follower sees the
//!    node its predecessor just vacated in the same frame.

pub mod ambient;
pub mod director;
pub mod error;
pub mod event;
pub mod pacing;
pub mod ritual;
pub mod script;
pub mod stage;

#[cfg(test)]
mod tests;

pub use ambient::{AmbientConfig, AmbientGestures};
pub use director::Director;
pub use error::{RitualError, RitualResult};
pub use event::{PhaseChange, StageEvent};
pub use pacing::{Pacer, PacingConfig};
pub use ritual::{RitualController, RitualPhase};
pub use script::{DevotionCue, RitualScript, ScriptConfig};
pub use stage::Stage;
