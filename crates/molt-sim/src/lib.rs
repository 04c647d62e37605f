//! `molt-sim` — frame loop orchestrator for the molt_sim framework.
//!
//! # Frame loop
//!
//! ```text
//! until end frame or cancelled:
//!   ① Clock     — advance the frame counter.
//!   ② Directors — pacer, ambient gestures, ritual controller (leader logic).
//!   ③ Agents    — procession in queue order, leader first, each update
//!                 followed by a follower advance; then everyone else
//!                 in collection order.
//!   ④ Report    — observer callbacks (events, frame summary, snapshots).
//!   ⑤ Draw      — optional: every agent's Sprite handed to a Surface.
//! ```
//!
//! Everything runs on the calling thread.  Cancellation goes through a
//! cloneable [`StopHandle`] checked before each frame; when the loop exits
//! for any reason the surface is released and `on_sim_end` is called before
//! `run` returns.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use molt_core::SimConfig;
//! use molt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), graph)
//!     .procession(["aisle_80", "aisle_85", "aisle_90"])
//!     .congregation(seat_keys)
//!     .preacher("pulpit")
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stop;
pub mod surface;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FrameSummary, NoopObserver, SimObserver};
pub use sim::{RunOutcome, Sim};
pub use stop::StopHandle;
pub use surface::{NullSurface, Surface};
