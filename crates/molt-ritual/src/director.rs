//! The `Director` trait — the choreography extension point.

use crate::{Stage, StageEvent};

/// Per-frame scene logic that steers agents.
///
/// Directors run once per frame, before the agent update pass, and push any
/// notable events into `events`.  They are infallible at runtime: a missing
/// agent or node means "nothing to do this frame", never an error.
///
/// # Example
///
/// ```rust,ignore
/// struct WaveEveryMinute;
///
/// impl Director for WaveEveryMinute {
///     fn name(&self) -> &'static str { "wave" }
///
///     fn direct(&mut self, stage: &mut Stage<'_>, events: &mut Vec<StageEvent>) {
///         if stage.frame.0 % 3600 == 0 {
///             if let Some(agent) = stage.agents.get_mut(AgentId(0)) {
///                 agent.start_gesture();
///             }
///         }
///     }
/// }
/// ```
pub trait Director {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    fn direct(&mut self, stage: &mut Stage<'_>, events: &mut Vec<StageEvent>);
}
