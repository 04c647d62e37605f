//! Ambient gestures: every so often a random member of the congregation
//! pinches.

use tracing::debug;

use molt_agent::AgentStore;
use molt_core::{AgentId, SimRng};

use crate::{Director, Stage, StageEvent};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmbientConfig {
    /// Frames between picks.  The first pick happens after one full interval.
    pub interval_frames: u32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self { interval_frames: 180 }
    }
}

/// Countdown plus the pool of agents eligible to gesture.
#[derive(Clone, Debug)]
pub struct AmbientGestures {
    interval:  u32,
    countdown: u32,
    pool:      Vec<AgentId>,
}

impl AmbientGestures {
    pub fn new(config: &AmbientConfig, pool: Vec<AgentId>) -> Self {
        let interval = config.interval_frames.max(1);
        Self { interval, countdown: interval, pool }
    }

    pub fn pool(&self) -> &[AgentId] {
        &self.pool
    }

    /// Frames until the next pick.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Count down one frame; on expiry start a gesture on a random idle,
    /// non-gesturing pool member and reset the countdown.
    ///
    /// The countdown resets even when nobody is available.
    pub fn tick(&mut self, agents: &mut AgentStore, rng: &mut SimRng) -> Option<AgentId> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.interval;

        let candidates: Vec<AgentId> = self
            .pool
            .iter()
            .copied()
            .filter(|&id| agents.get(id).is_some_and(|a| a.is_idle() && !a.is_gesturing()))
            .collect();
        let chosen = *rng.choose(&candidates)?;
        agents.get_mut(chosen)?.start_gesture();
        Some(chosen)
    }
}

impl Director for AmbientGestures {
    fn name(&self) -> &'static str {
        "ambient"
    }

    fn direct(&mut self, stage: &mut Stage<'_>, events: &mut Vec<StageEvent>) {
        if let Some(agent) = self.tick(stage.agents, stage.rng) {
            debug!(frame = %stage.frame, %agent, "ambient gesture");
            events.push(StageEvent::GestureStarted { frame: stage.frame, agent });
        }
    }
}

