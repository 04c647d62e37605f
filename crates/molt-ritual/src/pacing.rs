//! Preacher pacing behind the pulpit.

use tracing::trace;

use molt_agent::AgentStore;
use molt_core::{AgentId, Point};

use crate::{Director, Stage, StageEvent};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacingConfig {
    /// Frames to rest before turning.  The pacer moves once the rest timer
    /// *exceeds* this value and the preacher is idle.
    pub interval_frames: u32,
    /// Horizontal center the preacher paces around.
    pub center_x: f32,
    /// Distance either side of `center_x`.
    pub offset: f32,
    /// Row the preacher walks along.
    pub y: f32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { interval_frames: 240, center_x: 61.0, offset: 3.0, y: 42.0 }
    }
}

/// Walks one agent back and forth across `center_x`.
#[derive(Clone, Debug)]
pub struct Pacer {
    config: PacingConfig,
    agent:  AgentId,
    timer:  u32,
}

impl Pacer {
    pub fn new(config: PacingConfig, agent: AgentId) -> Self {
        Self { config, agent, timer: 0 }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Advance the rest timer; send the agent across when it is due.
    /// Returns the new walk target.
    pub fn tick(&mut self, agents: &mut AgentStore) -> Option<Point> {
        self.timer += 1;
        let preacher = agents.get_mut(self.agent)?;
        if !preacher.is_idle() || self.timer <= self.config.interval_frames {
            return None;
        }
        let cfg = &self.config;
        let x = if preacher.pos.x > cfg.center_x { cfg.center_x - cfg.offset } else { cfg.center_x + cfg.offset };
        let target = Point::new(x, cfg.y);
        preacher.walk_to(target);
        self.timer = 0;
        trace!(agent = %self.agent, %target, "pacer turned");
        Some(target)
    }
}

impl Director for Pacer {
    fn name(&self) -> &'static str {
        "pacer"
    }

    fn direct(&mut self, stage: &mut Stage<'_>, events: &mut Vec<StageEvent>) {
        if self.tick(stage.agents).is_some() {
            events.push(StageEvent::PacerTurned { frame: stage.frame, agent: self.agent });
        }
    }
}
