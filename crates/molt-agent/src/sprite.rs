//! Render projection of an agent.

use molt_core::{AgentId, AgentRole, Point, Skin};

use crate::{Agent, Facing};

/// Everything a render surface needs to draw one agent.
///
/// A `Sprite` is a copy; drawing can never feed back into the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sprite {
    pub agent:     AgentId,
    pub pos:       Point,
    pub facing:    Facing,
    pub claws_out: bool,
    pub skin:      Skin,
    pub role:      AgentRole,
    /// Draw scale; the preacher is drawn larger.
    pub scale:     f32,
}

impl Sprite {
    pub const PREACHER_SCALE: f32 = 1.3;

    pub fn of(agent: &Agent) -> Self {
        let scale = match agent.role {
            AgentRole::Preacher => Self::PREACHER_SCALE,
            _ => 1.0,
        };
        Self {
            agent:     agent.id,
            pos:       agent.pos,
            facing:    agent.facing,
            claws_out: agent.claws_out,
            skin:      agent.skin,
            role:      agent.role,
            scale,
        }
    }
}
