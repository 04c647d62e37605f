//! Notable things directors report back to the frame loop.

use molt_core::{AgentId, Frame};

use crate::RitualPhase;

/// A ritual phase transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub frame:  Frame,
    pub from:   RitualPhase,
    pub to:     RitualPhase,
    /// Leader at the moment of the change.  On a rotation back to
    /// `Approach` this is the *new* leader.
    pub leader: AgentId,
}

/// Reported by a [`Director`](crate::Director) for observers and output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StageEvent {
    Phase(PhaseChange),
    /// The leader finished a full cycle and went to the back of the queue.
    Rotated { frame: Frame, finished: AgentId, next: AgentId },
    /// An ambient pinch started.
    GestureStarted { frame: Frame, agent: AgentId },
    /// The preacher set off toward the other side of the pulpit.
    PacerTurned { frame: Frame, agent: AgentId },
}

impl StageEvent {
    pub fn frame(&self) -> Frame {
        match *self {
            StageEvent::Phase(change)                => change.frame,
            StageEvent::Rotated { frame, .. }        => frame,
            StageEvent::GestureStarted { frame, .. } => frame,
            StageEvent::PacerTurned { frame, .. }    => frame,
        }
    }
}
