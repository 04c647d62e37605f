//! The ritual controller: a rotating leader walks a scripted cycle while
//! the rest of the procession shuffles forward behind it.

use std::collections::VecDeque;

use tracing::{debug, warn};

use molt_agent::AgentStore;
use molt_core::{AgentId, AgentRole, Frame, NodeId};
use molt_graph::PathGraph;

use crate::{DevotionCue, Director, PhaseChange, RitualScript, Stage, StageEvent};

// ── RitualPhase ───────────────────────────────────────────────────────────────

/// The leader's place in the ritual cycle.
///
/// ```text
/// Approach ──(idle at altar)──▶ StepUp ──(reached step-up y)──▶ Devotion
///    ▲                                                            │
///    └──────────(idle at rejoin, queue rotated)── Exit ◀──(exit cue)┘
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RitualPhase {
    #[default]
    Approach,
    StepUp,
    Devotion,
    Exit,
}

impl RitualPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            RitualPhase::Approach => "approach",
            RitualPhase::StepUp   => "step_up",
            RitualPhase::Devotion => "devotion",
            RitualPhase::Exit     => "exit",
        }
    }
}

impl std::fmt::Display for RitualPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RitualController ──────────────────────────────────────────────────────────

/// Drives the procession leader through [`RitualPhase`]s.
///
/// The leader is always the front of the queue.  Every transition is
/// guarded by the state that caused it, so running `step` again on the
/// same frame state never double-fires.
#[derive(Debug, Clone)]
pub struct RitualController {
    script:      RitualScript,
    phase:       RitualPhase,
    phase_timer: u32,
    queue:       VecDeque<AgentId>,
    cycles:      u64,
    /// Leader as of the start of the latest `step`; a rotation during that
    /// step does not change it until the next one.
    frame_leader: Option<AgentId>,
}

impl RitualController {
    /// `queue` is the procession in order, leader first.
    pub fn new<I: IntoIterator<Item = AgentId>>(script: RitualScript, queue: I) -> Self {
        let queue: VecDeque<AgentId> = queue.into_iter().collect();
        Self {
            script,
            phase:        RitualPhase::Approach,
            phase_timer:  0,
            frame_leader: queue.front().copied(),
            queue,
            cycles:       0,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> RitualPhase {
        self.phase
    }

    /// Frames spent in `Devotion` so far (0 in other phases).
    #[inline]
    pub fn phase_timer(&self) -> u32 {
        self.phase_timer
    }

    #[inline]
    pub fn leader(&self) -> Option<AgentId> {
        self.queue.front().copied()
    }

    pub fn queue(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.queue.iter().copied()
    }

    /// Completed leader rotations.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn script(&self) -> &RitualScript {
        &self.script
    }

    // ── Per-frame logic ───────────────────────────────────────────────────

    /// Run one frame of leader logic.
    ///
    /// Returns the phase change, if one happened.  A rotation additionally
    /// pushes [`StageEvent::Rotated`] into `events` when given.
    pub fn step(
        &mut self,
        frame:  Frame,
        agents: &mut AgentStore,
        graph:  &mut PathGraph,
        mut events: Option<&mut Vec<StageEvent>>,
    ) -> Option<PhaseChange> {
        self.frame_leader = self.leader();
        let leader_id = self.frame_leader?;
        let leader = agents.get_mut(leader_id)?;
        let script = &self.script;

        let next = match self.phase {
            RitualPhase::Approach => {
                if leader.current_node != Some(script.altar) {
                    if !(leader.route.len() == 1 && leader.route[0] == script.altar) {
                        leader.set_route([script.altar]);
                    }
                    None
                } else if leader.is_idle() {
                    leader.route.clear();
                    Some(RitualPhase::StepUp)
                } else {
                    None
                }
            }

            RitualPhase::StepUp => {
                if leader.is_idle() {
                    leader.walk_to(script.step_up);
                }
                if (leader.pos.y - script.step_up.y).abs() < script.step_up_tolerance {
                    Some(RitualPhase::Devotion)
                } else {
                    None
                }
            }

            RitualPhase::Devotion => {
                self.phase_timer += 1;
                leader.hold(graph);
                match script.devotion.at(self.phase_timer) {
                    Some(DevotionCue::Extend)  => { leader.claws_out = true; None }
                    Some(DevotionCue::Retract) => { leader.claws_out = false; None }
                    Some(DevotionCue::Exit)    => {
                        leader.claws_out = false;
                        leader.set_route(script.exit_route.iter().copied());
                        Some(RitualPhase::Exit)
                    }
                    None => None,
                }
            }

            RitualPhase::Exit => {
                if leader.is_idle() && leader.route.is_empty() {
                    if leader.is_settled_at(script.rejoin) {
                        self.queue.rotate_left(1);
                        self.cycles += 1;
                        let next_leader = self.queue.front().copied().unwrap_or(leader_id);
                        debug!(
                            %frame,
                            finished = %leader_id,
                            next = %next_leader,
                            cycle = self.cycles,
                            "leader rotated to the back of the procession"
                        );
                        if let Some(events) = events.as_deref_mut() {
                            events.push(StageEvent::Rotated {
                                frame,
                                finished: leader_id,
                                next: next_leader,
                            });
                        }
                    } else {
                        warn!(
                            %frame,
                            leader = %leader_id,
                            node = graph.key_of(leader.current_node.unwrap_or(NodeId::INVALID)),
                            "leader stopped off the rejoin node; restarting approach"
                        );
                    }
                    Some(RitualPhase::Approach)
                } else {
                    None
                }
            }
        };

        let to = next?;
        let change = PhaseChange {
            frame,
            from: self.phase,
            to,
            leader: self.leader().unwrap_or(leader_id),
        };
        debug!(%frame, from = %change.from, to = %change.to, leader = %change.leader, "ritual phase");
        self.phase = to;
        self.phase_timer = 0;
        Some(change)
    }

    /// Move an idle follower one lane node closer to the altar if that node
    /// is completely free.
    ///
    /// Called after the follower's own update.  Returns whether a route was
    /// assigned.  The leader, non-procession agents, and agents already busy
    /// are left alone.  "Leader" is the one the latest `step` started with:
    /// on a rotation frame the agent that just rejoined is still skipped and
    /// the new front may close up.
    pub fn advance_follower(&self, agent: AgentId, agents: &mut AgentStore, graph: &PathGraph) -> bool {
        if Some(agent) == self.frame_leader {
            return false;
        }
        let Some(follower) = agents.get_mut(agent) else {
            return false;
        };
        if follower.role != AgentRole::Procession || !follower.is_idle() || !follower.route.is_empty() {
            return false;
        }
        let Some(here) = follower.current_node.and_then(|n| graph.node(n)) else {
            return false;
        };

        let ahead = graph
            .neighbors(here.id)
            .find(|n| n.pos.y < here.pos.y && n.kind == self.script.lane);
        match ahead {
            Some(node) if node.is_free() => {
                follower.set_route([node.id]);
                true
            }
            _ => false,
        }
    }
}

impl Director for RitualController {
    fn name(&self) -> &'static str {
        "ritual"
    }

    fn direct(&mut self, stage: &mut Stage<'_>, events: &mut Vec<StageEvent>) {
        if let Some(change) = self.step(stage.frame, stage.agents, stage.graph, Some(&mut *events)) {
            events.push(StageEvent::Phase(change));
        }
    }
}
