//! The per-frame agent state machine.

use std::collections::VecDeque;

use tracing::trace;

use molt_core::{AgentId, AgentRole, NodeId, Point, Skin, Step};
use molt_graph::PathGraph;

use crate::{Facing, Gesture, MotionState, Sprite};

/// A single moving (or seated) figure in the scene.
///
/// Fields are `pub` so controllers and renderers can read them directly;
/// use the methods below to change movement so the state and the target
/// stay consistent.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id:   AgentId,
    pub role: AgentRole,
    pub skin: Skin,
    pub pos:  Point,

    /// Node this agent occupies.  `None` only for agents never placed.
    pub current_node: Option<NodeId>,
    /// Node reserved for the move in progress (`Moving` only).
    pub next_node: Option<NodeId>,
    /// Point being stepped toward (`Moving` and `Walking`).
    pub target: Option<Point>,
    pub state: MotionState,
    /// Pending node ids, front first.
    pub route: VecDeque<NodeId>,

    pub facing:    Facing,
    pub claws_out: bool,
    pub gesture:   Gesture,
}

impl Agent {
    /// Create an agent standing at `pos` on `node`.
    ///
    /// Does not touch the graph; [`AgentStore::spawn`](crate::AgentStore::spawn)
    /// also marks the node occupied.
    pub fn new(id: AgentId, role: AgentRole, skin: Skin, node: NodeId, pos: Point) -> Self {
        Self {
            id,
            role,
            skin,
            pos,
            current_node: Some(node),
            next_node:    None,
            target:       None,
            state:        MotionState::Idle,
            route:        VecDeque::new(),
            facing:       Facing::default(),
            claws_out:    false,
            gesture:      Gesture::default(),
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Replace the pending route.
    ///
    /// A move already in progress is unaffected; the new route is picked up
    /// the next time the agent is idle.
    pub fn set_route<I: IntoIterator<Item = NodeId>>(&mut self, route: I) {
        self.route = route.into_iter().collect();
    }

    /// Walk straight to `point`, ignoring the graph.
    pub fn walk_to(&mut self, point: Point) {
        self.target = Some(point);
        self.state = MotionState::Walking;
    }

    /// Stop where the agent stands.
    ///
    /// A reservation held for an interrupted node move is released so the
    /// node does not stay locked.
    pub fn hold(&mut self, graph: &mut PathGraph) {
        if let Some(next) = self.next_node.take() {
            graph.release_reservation(next, self.id);
        }
        self.target = None;
        self.state = MotionState::Idle;
    }

    /// Begin the pinch gesture with the claws out.
    pub fn start_gesture(&mut self) {
        self.claws_out = true;
        self.gesture.start();
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == MotionState::Idle
    }

    #[inline]
    pub fn is_gesturing(&self) -> bool {
        self.gesture.active
    }

    /// `true` if the agent is idle on `node` with nothing left to do.
    pub fn is_settled_at(&self, node: NodeId) -> bool {
        self.is_idle() && self.route.is_empty() && self.current_node == Some(node)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::of(self)
    }

    // ── Update ────────────────────────────────────────────────────────────

    /// Advance one frame.
    ///
    /// Returns the node the agent arrived on this frame, if any.  Never
    /// fails: unknown route ids leave the agent waiting and a travelling
    /// state without a target falls back to `Idle`.
    pub fn update(&mut self, graph: &mut PathGraph, speed: f32) -> Option<NodeId> {
        if matches!(self.state, MotionState::Idle | MotionState::Waiting) {
            self.claim_next(graph);
        }

        let arrived = if self.state.is_travelling() {
            self.travel(graph, speed)
        } else {
            None
        };

        if let Some(claws) = self.gesture.advance() {
            self.claws_out = claws;
        }

        arrived
    }

    /// Try to reserve the front of the route and start moving to it.
    fn claim_next(&mut self, graph: &mut PathGraph) {
        while self.route.front().is_some_and(|&n| Some(n) == self.current_node) {
            self.route.pop_front();
        }
        let Some(&next) = self.route.front() else {
            return;
        };

        if graph.try_reserve(next, self.id) {
            // try_reserve succeeded, so the node exists.
            self.target = graph.node(next).map(|n| n.pos);
            self.next_node = Some(next);
            self.state = MotionState::Moving;
        } else {
            self.state = MotionState::Waiting;
        }
    }

    fn travel(&mut self, graph: &mut PathGraph, speed: f32) -> Option<NodeId> {
        let Some(target) = self.target else {
            self.state = MotionState::Idle;
            return None;
        };

        match self.pos.step_toward(target, speed) {
            Step::Advanced { pos, dx } => {
                self.pos = pos;
                if let Some(facing) = Facing::from_dx(dx) {
                    self.facing = facing;
                }
                None
            }
            Step::Arrived(at) => {
                self.pos = at;
                self.target = None;
                let was_moving = self.state == MotionState::Moving;
                self.state = MotionState::Idle;

                let next = self.next_node.take()?;
                if !was_moving {
                    // A node move was overridden by walk_to.
                    graph.release_reservation(next, self.id);
                    return None;
                }
                graph.complete_move(self.current_node, next, self.id);
                self.current_node = Some(next);
                if self.route.front() == Some(&next) {
                    self.route.pop_front();
                }
                trace!(agent = %self.id, node = graph.key_of(next), "arrived");
                Some(next)
            }
        }
    }
}
