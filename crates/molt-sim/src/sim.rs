//! The `Sim` struct and its frame loop.

use tracing::info;

use molt_agent::{AgentStore, MotionState};
use molt_core::{AgentId, Frame, FrameClock, SimConfig, SimRng};
use molt_graph::PathGraph;
use molt_ritual::{AmbientGestures, Director, Pacer, RitualController, Stage, StageEvent};

use crate::{FrameSummary, NullSurface, SimObserver, SimResult, StopHandle, Surface};

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Frames simulated by this call.
    pub frames: u64,
    /// The clock after the last simulated frame.
    pub final_frame: Frame,
    /// `true` if the [`StopHandle`] ended the run early.
    pub cancelled: bool,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns all scene state and drives the per-frame loop:
///
/// 1. **Clock**: advance to the next frame.
/// 2. **Directors**: pacer, ambient gestures, then the ritual controller.
///    They only command agents; nothing moves yet.
/// 3. **Agents**: the procession in queue order, leader first, each
///    `Agent::update` followed by a follower advance attempt; then every
///    other agent's `Agent::update` in collection order.
/// 4. **Summary**: count arrivals, travellers, waiters, and gestures.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total frames, seed, speed, …).
    pub config: SimConfig,

    /// Frame counter.  Frame 0 is the state before any step.
    pub clock: FrameClock,

    /// Nodes, edges and occupancy.
    pub graph: PathGraph,

    /// Every agent in collection order.
    pub agents: AgentStore,

    /// Leader logic.  `None` for scenes without a procession.
    pub ritual: Option<RitualController>,

    /// Random congregation gestures.
    pub ambient: AmbientGestures,

    /// Preacher pacing.  `None` for scenes without a preacher.
    pub pacer: Option<Pacer>,

    /// Master RNG, used only by directors.
    pub rng: SimRng,

    pub(crate) stop: StopHandle,

    /// Events reported during the last frame.
    events: Vec<StageEvent>,
}

impl Sim {
    pub(crate) fn from_parts(
        config:  SimConfig,
        graph:   PathGraph,
        agents:  AgentStore,
        ritual:  Option<RitualController>,
        ambient: AmbientGestures,
        pacer:   Option<Pacer>,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            rng: SimRng::new(config.seed),
            config,
            graph,
            agents,
            ritual,
            ambient,
            pacer,
            stop: StopHandle::new(),
            events: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// A handle that stops the loop before its next frame.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Events reported by directors during the most recent frame.
    pub fn last_events(&self) -> &[StageEvent] {
        &self.events
    }

    /// Check every occupancy invariant.  Cheap enough to call every frame
    /// in tests.
    pub fn audit(&self) -> SimResult<()> {
        self.agents.audit(&self.graph)?;
        Ok(())
    }

    /// Run from the current frame to `config.end_frame()`.
    ///
    /// Calls observer hooks at every frame boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        let remaining = self.config.end_frame().since(self.clock.current);
        self.drive(remaining, observer, &mut NullSurface)
    }

    /// Run exactly `n` frames from the current position (ignores
    /// `end_frame`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<RunOutcome> {
        self.drive(n, observer, &mut NullSurface)
    }

    /// [`run`](Self::run) with a draw pass over every agent after each frame.
    pub fn run_rendered<O: SimObserver, S: Surface>(
        &mut self,
        observer: &mut O,
        surface:  &mut S,
    ) -> SimResult<RunOutcome> {
        let remaining = self.config.end_frame().since(self.clock.current);
        self.drive(remaining, observer, surface)
    }

    /// Simulate one frame and return its summary.
    ///
    /// Never fails: contention leaves agents `Waiting`, a missing node is a
    /// no-op, and a stuck traveller falls back to `Idle`.
    pub fn step(&mut self) -> FrameSummary {
        let frame = self.clock.advance();
        self.events.clear();

        // ── Directors ─────────────────────────────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access.
        {
            let mut stage = Stage::new(frame, &mut self.graph, &mut self.agents, &mut self.rng);
            if let Some(pacer) = self.pacer.as_mut() {
                pacer.direct(&mut stage, &mut self.events);
            }
            self.ambient.direct(&mut stage, &mut self.events);
            if let Some(ritual) = self.ritual.as_mut() {
                ritual.direct(&mut stage, &mut self.events);
            }
        }

        // ── Agents ────────────────────────────────────────────────────────
        //
        // The procession goes first in queue order, leader first, so an
        // agent that frees a lane node this frame lets the one behind it
        // close up at once.  Everyone else follows in collection order.
        let speed = self.config.speed;
        let mut arrivals = 0;
        let queue: Vec<AgentId> = match self.ritual.as_ref() {
            Some(ritual) => ritual.queue().collect(),
            None => Vec::new(),
        };
        for &id in &queue {
            let Some(agent) = self.agents.get_mut(id) else { continue };
            if agent.update(&mut self.graph, speed).is_some() {
                arrivals += 1;
            }
            if let Some(ritual) = self.ritual.as_ref() {
                ritual.advance_follower(id, &mut self.agents, &self.graph);
            }
        }
        for index in 0..self.agents.len() {
            let id = AgentId::from_index(index);
            if queue.contains(&id) {
                continue;
            }
            let Some(agent) = self.agents.get_mut(id) else { continue };
            if agent.update(&mut self.graph, speed).is_some() {
                arrivals += 1;
            }
        }

        self.summarize(frame, arrivals)
    }

    // ── Loop ──────────────────────────────────────────────────────────────

    fn drive<O: SimObserver, S: Surface>(
        &mut self,
        frames:   u64,
        observer: &mut O,
        surface:  &mut S,
    ) -> SimResult<RunOutcome> {
        let start = self.clock.current;
        info!(
            from = %start,
            frames,
            agents = self.agents.len(),
            nodes = self.graph.node_count(),
            "simulation run starting"
        );

        let mut done = 0;
        let mut cancelled = false;
        while done < frames {
            if self.stop.is_stopped() {
                cancelled = true;
                break;
            }

            observer.on_frame_start(self.clock.current + 1);
            let summary = self.step();
            done += 1;

            for event in &self.events {
                observer.on_event(event);
            }
            observer.on_frame_end(&summary);

            let interval = self.config.snapshot_interval_frames;
            if interval > 0 && summary.frame.0.is_multiple_of(interval) {
                observer.on_snapshot(summary.frame, &self.agents, &self.graph);
            }

            surface.begin_frame(summary.frame);
            for agent in self.agents.iter() {
                surface.draw(&agent.sprite(), summary.frame);
            }
            surface.end_frame(summary.frame);
        }

        let final_frame = self.clock.current;
        surface.release();
        observer.on_sim_end(final_frame);

        let cycles = self.ritual.as_ref().map_or(0, RitualController::cycles);
        info!(%final_frame, frames = done, cancelled, cycles, "simulation run finished");

        Ok(RunOutcome { frames: done, final_frame, cancelled })
    }

    fn summarize(&self, frame: Frame, arrivals: usize) -> FrameSummary {
        let mut summary = FrameSummary {
            frame,
            phase:      self.ritual.as_ref().map(RitualController::phase),
            leader:     self.ritual.as_ref().and_then(RitualController::leader),
            arrivals,
            travelling: 0,
            waiting:    0,
            gesturing:  0,
            events:     self.events.len(),
        };
        for agent in self.agents.iter() {
            match agent.state {
                MotionState::Moving | MotionState::Walking => summary.travelling += 1,
                MotionState::Waiting => summary.waiting += 1,
                MotionState::Idle => {}
            }
            if agent.is_gesturing() {
                summary.gesturing += 1;
            }
        }
        summary
    }
}
