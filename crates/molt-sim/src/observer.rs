//! Simulation observer trait for progress reporting and data collection.

use molt_agent::AgentStore;
use molt_core::{AgentId, Frame};
use molt_graph::PathGraph;
use molt_ritual::{RitualPhase, StageEvent};

/// Per-frame counters handed to [`SimObserver::on_frame_end`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameSummary {
    pub frame: Frame,
    /// Ritual phase after the frame; `None` without a procession.
    pub phase: Option<RitualPhase>,
    pub leader: Option<AgentId>,
    /// Agents that completed a node move this frame.
    pub arrivals: usize,
    /// Agents `Moving` or `Walking` after the frame.
    pub travelling: usize,
    pub waiting: usize,
    pub gesturing: usize,
    /// Stage events reported by directors this frame.
    pub events: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: phase logger
///
/// ```rust,ignore
/// struct PhaseLog;
///
/// impl SimObserver for PhaseLog {
///     fn on_event(&mut self, event: &StageEvent) {
///         if let StageEvent::Phase(change) = event {
///             println!("{}: {} → {}", change.frame, change.from, change.to);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each frame, before any processing.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called for each event directors reported this frame, in order, after
    /// all agents have moved.
    fn on_event(&mut self, _event: &StageEvent) {}

    /// Called at the end of each frame.
    fn on_frame_end(&mut self, _summary: &FrameSummary) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_frames`
    /// frames) with read-only access to the full agent and graph state.
    fn on_snapshot(&mut self, _frame: Frame, _agents: &AgentStore, _graph: &PathGraph) {}

    /// Called once when the loop exits, whether it finished or was stopped.
    fn on_sim_end(&mut self, _final_frame: Frame) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
