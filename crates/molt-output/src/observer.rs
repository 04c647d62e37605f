//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use molt_agent::AgentStore;
use molt_core::{Frame, SimConfig};
use molt_graph::PathGraph;
use molt_ritual::StageEvent;
use molt_sim::{FrameSummary, SimObserver};

use crate::row::{AgentFrameRow, EventRow, FrameSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots, frame summaries, and stage
/// events to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    frames_per_sec: u32,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// frame-to-seconds conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            frames_per_sec: config.frames_per_sec,
            last_error:     None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn elapsed_secs(&self, frame: Frame) -> f64 {
        if self.frames_per_sec == 0 {
            return 0.0;
        }
        frame.0 as f64 / self.frames_per_sec as f64
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "trace output failed; further errors suppressed");
                self.last_error = Some(e);
            }
        }
    }
}

/// Flatten a director event into a row.
pub(crate) fn event_row(event: &StageEvent) -> EventRow {
    let frame = event.frame().0;
    match *event {
        StageEvent::Phase(change) => EventRow {
            frame,
            kind:   "phase",
            agent:  change.leader.0,
            detail: format!("{}->{}", change.from, change.to),
        },
        StageEvent::Rotated { finished, next, .. } => EventRow {
            frame,
            kind:   "rotated",
            agent:  finished.0,
            detail: format!("next={next}"),
        },
        StageEvent::GestureStarted { agent, .. } => EventRow {
            frame,
            kind:   "gesture",
            agent:  agent.0,
            detail: String::new(),
        },
        StageEvent::PacerTurned { agent, .. } => EventRow {
            frame,
            kind:   "pacer",
            agent:  agent.0,
            detail: String::new(),
        },
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, event: &StageEvent) {
        let result = self.writer.write_event(&event_row(event));
        self.store_err(result);
    }

    fn on_frame_end(&mut self, summary: &FrameSummary) {
        let row = FrameSummaryRow {
            frame:        summary.frame.0,
            elapsed_secs: self.elapsed_secs(summary.frame),
            phase:        summary.phase.map_or("", |p| p.as_str()),
            leader:       summary.leader.map(|l| l.0),
            arrivals:     summary.arrivals as u64,
            travelling:   summary.travelling as u64,
            waiting:      summary.waiting as u64,
            gesturing:    summary.gesturing as u64,
            events:       summary.events as u64,
        };
        let result = self.writer.write_frame_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore, graph: &PathGraph) {
        let rows: Vec<AgentFrameRow> = agents
            .iter()
            .map(|agent| AgentFrameRow {
                agent_id:  agent.id.0,
                frame:     frame.0,
                role:      agent.role.as_str(),
                x:         agent.pos.x,
                y:         agent.pos.y,
                state:     agent.state.as_str(),
                node:      agent.current_node.map(|n| graph.key_of(n).to_owned()).unwrap_or_default(),
                claws_out: agent.claws_out,
                gesturing: agent.is_gesturing(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_agent_frames(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_frame: Frame) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
