//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_frames.csv`
//! - `frame_summaries.csv`
//! - `stage_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentFrameRow, EventRow, FrameSummaryRow, OutputResult};

pub const AGENT_FRAMES_FILE: &str = "agent_frames.csv";
pub const FRAME_SUMMARIES_FILE: &str = "frame_summaries.csv";
pub const STAGE_EVENTS_FILE: &str = "stage_events.csv";

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    agents:    Writer<File>,
    summaries: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the CSV files in `dir` (truncating existing ones) and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut agents = Writer::from_path(dir.join(AGENT_FRAMES_FILE))?;
        agents.write_record([
            "agent_id", "frame", "role", "x", "y", "state", "node", "claws_out", "gesturing",
        ])?;

        let mut summaries = Writer::from_path(dir.join(FRAME_SUMMARIES_FILE))?;
        summaries.write_record([
            "frame", "elapsed_secs", "phase", "leader", "arrivals", "travelling", "waiting",
            "gesturing", "events",
        ])?;

        let mut events = Writer::from_path(dir.join(STAGE_EVENTS_FILE))?;
        events.write_record(["frame", "kind", "agent", "detail"])?;

        Ok(Self { agents, summaries, events, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agent_frames(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.agent_id.to_string(),
                row.frame.to_string(),
                row.role.to_owned(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.state.to_owned(),
                row.node.clone(),
                (row.claws_out as u8).to_string(),
                (row.gesturing as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            format!("{:.3}", row.elapsed_secs),
            row.phase.to_owned(),
            row.leader.map(|l| l.to_string()).unwrap_or_default(),
            row.arrivals.to_string(),
            row.travelling.to_string(),
            row.waiting.to_string(),
            row.gesturing.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.frame.to_string(),
            row.kind.to_owned(),
            row.agent.to_string(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
