//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentFrameRow, EventRow, FrameSummaryRow, OutputResult};

/// A sink for simulation trace rows.
///
/// The observer never propagates errors into the frame loop; they are stored
/// and retrieved with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of per-agent rows (one snapshot).
    fn write_agent_frames(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()>;

    /// Write one frame summary row.
    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Write one stage event row.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
