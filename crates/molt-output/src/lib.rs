//! `molt-output` — simulation trace writers for the molt_sim framework.
//!
//! One backend is provided:
//!
//! | Backend | Files created                                                     |
//! |---------|-------------------------------------------------------------------|
//! | CSV     | `agent_frames.csv`, `frame_summaries.csv`, `stage_events.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `molt_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use molt_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentFrameRow, EventRow, FrameSummaryRow};
pub use writer::OutputWriter;
