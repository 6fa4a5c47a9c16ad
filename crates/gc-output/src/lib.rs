//! `gc-output` - run output writers for the gridchase engine.
//!
//! | Backend | Files created                                 |
//! |---------|-----------------------------------------------|
//! | CSV     | `agent_frames.csv`, `tick_summaries.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by [`FrameRecorder`],
//! which implements `gc_sim::FrameSink`.  Only frames the sim emits are
//! recorded, so `SimConfig::frame_interval_ticks` sets the sampling rate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gc_output::{CsvWriter, FrameRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut rec = FrameRecorder::new(writer);
//! sim.run(&mut rec)?;
//! if let Some(e) = rec.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod recorder;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use recorder::FrameRecorder;
pub use row::{AgentFrameRow, TickSummaryRow};
pub use writer::OutputWriter;
