//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_frames.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentFrameRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub const AGENT_FRAMES_FILE: &str = "agent_frames.csv";
pub const TICK_SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    frames:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it
    /// and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut frames = Writer::from_path(dir.join(AGENT_FRAMES_FILE))?;
        frames.write_record(["tick", "agent_id", "row", "col", "route_remaining"])?;

        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARIES_FILE))?;
        summaries.write_record(["tick", "player_row", "player_col", "agents", "replans"])?;

        Ok(Self {
            frames,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agent_frames(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()> {
        for row in rows {
            self.frames.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.route_remaining.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.player_row.to_string(),
            row.player_col.to_string(),
            row.agents.to_string(),
            row.replans.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
