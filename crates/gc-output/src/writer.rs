//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentFrameRow, OutputResult, TickSummaryRow};

/// Trait implemented by output backends.
///
/// Errors surface through [`FrameRecorder::take_error`][crate::FrameRecorder::take_error]
/// since sink callbacks return nothing.
pub trait OutputWriter {
    /// Write one frame's worth of agent rows.
    fn write_agent_frames(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent - safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
