//! `FrameRecorder<W>` - bridges `FrameSink` to an `OutputWriter`.

use log::warn;

use gc_core::Tick;
use gc_sim::{Frame, FrameSink};

use crate::row::{AgentFrameRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`FrameSink`] that writes agent rows and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `FrameSink` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct FrameRecorder<W: OutputWriter> {
    writer:     W,
    frames:     u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> FrameRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames:     0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Frames handed to the writer so far.
    pub fn frames_recorded(&self) -> u64 {
        self.frames
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> FrameSink for FrameRecorder<W> {
    fn on_frame(&mut self, frame: &Frame<'_>) {
        let tick = frame.tick.0;
        let rows: Vec<AgentFrameRow> = frame.agents
            .iter()
            .map(|a| AgentFrameRow {
                tick,
                agent_id:        a.agent.0,
                row:             a.cell.row,
                col:             a.cell.col,
                route_remaining: count(a.remaining.len()),
            })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_agent_frames(&rows);
            self.store_err(result);
        }

        let summary = TickSummaryRow {
            tick,
            player_row: frame.player.row,
            player_col: frame.player.col,
            agents:     count(frame.agents.len()),
            replans:    count(frame.replans),
        };
        let result = self.writer.write_tick_summary(&summary);
        self.store_err(result);
        self.frames += 1;
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Widen a count for a row field.  Saturates on targets where `usize` is
/// wider than 64 bits.
#[inline]
pub(crate) fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
