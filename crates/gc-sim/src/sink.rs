//! Frame sink trait for rendering and data collection.

use gc_core::{AgentId, Cell, Tick};
use gc_spatial::Path;

/// Static start/goal pair a front-end may want drawn on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: Cell,
    pub goal:  Cell,
}

/// One agent's state in a [`Frame`].
#[derive(Debug, Clone, Copy)]
pub struct AgentFrame<'a> {
    pub agent:     AgentId,
    pub cell:      Cell,
    /// Cells still ahead on the agent's cached route.
    pub remaining: &'a [Cell],
    /// The agent's most recent search result, if it has searched yet.
    pub path:      Option<&'a Path>,
}

/// Everything a renderer needs to draw one tick.
///
/// Borrowed from the sim; copy out whatever must outlive the callback.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub tick:    Tick,
    pub player:  Cell,
    pub markers: Option<Markers>,
    /// Live agents in registration order.
    pub agents:  Vec<AgentFrame<'a>>,
    /// Searches run during this tick.
    pub replans: usize,
}

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example - progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl FrameSink for ProgressPrinter {
///     fn on_frame(&mut self, frame: &Frame<'_>) {
///         println!("{}: player at {}, {} replans", frame.tick, frame.player, frame.replans);
///     }
/// }
/// ```
pub trait FrameSink {
    /// Called at the very start of each tick, before any agent moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after all agents moved, every `config.frame_interval_ticks`
    /// ticks and on any tick that ends the pursuit.
    fn on_frame(&mut self, _frame: &Frame<'_>) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_frame(&mut self, frame: &Frame<'_>) {
        (**self).on_frame(frame);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        (**self).on_run_end(final_tick);
    }
}

/// A [`FrameSink`] that does nothing.
pub struct NoopSink;

impl FrameSink for NoopSink {}
