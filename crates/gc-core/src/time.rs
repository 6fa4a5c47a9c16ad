//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! complete evaluation of every agent: each agent moves at most one cell per
//! tick, so ticks double as the unit of movement.
//!
//! The mapping to wall-clock time only matters to interactive front-ends that
//! pace the loop; it is held in `SimClock` as a tick rate:
//!
//!   elapsed_secs = tick / tick_rate_hz
//!
//! The default rate is 10 Hz, a comfortable pace for watching a chase.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current tick plus the pacing rate used by interactive front-ends.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Ticks per real second when the loop is paced.  Never zero.
    pub tick_rate_hz: u32,
    /// The current tick - advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz: tick_rate_hz.max(1),
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed paced seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 / self.tick_rate_hz as f64
    }

    /// Real time one tick occupies when paced.
    #[inline]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s @ {} Hz)", self.current_tick, self.elapsed_secs(), self.tick_rate_hz)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate
/// (feature `serde`) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Tick budget for `Sim::run`.  The run ends earlier if an agent reaches
    /// the player.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical spawns.
    pub seed: u64,

    /// Emit a frame every N ticks.  1 = every tick.  Terminal ticks always
    /// emit a frame regardless.
    pub frame_interval_ticks: u64,

    /// Pacing rate for interactive front-ends.
    pub tick_rate_hz: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:          1_000,
            seed:                 42,
            frame_interval_ticks: 1,
            tick_rate_hz:         10,
        }
    }
}

impl SimConfig {
    /// The tick at which `run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_rate_hz)
    }

    /// Reject settings that would make the tick loop meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.frame_interval_ticks == 0 {
            return Err(CoreError::Config(
                "frame_interval_ticks must be at least 1".into(),
            ));
        }
        if self.tick_rate_hz == 0 {
            return Err(CoreError::Config("tick_rate_hz must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` if tick `t` is a regular frame tick.
    #[inline]
    pub fn is_frame_tick(&self, t: Tick) -> bool {
        self.frame_interval_ticks > 0 && t.0.is_multiple_of(self.frame_interval_ticks)
    }
}
