//! Tick counter and tick clock.
//!
//! # Design
//!
//! Telemetry is applied in discrete ticks.  `Tick` is a monotonically
//! increasing counter; `TickClock` pairs it with the configured wall-clock
//! interval:
//!
//!   elapsed = tick * interval
//!
//! Entity timestamps (`last_update`, `join_date`) are real UTC instants
//! ([`Timestamp`]); the caller supplies `now` so runs stay reproducible in
//! tests.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// UTC instant used for entity timestamps.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute telemetry tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// `true` if this tick falls on an `every`-tick boundary.  `every == 0`
    /// never matches.
    #[inline]
    pub fn is_every(self, every: u64) -> bool {
        every > 0 && self.0.is_multiple_of(every)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick and the interval between ticks.
#[derive(Clone, Debug)]
pub struct TickClock {
    interval:         Duration,
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wall-clock time covered by the ticks completed so far.
    pub fn elapsed(&self) -> Duration {
        self.interval.saturating_mul(self.current_tick.0.min(u32::MAX as u64) as u32)
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed().as_secs();
        write!(f, "{} (+{:02}:{:02}:{:02})", self.current_tick, secs / 3_600, (secs % 3_600) / 60, secs % 60)
    }
}
