//! Tick observer trait for progress reporting and data collection.

use fw_core::{Tick, Timestamp};
use fw_store::FleetState;

/// Outcome of one applied tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:    Tick,
    /// Wall-clock instant the tick ran at.
    pub now:     Timestamp,
    /// Records written to the fleet.
    pub applied: usize,
    /// Records rejected (unknown vehicle, non-finite value).
    pub skipped: usize,
}

/// Callbacks invoked by [`TelemetryRunner`](crate::TelemetryRunner) around
/// each tick.
///
/// All methods have default no-op implementations.
///
/// # Example: skip counter
///
/// ```rust,ignore
/// struct SkipCounter(usize);
///
/// impl TickObserver for SkipCounter {
///     fn on_tick_end(&mut self, report: &TickReport, _fleet: &FleetState) {
///         self.0 += report.skipped;
///     }
/// }
/// ```
pub trait TickObserver {
    /// Called before the producer runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the batch is applied, with the updated fleet.
    fn on_tick_end(&mut self, _report: &TickReport, _fleet: &FleetState) {}

    /// Called every `snapshot_interval_ticks` ticks, after `on_tick_end`.
    fn on_snapshot(&mut self, _tick: Tick, _now: Timestamp, _fleet: &FleetState) {}

    /// Called once by [`run_ticks`](crate::TelemetryRunner::run_ticks) after
    /// the last tick.  `final_tick` is the next tick that would run.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`TickObserver`] that does nothing.
pub struct NoopObserver;

impl TickObserver for NoopObserver {}

impl<O: TickObserver + ?Sized> TickObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_tick_end(&mut self, report: &TickReport, fleet: &FleetState) {
        (**self).on_tick_end(report, fleet);
    }

    fn on_snapshot(&mut self, tick: Tick, now: Timestamp, fleet: &FleetState) {
        (**self).on_snapshot(tick, now, fleet);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        (**self).on_run_end(final_tick);
    }
}
