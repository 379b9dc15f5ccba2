//! The telemetry tick loop.
//!
//! # One tick
//!
//! ```text
//!   ① on_tick_start(tick)
//!   ② batch = producer.produce(&fleet, now)
//!   ③ for rec in batch: fleet.apply_telemetry(rec)   (failures skipped)
//!   ④ on_tick_end(report, &fleet)
//!   ⑤ on_snapshot(tick, now, &fleet)                 (every N ticks)
//!   ⑥ clock.advance()
//! ```
//!
//! A tick runs to completion inside one `&mut FleetState` borrow, so ticks
//! never overlap and readers only ever see whole batches.

use std::time::Duration;

use chrono::TimeDelta;
use fw_core::{TelemetryConfig, Tick, TickClock, Timestamp};
use fw_store::FleetState;
use tracing::{debug, info, warn};

use crate::{TelemetryError, TickObserver, TickProducer, TickReport};

pub struct TelemetryRunner<P: TickProducer> {
    producer:       P,
    clock:          TickClock,
    snapshot_every: u64,
}

impl<P: TickProducer> TelemetryRunner<P> {
    pub fn new(producer: P, interval: Duration, snapshot_every: u64) -> Self {
        Self { producer, clock: TickClock::new(interval), snapshot_every }
    }

    pub fn from_config(producer: P, cfg: &TelemetryConfig) -> Self {
        Self::new(producer, cfg.interval(), cfg.snapshot_interval_ticks)
    }

    #[inline]
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// The tick the next call to [`tick`](Self::tick) will run.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn producer(&self) -> &P {
        &self.producer
    }

    pub fn producer_mut(&mut self) -> &mut P {
        &mut self.producer
    }

    /// Run one tick at wall-clock instant `now`.
    pub fn tick<O: TickObserver>(&mut self, fleet: &mut FleetState, now: Timestamp, observer: &mut O) -> TickReport {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);

        let batch = self.producer.produce(fleet, now);
        let mut report = TickReport { tick, now, applied: 0, skipped: 0 };
        for record in &batch {
            match fleet.apply_telemetry(record) {
                Ok(()) => report.applied += 1,
                Err(source) => {
                    let err = TelemetryError::RecordRejected { vehicle: record.vehicle_id.clone(), source };
                    warn!(%tick, vehicle = %record.vehicle_id, %err, "skipping telemetry record");
                    report.skipped += 1;
                }
            }
        }
        debug!(
            %tick,
            producer = self.producer.name(),
            applied = report.applied,
            skipped = report.skipped,
            "tick applied"
        );

        observer.on_tick_end(&report, fleet);
        if tick.is_every(self.snapshot_every) {
            observer.on_snapshot(tick, now, fleet);
        }
        self.clock.advance();
        report
    }

    /// Run `n` ticks back to back.  Tick `i` is stamped
    /// `start + i * interval`.  Calls `on_run_end` once at the end.
    pub fn run_ticks<O: TickObserver>(
        &mut self,
        n:        u64,
        fleet:    &mut FleetState,
        start:    Timestamp,
        observer: &mut O,
    ) -> Vec<TickReport> {
        info!(ticks = n, producer = self.producer.name(), from = %self.clock.current_tick, "telemetry run started");
        let step = TimeDelta::from_std(self.clock.interval()).unwrap_or(TimeDelta::zero());
        let mut now = start;
        let mut reports = Vec::with_capacity(n.min(1 << 16) as usize);
        for _ in 0..n {
            reports.push(self.tick(fleet, now, observer));
            now = now.checked_add_signed(step).unwrap_or(now);
        }
        observer.on_run_end(self.clock.current_tick);
        info!(clock = %self.clock, "telemetry run finished");
        reports
    }
}
