//! The tick producer seam.

use fw_core::{TelemetryRecord, Timestamp};
use fw_store::FleetState;

/// Source of one telemetry batch per tick.
///
/// Producers read the fleet (to know which vehicles exist) but never write
/// it; the [`TelemetryRunner`](crate::TelemetryRunner) applies the batch.
pub trait TickProducer {
    /// Produce the batch for this tick.  An empty batch is valid.
    fn produce(&mut self, fleet: &FleetState, now: Timestamp) -> Vec<TelemetryRecord>;

    /// Short label for logs.
    fn name(&self) -> &'static str {
        "producer"
    }
}

impl<P: TickProducer + ?Sized> TickProducer for Box<P> {
    fn produce(&mut self, fleet: &FleetState, now: Timestamp) -> Vec<TelemetryRecord> {
        (**self).produce(fleet, now)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
