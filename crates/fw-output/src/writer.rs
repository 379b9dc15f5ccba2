//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Sink for telemetry rows.
///
/// Errors surface through [`TelemetryOutputObserver::take_error`](crate::TelemetryOutputObserver::take_error)
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
