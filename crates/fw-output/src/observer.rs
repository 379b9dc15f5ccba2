//! `TelemetryOutputObserver<W>`: bridges `TickObserver` to an `OutputWriter`.

use fw_aggregate::critical_count;
use fw_core::{CriticalThresholds, Tick, Timestamp};
use fw_store::FleetState;
use fw_telemetry::{TickObserver, TickReport};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TickObserver`] that writes vehicle snapshots and tick summaries to
/// any [`OutputWriter`] backend.
///
/// Observer callbacks return nothing, so write errors are kept internally.
/// Check with [`take_error`][Self::take_error] once the run is over.
pub struct TelemetryOutputObserver<W: OutputWriter> {
    writer:     W,
    thresholds: CriticalThresholds,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TelemetryOutputObserver<W> {
    /// `thresholds` decide the `critical` column of each tick summary.
    pub fn new(writer: W, thresholds: CriticalThresholds) -> Self {
        Self { writer, thresholds, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "telemetry output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TickObserver for TelemetryOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport, fleet: &FleetState) {
        let row = TickSummaryRow {
            tick:           report.tick.0,
            unix_time_secs: report.now.timestamp(),
            applied:        report.applied as u64,
            skipped:        report.skipped as u64,
            critical:       critical_count(fleet, &self.thresholds) as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, now: Timestamp, fleet: &FleetState) {
        let rows: Vec<VehicleSnapshotRow> = fleet
            .vehicles()
            .iter()
            .map(|v| VehicleSnapshotRow {
                tick:           tick.0,
                unix_time_secs: now.timestamp(),
                vehicle_id:     v.id.as_str().to_owned(),
                status:         v.status.as_str(),
                soc:            v.soc,
                temperature_c:  v.temperature_c,
                odometer_km:    v.odometer_km,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
