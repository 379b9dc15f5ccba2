//! `fw-output`: telemetry export for the fleetwatch engine.
//!
//! | Backend | Files created                                   |
//! |---------|-------------------------------------------------|
//! | CSV     | `vehicle_snapshots.csv`, `tick_summaries.csv`   |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`TelemetryOutputObserver`], which implements
//! `fw_telemetry::TickObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fw_output::{CsvWriter, TelemetryOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TelemetryOutputObserver::new(writer, config.critical);
//! runner.run_ticks(100, &mut fleet, Utc::now(), &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TelemetryOutputObserver;
pub use row::{TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
