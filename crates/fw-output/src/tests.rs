//! Unit tests for fw-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_FILE, SUMMARY_FILE};
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(seq: u32, tick: u64) -> VehicleSnapshotRow {
        VehicleSnapshotRow {
            tick,
            unix_time_secs: 1_700_000_000 + tick as i64 * 5,
            vehicle_id:     format!("EV-{seq:03}"),
            status:         "idle",
            soc:            55.123,
            temperature_c:  30.0,
            odometer_km:    1234.56,
        }
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["tick", "unix_time_secs", "vehicle_id", "status", "soc", "temperature_c", "odometer_km"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "unix_time_secs", "applied", "skipped", "critical"]);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("today");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join(SNAPSHOT_FILE).exists());
    }

    #[test]
    fn snapshot_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(1, 4), snap_row(2, 4)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "1700000020");
        assert_eq!(&rows[0][2], "EV-001");
        assert_eq!(&rows[0][3], "idle");
        assert_eq!(&rows[0][4], "55.12");
        assert_eq!(&rows[0][6], "1234.6");
        assert_eq!(&rows[1][2], "EV-002");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 3, unix_time_secs: 15, applied: 6, skipped: 1, critical: 2 })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["3", "15", "6", "1", "2"]);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use std::time::Duration;

    use chrono::TimeZone;
    use fw_core::{CriticalThresholds, TelemetryRecord, Timestamp};
    use fw_store::{demo_fleet, FieldLimits, FleetState};
    use fw_telemetry::{TelemetryRunner, TickObserver, TickProducer};
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_FILE, SUMMARY_FILE};
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult, TelemetryOutputObserver};

    fn t0() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    /// Produces nothing, so the seeded values stay put.
    struct Quiet;

    impl TickProducer for Quiet {
        fn produce(&mut self, _fleet: &FleetState, _now: Timestamp) -> Vec<TelemetryRecord> {
            Vec::new()
        }
    }

    /// Fails every snapshot write with a distinct message.
    #[derive(Default)]
    struct Failing {
        calls:    u32,
        finished: u32,
    }

    impl OutputWriter for Failing {
        fn write_snapshots(&mut self, _rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full #{}", self.calls))))
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn run_writes_snapshots_and_summaries() {
        let dir = TempDir::new().unwrap();
        let mut fleet = demo_fleet(FieldLimits::default(), t0());
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TelemetryOutputObserver::new(writer, CriticalThresholds::default());
        let mut runner = TelemetryRunner::new(Quiet, Duration::from_secs(5), 2);
        runner.run_ticks(5, &mut fleet, t0(), &mut obs);
        assert!(obs.take_error().is_none());

        // snapshots at ticks 0, 2, 4 × 6 vehicles
        let mut rdr = csv::Reader::from_path(dir.path().join(SNAPSHOT_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 18);
        assert_eq!(&rows[6][0], "2");
        assert_eq!(&rows[6][1], (t0().timestamp() + 10).to_string());

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        // EV-003 low charge, EV-004 overheating, EV-005 in maintenance
        assert!(rows.iter().all(|r| &r[4] == "3"));
        assert_eq!(&rows[4][0], "4");
    }

    #[test]
    fn first_error_is_kept() {
        let fleet = demo_fleet(FieldLimits::default(), t0());
        let mut obs = TelemetryOutputObserver::new(Failing::default(), CriticalThresholds::default());
        obs.on_snapshot(fw_core::Tick(0), t0(), &fleet);
        obs.on_snapshot(fw_core::Tick(1), t0(), &fleet);
        obs.on_run_end(fw_core::Tick(2));

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("#1"), "{err}");
        assert!(obs.take_error().is_none());
        let writer = obs.into_writer();
        assert_eq!((writer.calls, writer.finished), (2, 1));
    }

    #[test]
    fn empty_fleet_writes_no_snapshot_batch() {
        let fleet = FleetState::default();
        let mut obs = TelemetryOutputObserver::new(Failing::default(), CriticalThresholds::default());
        obs.on_snapshot(fw_core::Tick(0), t0(), &fleet);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.writer().calls, 0);
    }
}
