//! Plain data row types written by output backends.

/// One vehicle's telemetry at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub vehicle_id:     String,
    /// Lowercase status name, e.g. `"charging"`.
    pub status:         &'static str,
    pub soc:            f64,
    pub temperature_c:  f64,
    pub odometer_km:    f64,
}

/// Counters for one telemetry tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub applied:        u64,
    pub skipped:        u64,
    /// Vehicles critical after the tick was applied.
    pub critical:       u64,
}
