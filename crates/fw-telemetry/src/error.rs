use fw_core::{FleetError, VehicleId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("telemetry record for {vehicle} rejected: {source}")]
    RecordRejected {
        vehicle: VehicleId,
        source:  FleetError,
    },

    #[error("live feed is closed")]
    FeedClosed,
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
