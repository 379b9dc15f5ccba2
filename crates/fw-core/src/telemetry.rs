//! Telemetry record types shared by tick producers and the fleet store.

use serde::{Deserialize, Serialize};

use crate::{Timestamp, VehicleId};

/// How a telemetry field changes: relative to its current value, or set.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Delta(f64),
    Absolute(f64),
}

impl FieldUpdate {
    /// The unclamped value after applying this update to `current`.
    #[inline]
    pub fn resolve(self, current: f64) -> f64 {
        match self {
            FieldUpdate::Delta(d)    => current + d,
            FieldUpdate::Absolute(v) => v,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        match self {
            FieldUpdate::Delta(v) | FieldUpdate::Absolute(v) => v.is_finite(),
        }
    }

    #[inline]
    pub fn is_absolute(self) -> bool {
        matches!(self, FieldUpdate::Absolute(_))
    }
}

/// One vehicle's mutation within a tick batch.
///
/// `None` leaves the field untouched; `last_update` is stamped with
/// `timestamp` regardless.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    pub vehicle_id:  VehicleId,
    pub soc:         Option<FieldUpdate>,
    pub temperature: Option<FieldUpdate>,
    pub timestamp:   Timestamp,
}

impl TelemetryRecord {
    /// Record perturbing both fields by the given deltas.
    pub fn delta(vehicle_id: VehicleId, soc: f64, temperature: f64, timestamp: Timestamp) -> Self {
        Self {
            vehicle_id,
            soc:         Some(FieldUpdate::Delta(soc)),
            temperature: Some(FieldUpdate::Delta(temperature)),
            timestamp,
        }
    }

    /// Record setting both fields to measured values.
    pub fn absolute(vehicle_id: VehicleId, soc: f64, temperature: f64, timestamp: Timestamp) -> Self {
        Self {
            vehicle_id,
            soc:         Some(FieldUpdate::Absolute(soc)),
            temperature: Some(FieldUpdate::Absolute(temperature)),
            timestamp,
        }
    }
}
