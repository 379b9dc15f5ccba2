//! The critical ("red") list.
//!
//! A vehicle is critical if any of these hold:
//!
//! | Reason            | Condition                         |
//! |-------------------|-----------------------------------|
//! | `Overheating`     | `temperature_c > max_temperature_c` |
//! | `LowCharge`       | `soc < min_soc`                   |
//! | `Maintenance`     | `status == maintenance`           |
//!
//! Both comparisons are strict: a vehicle sitting exactly on a threshold is
//! not flagged.

use fw_core::{CriticalThresholds, VehicleId};
use fw_store::{FleetState, Vehicle, VehicleStatus};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalReason {
    Overheating,
    LowCharge,
    Maintenance,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalVehicle {
    pub vehicle_id:    VehicleId,
    pub soc:           f64,
    pub temperature_c: f64,
    pub status:        VehicleStatus,
    /// Every violated condition, in table order.  Never empty.
    pub reasons:       Vec<CriticalReason>,
}

/// Reasons `vehicle` is critical; empty if it is not.
pub fn critical_reasons(vehicle: &Vehicle, thresholds: &CriticalThresholds) -> Vec<CriticalReason> {
    let mut reasons = Vec::new();
    if vehicle.temperature_c > thresholds.max_temperature_c {
        reasons.push(CriticalReason::Overheating);
    }
    if vehicle.soc < thresholds.min_soc {
        reasons.push(CriticalReason::LowCharge);
    }
    if vehicle.status == VehicleStatus::Maintenance {
        reasons.push(CriticalReason::Maintenance);
    }
    reasons
}

#[inline]
pub fn is_critical(vehicle: &Vehicle, thresholds: &CriticalThresholds) -> bool {
    !critical_reasons(vehicle, thresholds).is_empty()
}

/// Critical vehicles in store order.
pub fn critical_list(fleet: &FleetState, thresholds: &CriticalThresholds) -> Vec<CriticalVehicle> {
    fleet
        .vehicles()
        .iter()
        .filter_map(|v| {
            let reasons = critical_reasons(v, thresholds);
            (!reasons.is_empty()).then(|| CriticalVehicle {
                vehicle_id:    v.id.clone(),
                soc:           v.soc,
                temperature_c: v.temperature_c,
                status:        v.status,
                reasons,
            })
        })
        .collect()
}

/// Number of critical vehicles, without building the list.
pub fn critical_count(fleet: &FleetState, thresholds: &CriticalThresholds) -> usize {
    fleet.vehicles().iter().filter(|v| is_critical(v, thresholds)).count()
}
