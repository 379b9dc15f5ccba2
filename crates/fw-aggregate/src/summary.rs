//! Fleet-wide summary.

use fw_store::{FleetState, VehicleStatus};
use serde::Serialize;

/// Count of vehicles per status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VehicleStatusCounts {
    pub charging:    usize,
    pub idle:        usize,
    pub moving:      usize,
    pub maintenance: usize,
}

impl VehicleStatusCounts {
    pub fn get(&self, status: VehicleStatus) -> usize {
        match status {
            VehicleStatus::Charging    => self.charging,
            VehicleStatus::Idle        => self.idle,
            VehicleStatus::Moving      => self.moving,
            VehicleStatus::Maintenance => self.maintenance,
        }
    }

    fn bump(&mut self, status: VehicleStatus) {
        match status {
            VehicleStatus::Charging    => self.charging += 1,
            VehicleStatus::Idle        => self.idle += 1,
            VehicleStatus::Moving      => self.moving += 1,
            VehicleStatus::Maintenance => self.maintenance += 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_vehicles:    usize,
    /// Vehicles not in maintenance.
    pub active_vehicles:   usize,
    pub by_status:         VehicleStatusCounts,
    /// Sum of odometers, km.
    pub total_distance_km: f64,
    /// Σ capacity × (100 − SOC) / 100, kWh.
    pub total_energy_kwh:  f64,
    pub avg_temperature_c: f64,
    pub avg_soc:           f64,
    pub avg_soh:           f64,
}

/// Recompute the summary from scratch.  Averages of an empty fleet are `0.0`.
pub fn fleet_summary(fleet: &FleetState) -> FleetSummary {
    let mut s = FleetSummary::default();
    let mut temp_sum = 0.0;
    let mut soc_sum = 0.0;
    let mut soh_sum = 0.0;

    for v in fleet.vehicles() {
        s.total_vehicles += 1;
        s.by_status.bump(v.status);
        s.total_distance_km += v.odometer_km;
        s.total_energy_kwh += v.energy_consumed_kwh();
        temp_sum += v.temperature_c;
        soc_sum += v.soc;
        soh_sum += v.soh;
    }
    s.active_vehicles = s.total_vehicles - s.by_status.maintenance;

    if s.total_vehicles > 0 {
        let n = s.total_vehicles as f64;
        s.avg_temperature_c = temp_sum / n;
        s.avg_soc = soc_sum / n;
        s.avg_soh = soh_sum / n;
    }
    s
}
