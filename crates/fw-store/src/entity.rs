//! Entity records, their status enums, creation payloads, and patches.
//!
//! Cross-entity links are identifiers only.  `Vehicle::assigned_driver` and
//! `Driver::assigned_vehicle` are kept in agreement by the coordinator in
//! [`assign`](crate::assign); nothing outside this crate can write them.

use std::fmt;

use fw_core::{DriverId, EntityKind, LatLng, RouteId, StationId, Timestamp, VehicleId};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Generate `as_str`, `ALL`, and `Display` for a fieldless status enum.
macro_rules! status_strings {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $s),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ── Statuses ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Charging,
    #[default]
    Idle,
    Moving,
    Maintenance,
}

status_strings!(VehicleStatus {
    Charging    => "charging",
    Idle        => "idle",
    Moving      => "moving",
    Maintenance => "maintenance",
});

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    #[default]
    Available,
    /// Every port is occupied.  Older feeds call this `charging`.
    #[serde(alias = "charging")]
    InUse,
    Offline,
}

status_strings!(StationStatus {
    Available => "available",
    InUse     => "in_use",
    Offline   => "offline",
});

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Active,
    Completed,
    #[default]
    Scheduled,
}

status_strings!(RouteStatus {
    Active    => "active",
    Completed => "completed",
    Scheduled => "scheduled",
});

// ── Vehicle ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id:                   VehicleId,
    pub model:                String,
    pub license_plate:        String,
    pub status:               VehicleStatus,
    pub battery_capacity_kwh: f64,
    /// State of charge, percent.
    pub soc:                  f64,
    /// State of health, percent.
    pub soh:                  f64,
    pub odometer_km:          f64,
    /// Written only by the coordinator.
    pub assigned_driver:      Option<DriverId>,
    pub location:             LatLng,
    pub temperature_c:        f64,
    pub last_update:          Timestamp,
}

impl Vehicle {
    /// Energy drawn from a full battery, in kWh.
    #[inline]
    pub fn energy_consumed_kwh(&self) -> f64 {
        self.battery_capacity_kwh * (100.0 - self.soc) / 100.0
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;
    const KIND: EntityKind = EntityKind::Vehicle;
    fn id(&self) -> &VehicleId {
        &self.id
    }
}

/// Payload for [`FleetState::add_vehicle`](crate::FleetState::add_vehicle).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub model:                String,
    pub license_plate:        String,
    pub battery_capacity_kwh: f64,
    pub location:             LatLng,
}

/// Partial update for a vehicle.  `None` fields are left untouched.
///
/// The driver link is not patchable; use the coordinator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehiclePatch {
    pub model:                Option<String>,
    pub license_plate:        Option<String>,
    pub status:               Option<VehicleStatus>,
    pub battery_capacity_kwh: Option<f64>,
    pub soc:                  Option<f64>,
    pub soh:                  Option<f64>,
    pub odometer_km:          Option<f64>,
    pub location:             Option<LatLng>,
    pub temperature_c:        Option<f64>,
    pub last_update:          Option<Timestamp>,
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id:                DriverId,
    pub full_name:         String,
    pub phone:             String,
    pub license_number:    String,
    /// Written only by the coordinator.
    pub assigned_vehicle:  Option<VehicleId>,
    pub safety_score:      f64,
    pub efficiency_rating: f64,
    pub total_trips:       u32,
    pub join_date:         Timestamp,
}

impl Entity for Driver {
    type Id = DriverId;
    const KIND: EntityKind = EntityKind::Driver;
    fn id(&self) -> &DriverId {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub full_name:      String,
    pub phone:          String,
    pub license_number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverPatch {
    pub full_name:         Option<String>,
    pub phone:             Option<String>,
    pub license_number:    Option<String>,
    pub safety_score:      Option<f64>,
    pub efficiency_rating: Option<f64>,
    pub total_trips:       Option<u32>,
}

// ── ChargingStation ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    pub id:              StationId,
    pub name:            String,
    pub location:        LatLng,
    pub status:          StationStatus,
    pub total_ports:     u32,
    /// Always `<= total_ports`.
    pub available_ports: u32,
    pub power_output_kw: f64,
    pub cost_per_kwh:    f64,
}

impl ChargingStation {
    /// `true` if a vehicle could plug in right now.
    #[inline]
    pub fn has_free_port(&self) -> bool {
        self.status != StationStatus::Offline && self.available_ports > 0
    }
}

impl Entity for ChargingStation {
    type Id = StationId;
    const KIND: EntityKind = EntityKind::Station;
    fn id(&self) -> &StationId {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStation {
    pub name:            String,
    pub location:        LatLng,
    pub total_ports:     u32,
    pub power_output_kw: f64,
    pub cost_per_kwh:    f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StationPatch {
    pub name:            Option<String>,
    pub location:        Option<LatLng>,
    pub status:          Option<StationStatus>,
    pub total_ports:     Option<u32>,
    pub available_ports: Option<u32>,
    pub power_output_kw: Option<f64>,
    pub cost_per_kwh:    Option<f64>,
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id:                     RouteId,
    pub name:                   String,
    pub status:                 RouteStatus,
    /// One-way reference; vehicles do not point back at routes.
    pub assigned_vehicle:       Option<VehicleId>,
    pub start:                  LatLng,
    pub end:                    LatLng,
    pub waypoints:              Vec<LatLng>,
    pub distance_km:            f64,
    pub estimated_duration_min: u32,
    pub estimated_energy_kwh:   Option<f64>,
}

impl Entity for Route {
    type Id = RouteId;
    const KIND: EntityKind = EntityKind::Route;
    fn id(&self) -> &RouteId {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoute {
    pub name:                   String,
    pub assigned_vehicle:       Option<VehicleId>,
    pub start:                  LatLng,
    pub end:                    LatLng,
    #[serde(default)]
    pub waypoints:              Vec<LatLng>,
    pub distance_km:            f64,
    pub estimated_duration_min: u32,
    #[serde(default)]
    pub estimated_energy_kwh:   Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutePatch {
    pub name:                   Option<String>,
    pub status:                 Option<RouteStatus>,
    /// `Some(None)` detaches the vehicle.
    pub assigned_vehicle:       Option<Option<VehicleId>>,
    pub start:                  Option<LatLng>,
    pub end:                    Option<LatLng>,
    pub waypoints:              Option<Vec<LatLng>>,
    pub distance_km:            Option<f64>,
    pub estimated_duration_min: Option<u32>,
    pub estimated_energy_kwh:   Option<f64>,
}
