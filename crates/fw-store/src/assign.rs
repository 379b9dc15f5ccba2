//! Assignment coordinator: driver ↔ vehicle links and entity creation.
//!
//! # Link invariant
//!
//! For every vehicle `v` and driver `d`:
//!
//! ```text
//! v.assigned_driver == Some(d.id)  ⇔  d.assigned_vehicle == Some(v.id)
//! ```
//!
//! Both sides are written by [`link`](FleetState::link) and cleared by
//! `unlink_*` inside a single `&mut FleetState` call, so the invariant holds
//! between any two public operations.
//!
//! # Exclusivity
//!
//! Assignment is exclusive.  Assigning `d` to `v` evicts whichever driver
//! previously held `v` and whichever vehicle `d` previously held; those
//! entities end up unassigned.

use fw_core::{DriverId, FleetResult, RouteId, StationId, Timestamp, VehicleId};
use tracing::{debug, info, warn};

use crate::entity::{
    ChargingStation, Driver, NewDriver, NewRoute, NewStation, NewVehicle, Route, RouteStatus,
    StationStatus, Vehicle, VehicleStatus,
};
use crate::FleetState;

// ── IdSequences ───────────────────────────────────────────────────────────────

/// Highest sequence number seen per collection.
///
/// New ids are `highest + 1`.  Counters only grow, so an id freed by a
/// removal is never handed out again until the counter reaches `u32::MAX`.
/// From then on the lowest free sequence number is reused.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdSequences {
    vehicle: u32,
    driver:  u32,
    station: u32,
    route:   u32,
}

impl IdSequences {
    pub(crate) fn observe_vehicle(&mut self, id: &VehicleId) {
        self.vehicle = self.vehicle.max(id.seq().unwrap_or(0));
    }

    pub(crate) fn observe_driver(&mut self, id: &DriverId) {
        self.driver = self.driver.max(id.seq().unwrap_or(0));
    }

    pub(crate) fn observe_station(&mut self, id: &StationId) {
        self.station = self.station.max(id.seq().unwrap_or(0));
    }

    pub(crate) fn observe_route(&mut self, id: &RouteId) {
        self.route = self.route.max(id.seq().unwrap_or(0));
    }
}

/// Advance `counter` until `make(counter)` is not taken.  Once the counter
/// is exhausted, scan up from 1 instead.
fn next_free<Id>(counter: &mut u32, make: fn(u32) -> Id, taken: impl Fn(&Id) -> bool) -> Id {
    while let Some(next) = counter.checked_add(1) {
        *counter = next;
        let id = make(next);
        if !taken(&id) {
            return id;
        }
    }
    warn!("id sequence exhausted, reusing the lowest free number");
    // Fewer than u32::MAX ids are ever live, so the scan ends.
    let mut seq = 1u32;
    loop {
        let id = make(seq);
        if !taken(&id) {
            return id;
        }
        seq = seq.wrapping_add(1);
    }
}

// ── Coordinator operations ────────────────────────────────────────────────────

impl FleetState {
    /// Assign `driver_id` to `vehicle_id`.
    ///
    /// Fails with `NotFound` if either id is unknown; nothing is changed in
    /// that case.  Re-assigning an existing pair is a no-op.
    pub fn assign(&mut self, driver_id: &DriverId, vehicle_id: &VehicleId) -> FleetResult<()> {
        self.drivers.require(driver_id)?;
        self.vehicles.require(vehicle_id)?;
        self.link(driver_id, vehicle_id);
        Ok(())
    }

    /// Clear `driver_id`'s assignment on both sides.  Returns the vehicle it
    /// held, if any.
    pub fn unassign_driver(&mut self, driver_id: &DriverId) -> FleetResult<Option<VehicleId>> {
        self.drivers.require(driver_id)?;
        Ok(self.unlink_driver(driver_id))
    }

    /// Clear `vehicle_id`'s assignment on both sides.  Returns the driver
    /// that held it, if any.
    pub fn unassign_vehicle(&mut self, vehicle_id: &VehicleId) -> FleetResult<Option<DriverId>> {
        self.vehicles.require(vehicle_id)?;
        Ok(self.unlink_vehicle(vehicle_id))
    }

    /// `true` if every driver/vehicle link is mirrored on the other side.
    pub fn links_consistent(&self) -> bool {
        let vehicles_ok = self.vehicles.iter().all(|v| match &v.assigned_driver {
            None => true,
            Some(d) => self
                .drivers
                .get(d)
                .is_some_and(|d| d.assigned_vehicle.as_ref() == Some(&v.id)),
        });
        let drivers_ok = self.drivers.iter().all(|d| match &d.assigned_vehicle {
            None => true,
            Some(v) => self
                .vehicles
                .get(v)
                .is_some_and(|v| v.assigned_driver.as_ref() == Some(&d.id)),
        });
        vehicles_ok && drivers_ok
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create a vehicle with a fresh `EV-NNN` id, full battery, zero
    /// odometer, `idle` status, and the configured default temperature.
    pub fn add_vehicle(&mut self, data: NewVehicle, now: Timestamp) -> VehicleId {
        let id = next_free(&mut self.seqs.vehicle, VehicleId::from_seq, |id| self.vehicles.contains(id));
        let vehicle = Vehicle {
            id:                   id.clone(),
            model:                data.model,
            license_plate:        data.license_plate,
            status:               VehicleStatus::Idle,
            battery_capacity_kwh: data.battery_capacity_kwh,
            soc:                  100.0,
            soh:                  100.0,
            odometer_km:          0.0,
            assigned_driver:      None,
            location:             data.location,
            temperature_c:        self.limits.default_temperature_c,
            last_update:          now,
        };
        self.upsert_vehicle(vehicle);
        info!(vehicle = %id, "vehicle added");
        id
    }

    /// Create a driver with a fresh `DR-NNN` id and perfect scores.
    pub fn add_driver(&mut self, data: NewDriver, now: Timestamp) -> DriverId {
        let id = next_free(&mut self.seqs.driver, DriverId::from_seq, |id| self.drivers.contains(id));
        let driver = Driver {
            id:                id.clone(),
            full_name:         data.full_name,
            phone:             data.phone,
            license_number:    data.license_number,
            assigned_vehicle:  None,
            safety_score:      100.0,
            efficiency_rating: 100.0,
            total_trips:       0,
            join_date:         now,
        };
        self.upsert_driver(driver);
        info!(driver = %id, "driver added");
        id
    }

    /// Create a station with every port free.
    pub fn add_station(&mut self, data: NewStation) -> StationId {
        let id = next_free(&mut self.seqs.station, StationId::from_seq, |id| self.stations.contains(id));
        let station = ChargingStation {
            id:              id.clone(),
            name:            data.name,
            location:        data.location,
            status:          StationStatus::Available,
            total_ports:     data.total_ports,
            available_ports: data.total_ports,
            power_output_kw: data.power_output_kw,
            cost_per_kwh:    data.cost_per_kwh,
        };
        self.upsert_station(station);
        info!(station = %id, "station added");
        id
    }

    /// Create a `scheduled` route.  Fails with `NotFound` if the assigned
    /// vehicle is unknown.
    pub fn add_route(&mut self, data: NewRoute) -> FleetResult<RouteId> {
        if let Some(v) = &data.assigned_vehicle {
            self.vehicles.require(v)?;
        }
        let id = next_free(&mut self.seqs.route, RouteId::from_seq, |id| self.routes.contains(id));
        let route = Route {
            id:                     id.clone(),
            name:                   data.name,
            status:                 RouteStatus::Scheduled,
            assigned_vehicle:       data.assigned_vehicle,
            start:                  data.start,
            end:                    data.end,
            waypoints:              data.waypoints,
            distance_km:            data.distance_km,
            estimated_duration_min: data.estimated_duration_min,
            estimated_energy_kwh:   data.estimated_energy_kwh,
        };
        self.upsert_route(route);
        info!(route = %id, "route added");
        Ok(id)
    }

    // ── Link primitives ───────────────────────────────────────────────────

    /// Link both sides, evicting previous holders.  Both ids must exist.
    pub(crate) fn link(&mut self, driver_id: &DriverId, vehicle_id: &VehicleId) {
        let held_vehicle = self.drivers.get(driver_id).and_then(|d| d.assigned_vehicle.clone());
        let held_by = self.vehicles.get(vehicle_id).and_then(|v| v.assigned_driver.clone());

        if held_vehicle.as_ref() == Some(vehicle_id) && held_by.as_ref() == Some(driver_id) {
            return;
        }
        if let Some(old) = held_vehicle.filter(|w| w != vehicle_id) {
            if let Some(v) = self.vehicles.get_mut(&old) {
                v.assigned_driver = None;
            }
            debug!(driver = %driver_id, vehicle = %old, "released previous vehicle");
        }
        if let Some(old) = held_by.filter(|x| x != driver_id) {
            if let Some(d) = self.drivers.get_mut(&old) {
                d.assigned_vehicle = None;
            }
            debug!(vehicle = %vehicle_id, driver = %old, "evicted previous driver");
        }
        if let Some(d) = self.drivers.get_mut(driver_id) {
            d.assigned_vehicle = Some(vehicle_id.clone());
        }
        if let Some(v) = self.vehicles.get_mut(vehicle_id) {
            v.assigned_driver = Some(driver_id.clone());
        }
        info!(driver = %driver_id, vehicle = %vehicle_id, "driver assigned");
    }

    /// Clear `vehicle_id`'s link and the matching back-reference.
    pub(crate) fn unlink_vehicle(&mut self, vehicle_id: &VehicleId) -> Option<DriverId> {
        let driver_id = self.vehicles.get_mut(vehicle_id)?.assigned_driver.take()?;
        if let Some(d) = self.drivers.get_mut(&driver_id) {
            if d.assigned_vehicle.as_ref() == Some(vehicle_id) {
                d.assigned_vehicle = None;
            }
        }
        debug!(vehicle = %vehicle_id, driver = %driver_id, "link cleared");
        Some(driver_id)
    }

    /// Clear `driver_id`'s link and the matching back-reference.
    pub(crate) fn unlink_driver(&mut self, driver_id: &DriverId) -> Option<VehicleId> {
        let vehicle_id = self.drivers.get_mut(driver_id)?.assigned_vehicle.take()?;
        if let Some(v) = self.vehicles.get_mut(&vehicle_id) {
            if v.assigned_driver.as_ref() == Some(driver_id) {
                v.assigned_driver = None;
            }
        }
        debug!(driver = %driver_id, vehicle = %vehicle_id, "link cleared");
        Some(vehicle_id)
    }

    /// Repair links after a bulk load: keep a link only if both sides agree
    /// or one side is empty and the other side exists; drop the rest.
    pub(crate) fn reconcile_links(&mut self) {
        let claims: Vec<(VehicleId, DriverId)> = self
            .vehicles
            .iter()
            .filter_map(|v| v.assigned_driver.clone().map(|d| (v.id.clone(), d)))
            .collect();
        for (vehicle_id, driver_id) in claims {
            let accepted = match self.drivers.get(&driver_id) {
                None => false,
                Some(d) => d.assigned_vehicle.is_none() || d.assigned_vehicle.as_ref() == Some(&vehicle_id),
            };
            if accepted {
                if let Some(d) = self.drivers.get_mut(&driver_id) {
                    d.assigned_vehicle = Some(vehicle_id);
                }
            } else if let Some(v) = self.vehicles.get_mut(&vehicle_id) {
                warn!(vehicle = %vehicle_id, driver = %driver_id, "dropping conflicting driver link");
                v.assigned_driver = None;
            }
        }

        let claims: Vec<(DriverId, VehicleId)> = self
            .drivers
            .iter()
            .filter_map(|d| d.assigned_vehicle.clone().map(|v| (d.id.clone(), v)))
            .collect();
        for (driver_id, vehicle_id) in claims {
            let accepted = match self.vehicles.get(&vehicle_id) {
                None => false,
                Some(v) => v.assigned_driver.is_none() || v.assigned_driver.as_ref() == Some(&driver_id),
            };
            if accepted {
                if let Some(v) = self.vehicles.get_mut(&vehicle_id) {
                    v.assigned_driver = Some(driver_id);
                }
            } else if let Some(d) = self.drivers.get_mut(&driver_id) {
                warn!(driver = %driver_id, vehicle = %vehicle_id, "dropping conflicting vehicle link");
                d.assigned_vehicle = None;
            }
        }
    }
}
