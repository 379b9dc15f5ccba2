//! Fluent builder for a pre-populated [`FleetState`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use fw_store::FleetStateBuilder;
//!
//! let fleet = FleetStateBuilder::new()
//!     .limits(FieldLimits::from(&cfg.telemetry))
//!     .vehicles(loaded_vehicles)
//!     .drivers(loaded_drivers)
//!     .build();
//! ```
//!
//! Records are taken as-is from a snapshot or seed file.  `build` normalises
//! numeric ranges and then reconciles cross-entity links in one pass, so the
//! order in which vehicles and drivers are supplied does not matter.

use tracing::{info, warn};

use crate::entity::{ChargingStation, Driver, Route, Vehicle};
use crate::fleet::{normalize_driver, normalize_route, normalize_station, normalize_vehicle};
use crate::{FieldLimits, FleetState};

/// Fluent builder for [`FleetState`].
#[derive(Default)]
pub struct FleetStateBuilder {
    limits:   FieldLimits,
    vehicles: Vec<Vehicle>,
    drivers:  Vec<Driver>,
    stations: Vec<ChargingStation>,
    routes:   Vec<Route>,
}

impl FleetStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: FieldLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn vehicles(mut self, vehicles: impl IntoIterator<Item = Vehicle>) -> Self {
        self.vehicles.extend(vehicles);
        self
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.drivers.push(driver);
        self
    }

    pub fn drivers(mut self, drivers: impl IntoIterator<Item = Driver>) -> Self {
        self.drivers.extend(drivers);
        self
    }

    pub fn station(mut self, station: ChargingStation) -> Self {
        self.stations.push(station);
        self
    }

    pub fn stations(mut self, stations: impl IntoIterator<Item = ChargingStation>) -> Self {
        self.stations.extend(stations);
        self
    }

    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Construct the state.
    ///
    /// A later record with a duplicate id replaces the earlier one.  Dangling
    /// or conflicting links are dropped with a warning; a link recorded on
    /// only one side is completed on the other.
    pub fn build(self) -> FleetState {
        let mut fleet = FleetState::new(self.limits);

        for mut v in self.vehicles {
            normalize_vehicle(&mut v, &fleet.limits);
            fleet.seqs.observe_vehicle(&v.id);
            fleet.vehicles.upsert(v);
        }
        for mut d in self.drivers {
            normalize_driver(&mut d);
            fleet.seqs.observe_driver(&d.id);
            fleet.drivers.upsert(d);
        }
        for mut s in self.stations {
            normalize_station(&mut s);
            fleet.seqs.observe_station(&s.id);
            fleet.stations.upsert(s);
        }
        for mut r in self.routes {
            normalize_route(&mut r);
            if let Some(v) = r.assigned_vehicle.take_if(|v| !fleet.vehicles.contains(v)) {
                warn!(route = %r.id, vehicle = %v, "dropping reference to unknown vehicle");
            }
            fleet.seqs.observe_route(&r.id);
            fleet.routes.upsert(r);
        }

        fleet.reconcile_links();
        info!(
            vehicles = fleet.vehicles.len(),
            drivers = fleet.drivers.len(),
            stations = fleet.stations.len(),
            routes = fleet.routes.len(),
            "fleet state built"
        );
        fleet
    }
}
