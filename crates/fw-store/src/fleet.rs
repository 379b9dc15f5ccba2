//! `FleetState`: the four entity stores behind one write API.
//!
//! Every mutation is a `&mut self` method, so a telemetry batch, a patch, or
//! an assignment is applied under one exclusive borrow and no reader can see
//! it half-done.  The stores themselves are handed out read-only.

use std::fmt::Display;

use fw_core::{
    EntityKind, FleetResult, RouteId, StationId, TelemetryConfig, TelemetryRecord, ValueRange,
    VehicleId, DriverId,
};
use tracing::{debug, warn};

use crate::assign::IdSequences;
use crate::entity::{
    ChargingStation, Driver, DriverPatch, Route, RoutePatch, RouteStatus, StationPatch,
    StationStatus, Vehicle, VehiclePatch, VehicleStatus,
};
use crate::store::EntityStore;

/// Lower bound for a station's power output.  Anything at or below zero is a
/// data-entry error.
const POWER_KW: ValueRange = ValueRange::new(0.1, f64::MAX);

/// Non-negative quantities: distances, energy, cost.
const NON_NEGATIVE: ValueRange = ValueRange::new(0.0, f64::MAX);

// ── FieldLimits ───────────────────────────────────────────────────────────────

/// Numeric domains that depend on configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldLimits {
    /// SOC domain for telemetry writes (floor above zero).
    pub telemetry_soc:         ValueRange,
    /// Physical temperature domain, applied to every temperature write.
    pub temperature_c:         ValueRange,
    /// Temperature given to newly added vehicles.
    pub default_temperature_c: f64,
}

impl From<&TelemetryConfig> for FieldLimits {
    fn from(cfg: &TelemetryConfig) -> Self {
        Self {
            telemetry_soc:         cfg.soc_range,
            temperature_c:         cfg.temperature_range_c,
            default_temperature_c: cfg.default_temperature_c,
        }
    }
}

impl Default for FieldLimits {
    fn default() -> Self {
        FieldLimits::from(&TelemetryConfig::default())
    }
}

// ── FleetState ────────────────────────────────────────────────────────────────

/// The injectable fleet state container.
///
/// Build one per console (or per test) with [`FleetState::new`] or
/// [`FleetStateBuilder`](crate::FleetStateBuilder).  There is no global
/// instance.
#[derive(Clone, Debug, Default)]
pub struct FleetState {
    pub(crate) vehicles: EntityStore<Vehicle>,
    pub(crate) drivers:  EntityStore<Driver>,
    pub(crate) stations: EntityStore<ChargingStation>,
    pub(crate) routes:   EntityStore<Route>,
    pub(crate) limits:   FieldLimits,
    pub(crate) seqs:     IdSequences,
}

impl FleetState {
    pub fn new(limits: FieldLimits) -> Self {
        Self { limits, ..Self::default() }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn vehicles(&self) -> &EntityStore<Vehicle> {
        &self.vehicles
    }

    #[inline]
    pub fn drivers(&self) -> &EntityStore<Driver> {
        &self.drivers
    }

    #[inline]
    pub fn stations(&self) -> &EntityStore<ChargingStation> {
        &self.stations
    }

    #[inline]
    pub fn routes(&self) -> &EntityStore<Route> {
        &self.routes
    }

    #[inline]
    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    pub fn vehicle(&self, id: &VehicleId) -> FleetResult<&Vehicle> {
        self.vehicles.require(id)
    }

    pub fn driver(&self, id: &DriverId) -> FleetResult<&Driver> {
        self.drivers.require(id)
    }

    pub fn station(&self, id: &StationId) -> FleetResult<&ChargingStation> {
        self.stations.require(id)
    }

    pub fn route(&self, id: &RouteId) -> FleetResult<&Route> {
        self.routes.require(id)
    }

    // ── Upsert ────────────────────────────────────────────────────────────

    /// Insert or replace a vehicle.  Numeric fields are clamped.
    ///
    /// The record's `assigned_driver` is treated as a request: a known driver
    /// is linked both ways through the coordinator (evicting previous
    /// holders), an unknown one is dropped with a warning, and `None` clears
    /// any existing link.
    pub fn upsert_vehicle(&mut self, mut vehicle: Vehicle) -> Option<Vehicle> {
        let requested = vehicle.assigned_driver.take();
        normalize_vehicle(&mut vehicle, &self.limits);
        self.seqs.observe_vehicle(&vehicle.id);

        let id = vehicle.id.clone();
        vehicle.assigned_driver = self.vehicles.get(&id).and_then(|v| v.assigned_driver.clone());
        let replaced = self.vehicles.upsert(vehicle);

        match requested {
            Some(driver) if self.drivers.contains(&driver) => self.link(&driver, &id),
            other => {
                if let Some(driver) = other {
                    warn!(vehicle = %id, driver = %driver, "dropping link to unknown driver");
                }
                self.unlink_vehicle(&id);
            }
        }
        replaced
    }

    /// Insert or replace a driver.  Link handling mirrors
    /// [`upsert_vehicle`](Self::upsert_vehicle).
    pub fn upsert_driver(&mut self, mut driver: Driver) -> Option<Driver> {
        let requested = driver.assigned_vehicle.take();
        normalize_driver(&mut driver);
        self.seqs.observe_driver(&driver.id);

        let id = driver.id.clone();
        driver.assigned_vehicle = self.drivers.get(&id).and_then(|d| d.assigned_vehicle.clone());
        let replaced = self.drivers.upsert(driver);

        match requested {
            Some(vehicle) if self.vehicles.contains(&vehicle) => self.link(&id, &vehicle),
            other => {
                if let Some(vehicle) = other {
                    warn!(driver = %id, vehicle = %vehicle, "dropping link to unknown vehicle");
                }
                self.unlink_driver(&id);
            }
        }
        replaced
    }

    pub fn upsert_station(&mut self, mut station: ChargingStation) -> Option<ChargingStation> {
        normalize_station(&mut station);
        self.seqs.observe_station(&station.id);
        self.stations.upsert(station)
    }

    /// Insert or replace a route.  A reference to an unknown vehicle is
    /// dropped with a warning.
    pub fn upsert_route(&mut self, mut route: Route) -> Option<Route> {
        normalize_route(&mut route);
        if let Some(v) = route.assigned_vehicle.take_if(|v| !self.vehicles.contains(v)) {
            warn!(route = %route.id, vehicle = %v, "dropping reference to unknown vehicle");
        }
        self.seqs.observe_route(&route.id);
        self.routes.upsert(route)
    }

    // ── Patch ─────────────────────────────────────────────────────────────

    /// Apply the `Some` fields of `patch`.  Out-of-range numbers are clamped
    /// and logged; non-finite numbers are ignored.
    pub fn patch_vehicle(&mut self, id: &VehicleId, patch: VehiclePatch) -> FleetResult<&Vehicle> {
        let limits = self.limits;
        let v = self.vehicles.require_mut(id)?;

        if let Some(model) = patch.model {
            v.model = model;
        }
        if let Some(plate) = patch.license_plate {
            v.license_plate = plate;
        }
        if let Some(status) = patch.status {
            v.status = status;
        }
        if let Some(x) = patch.battery_capacity_kwh.and_then(|x| checked_write("battery_capacity_kwh", NON_NEGATIVE, x, id)) {
            v.battery_capacity_kwh = x;
        }
        if let Some(x) = patch.soc.and_then(|x| checked_write("soc", ValueRange::PERCENT, x, id)) {
            v.soc = x;
        }
        if let Some(x) = patch.soh.and_then(|x| checked_write("soh", ValueRange::PERCENT, x, id)) {
            v.soh = x;
        }
        if let Some(x) = patch.odometer_km {
            // Odometers only move forward.
            let floor = ValueRange::new(v.odometer_km, f64::MAX);
            if let Some(x) = checked_write("odometer_km", floor, x, id) {
                v.odometer_km = x;
            }
        }
        if let Some(loc) = patch.location {
            v.location = loc;
        }
        if let Some(x) = patch.temperature_c.and_then(|x| checked_write("temperature_c", limits.temperature_c, x, id)) {
            v.temperature_c = x;
        }
        if let Some(ts) = patch.last_update {
            v.last_update = ts;
        }
        Ok(v)
    }

    pub fn patch_driver(&mut self, id: &DriverId, patch: DriverPatch) -> FleetResult<&Driver> {
        let d = self.drivers.require_mut(id)?;

        if let Some(name) = patch.full_name {
            d.full_name = name;
        }
        if let Some(phone) = patch.phone {
            d.phone = phone;
        }
        if let Some(license) = patch.license_number {
            d.license_number = license;
        }
        if let Some(x) = patch.safety_score.and_then(|x| checked_write("safety_score", ValueRange::PERCENT, x, id)) {
            d.safety_score = x;
        }
        if let Some(x) = patch.efficiency_rating.and_then(|x| checked_write("efficiency_rating", ValueRange::PERCENT, x, id)) {
            d.efficiency_rating = x;
        }
        if let Some(trips) = patch.total_trips {
            d.total_trips = trips;
        }
        Ok(d)
    }

    /// Apply a station patch.  When the ports change and the patch leaves
    /// `status` alone, status follows occupancy the way the port operations
    /// do: no free port is `in_use`, any free port is `available`, and
    /// `offline` stays offline.
    pub fn patch_station(&mut self, id: &StationId, patch: StationPatch) -> FleetResult<&ChargingStation> {
        let s = self.stations.require_mut(id)?;
        let ports_changed = patch.total_ports.is_some() || patch.available_ports.is_some();
        let status_given = patch.status.is_some();

        if let Some(name) = patch.name {
            s.name = name;
        }
        if let Some(loc) = patch.location {
            s.location = loc;
        }
        if let Some(status) = patch.status {
            s.status = status;
        }
        if let Some(total) = patch.total_ports {
            s.total_ports = total;
        }
        if let Some(avail) = patch.available_ports {
            s.available_ports = avail;
        }
        if let Some(x) = patch.power_output_kw.and_then(|x| checked_write("power_output_kw", POWER_KW, x, id)) {
            s.power_output_kw = x;
        }
        if let Some(x) = patch.cost_per_kwh.and_then(|x| checked_write("cost_per_kwh", NON_NEGATIVE, x, id)) {
            s.cost_per_kwh = x;
        }
        normalize_station(s);
        if ports_changed && !status_given && s.status != StationStatus::Offline {
            s.status = if s.available_ports == 0 { StationStatus::InUse } else { StationStatus::Available };
        }
        Ok(s)
    }

    /// Apply a route patch.  Fails with `NotFound` if the patch points the
    /// route at an unknown vehicle; nothing is written in that case.
    pub fn patch_route(&mut self, id: &RouteId, patch: RoutePatch) -> FleetResult<&Route> {
        if let Some(Some(vehicle)) = &patch.assigned_vehicle {
            self.vehicles.require(vehicle)?;
        }
        let r = self.routes.require_mut(id)?;

        if let Some(name) = patch.name {
            r.name = name;
        }
        if let Some(status) = patch.status {
            r.status = status;
        }
        if let Some(vehicle) = patch.assigned_vehicle {
            r.assigned_vehicle = vehicle;
        }
        if let Some(start) = patch.start {
            r.start = start;
        }
        if let Some(end) = patch.end {
            r.end = end;
        }
        if let Some(waypoints) = patch.waypoints {
            r.waypoints = waypoints;
        }
        if let Some(x) = patch.distance_km.and_then(|x| checked_write("distance_km", NON_NEGATIVE, x, id)) {
            r.distance_km = x;
        }
        if let Some(minutes) = patch.estimated_duration_min {
            r.estimated_duration_min = minutes;
        }
        if let Some(x) = patch.estimated_energy_kwh.and_then(|x| checked_write("estimated_energy_kwh", NON_NEGATIVE, x, id)) {
            r.estimated_energy_kwh = Some(x);
        }
        Ok(r)
    }

    // ── Status operations ─────────────────────────────────────────────────

    pub fn set_vehicle_status(&mut self, id: &VehicleId, status: VehicleStatus) -> FleetResult<()> {
        self.vehicles.require_mut(id)?.status = status;
        Ok(())
    }

    pub fn set_station_status(&mut self, id: &StationId, status: StationStatus) -> FleetResult<()> {
        self.stations.require_mut(id)?.status = status;
        Ok(())
    }

    pub fn set_route_status(&mut self, id: &RouteId, status: RouteStatus) -> FleetResult<()> {
        self.routes.require_mut(id)?.status = status;
        Ok(())
    }

    /// Take one port at a station.  Returns `false` (and changes nothing) if
    /// the station is offline or full.  Taking the last port marks the
    /// station `in_use`.
    pub fn occupy_port(&mut self, id: &StationId) -> FleetResult<bool> {
        let s = self.stations.require_mut(id)?;
        if !s.has_free_port() {
            debug!(station = %id, status = %s.status, "no free port");
            return Ok(false);
        }
        s.available_ports -= 1;
        if s.available_ports == 0 {
            s.status = StationStatus::InUse;
        }
        Ok(true)
    }

    /// Free one port.  Returns `false` if every port was already free.  An
    /// `in_use` station becomes `available`; `offline` stays offline.
    pub fn release_port(&mut self, id: &StationId) -> FleetResult<bool> {
        let s = self.stations.require_mut(id)?;
        if s.available_ports >= s.total_ports {
            return Ok(false);
        }
        s.available_ports += 1;
        if s.status == StationStatus::InUse {
            s.status = StationStatus::Available;
        }
        Ok(true)
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove a vehicle, clearing its driver's link and every route that
    /// referenced it.
    pub fn remove_vehicle(&mut self, id: &VehicleId) -> FleetResult<Vehicle> {
        self.vehicles.require(id)?;
        self.unlink_vehicle(id);
        for route in self.routes.iter_mut() {
            if route.assigned_vehicle.as_ref() == Some(id) {
                route.assigned_vehicle = None;
            }
        }
        self.vehicles.remove(id).ok_or_else(|| fw_core::FleetError::not_found(EntityKind::Vehicle, id))
    }

    /// Remove a driver, clearing the assigned vehicle's link.
    pub fn remove_driver(&mut self, id: &DriverId) -> FleetResult<Driver> {
        self.drivers.require(id)?;
        self.unlink_driver(id);
        self.drivers.remove(id).ok_or_else(|| fw_core::FleetError::not_found(EntityKind::Driver, id))
    }

    pub fn remove_station(&mut self, id: &StationId) -> FleetResult<ChargingStation> {
        self.stations.remove(id).ok_or_else(|| fw_core::FleetError::not_found(EntityKind::Station, id))
    }

    pub fn remove_route(&mut self, id: &RouteId) -> FleetResult<Route> {
        self.routes.remove(id).ok_or_else(|| fw_core::FleetError::not_found(EntityKind::Route, id))
    }

    // ── Telemetry ─────────────────────────────────────────────────────────

    /// Apply one telemetry record: resolve SOC and temperature, clamp them to
    /// the telemetry domains, and stamp `last_update`.  All three fields are
    /// written together.
    ///
    /// Fails with `NotFound` for an unknown vehicle and `InvalidRange` for a
    /// non-finite value; the vehicle is left untouched in both cases.
    /// Clamping an absolute reading logs a warning; clamping a delta (the
    /// random walk hitting a bound) logs at debug.
    pub fn apply_telemetry(&mut self, record: &TelemetryRecord) -> FleetResult<()> {
        let limits = self.limits;
        let v = self.vehicles.require_mut(&record.vehicle_id)?;

        let soc = resolve_field("soc", record.soc, v.soc, limits.telemetry_soc, &v.id)?;
        let temperature = resolve_field(
            "temperature_c",
            record.temperature,
            v.temperature_c,
            limits.temperature_c,
            &v.id,
        )?;

        v.soc = soc;
        v.temperature_c = temperature;
        v.last_update = record.timestamp;
        Ok(())
    }
}

// ── Normalisation helpers ─────────────────────────────────────────────────────

/// Clamp an explicit write into `range`.  `None` for non-finite input.
fn checked_write(field: &'static str, range: ValueRange, value: f64, owner: &dyn Display) -> Option<f64> {
    if !value.is_finite() {
        warn!(entity = %owner, field, value, "ignoring non-finite write");
        return None;
    }
    if let Some(err) = range.violation(field, value) {
        warn!(entity = %owner, %err, "clamping out-of-range write");
    }
    Some(range.clamp(value))
}

/// Clamp a field in place, falling back to `fallback` if it is non-finite.
fn clamp_in_place(field: &'static str, range: ValueRange, value: &mut f64, fallback: f64, owner: &dyn Display) {
    *value = checked_write(field, range, *value, owner).unwrap_or(fallback);
}

fn resolve_field(
    field:   &'static str,
    update:  Option<fw_core::FieldUpdate>,
    current: f64,
    range:   ValueRange,
    vehicle: &VehicleId,
) -> FleetResult<f64> {
    let Some(update) = update else {
        return Ok(current);
    };
    let raw = update.resolve(current);
    if !update.is_finite() {
        return Err(fw_core::FleetError::InvalidRange { field, value: raw, min: range.min, max: range.max });
    }
    if let Some(err) = range.violation(field, raw) {
        if update.is_absolute() {
            warn!(vehicle = %vehicle, %err, "clamping telemetry reading");
        } else {
            debug!(vehicle = %vehicle, %err, "random walk clamped");
        }
    }
    Ok(range.clamp(raw))
}

pub(crate) fn normalize_vehicle(v: &mut Vehicle, limits: &FieldLimits) {
    clamp_in_place("soc", ValueRange::PERCENT, &mut v.soc, 100.0, &v.id);
    clamp_in_place("soh", ValueRange::PERCENT, &mut v.soh, 100.0, &v.id);
    clamp_in_place("odometer_km", NON_NEGATIVE, &mut v.odometer_km, 0.0, &v.id);
    clamp_in_place("temperature_c", limits.temperature_c, &mut v.temperature_c, limits.default_temperature_c, &v.id);
    clamp_in_place("battery_capacity_kwh", NON_NEGATIVE, &mut v.battery_capacity_kwh, 0.0, &v.id);
}

pub(crate) fn normalize_driver(d: &mut Driver) {
    clamp_in_place("safety_score", ValueRange::PERCENT, &mut d.safety_score, 100.0, &d.id);
    clamp_in_place("efficiency_rating", ValueRange::PERCENT, &mut d.efficiency_rating, 100.0, &d.id);
}

/// Enforce `total_ports >= 1`, `available_ports <= total_ports`, and a
/// positive power rating.
pub(crate) fn normalize_station(s: &mut ChargingStation) {
    if s.total_ports == 0 {
        warn!(station = %s.id, "station has no ports, raising total_ports to 1");
        s.total_ports = 1;
    }
    if s.available_ports > s.total_ports {
        warn!(
            station = %s.id,
            available = s.available_ports,
            total = s.total_ports,
            "clamping available_ports to total_ports"
        );
        s.available_ports = s.total_ports;
    }
    clamp_in_place("power_output_kw", POWER_KW, &mut s.power_output_kw, POWER_KW.min, &s.id);
    clamp_in_place("cost_per_kwh", NON_NEGATIVE, &mut s.cost_per_kwh, 0.0, &s.id);
}

pub(crate) fn normalize_route(r: &mut Route) {
    clamp_in_place("distance_km", NON_NEGATIVE, &mut r.distance_km, 0.0, &r.id);
    if let Some(energy) = r.estimated_energy_kwh {
        r.estimated_energy_kwh = checked_write("estimated_energy_kwh", NON_NEGATIVE, energy, &r.id);
    }
}
