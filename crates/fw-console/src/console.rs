//! The `FleetConsole` struct: read surface, write surface, map plumbing.

use fw_aggregate::{
    critical_list, fleet_summary, nearest_available_station, route_summary, station_summary,
    CriticalVehicle, FleetSummary, NearestStation, RouteSummary, StationSummary,
};
use fw_core::{
    CriticalThresholds, DriverId, FleetResult, FocusRef, LatLng, RouteId, StationId, Timestamp,
    VehicleId,
};
use fw_map::{FocusTarget, LayerHandle, MapAdapter, MapStatus, MapSurface, TimerId, TimerQueue};
use fw_store::{
    ChargingStation, Driver, FleetState, NewDriver, NewRoute, NewStation, NewVehicle, Route,
    RoutePatch, StationPatch, StationStatus, Vehicle,
};
use fw_telemetry::{NoopObserver, TelemetryRunner, TickObserver, TickProducer, TickReport};
use tracing::{debug, info, warn};

use crate::resolve::{resolve_focus, station_markers};

/// One operator console.
///
/// Holds the only `FleetState`, runner and map adapter it uses; build one
/// with [`ConsoleBuilder`](crate::ConsoleBuilder).  Several consoles can
/// coexist without sharing anything.
pub struct FleetConsole<P: TickProducer, S: MapSurface, T: TimerQueue> {
    pub(crate) fleet:      FleetState,
    pub(crate) runner:     TelemetryRunner<P>,
    pub(crate) map:        MapAdapter<S, T>,
    pub(crate) thresholds: CriticalThresholds,
}

impl<P: TickProducer, S: MapSurface, T: TimerQueue> FleetConsole<P, S, T> {
    // ── Read surface ──────────────────────────────────────────────────────

    pub fn list_vehicles(&self) -> &[Vehicle] {
        self.fleet.vehicles().list()
    }

    pub fn list_drivers(&self) -> &[Driver] {
        self.fleet.drivers().list()
    }

    pub fn list_stations(&self) -> &[ChargingStation] {
        self.fleet.stations().list()
    }

    pub fn list_routes(&self) -> &[Route] {
        self.fleet.routes().list()
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        fleet_summary(&self.fleet)
    }

    pub fn critical_list(&self) -> Vec<CriticalVehicle> {
        critical_list(&self.fleet, &self.thresholds)
    }

    pub fn station_summary(&self) -> StationSummary {
        station_summary(&self.fleet)
    }

    pub fn route_summary(&self) -> RouteSummary {
        route_summary(&self.fleet)
    }

    pub fn nearest_available_station(&self, from: LatLng) -> Option<NearestStation> {
        nearest_available_station(&self.fleet, from)
    }

    /// The entity the operator last asked to focus, if it is still shown or
    /// waiting for a mount.
    pub fn focus(&self) -> Option<FocusRef> {
        self.map.requested_focus().map(FocusTarget::focus_ref)
    }

    #[inline]
    pub fn fleet(&self) -> &FleetState {
        &self.fleet
    }

    #[inline]
    pub fn runner(&self) -> &TelemetryRunner<P> {
        &self.runner
    }

    #[inline]
    pub fn map(&self) -> &MapAdapter<S, T> {
        &self.map
    }

    /// Direct adapter access for surface and timer plumbing.  Focus and
    /// markers should be changed through the console.
    #[inline]
    pub fn map_mut(&mut self) -> &mut MapAdapter<S, T> {
        &mut self.map
    }

    #[inline]
    pub fn thresholds(&self) -> &CriticalThresholds {
        &self.thresholds
    }

    // ── Fleet writes ──────────────────────────────────────────────────────

    pub fn add_vehicle(&mut self, data: NewVehicle, now: Timestamp) -> VehicleId {
        self.fleet.add_vehicle(data, now)
    }

    pub fn add_driver(&mut self, data: NewDriver, now: Timestamp) -> DriverId {
        self.fleet.add_driver(data, now)
    }

    pub fn add_station(&mut self, data: NewStation) -> StationId {
        let id = self.fleet.add_station(data);
        self.refresh_station_markers();
        id
    }

    pub fn add_route(&mut self, data: NewRoute) -> FleetResult<RouteId> {
        self.fleet.add_route(data)
    }

    /// Exclusive assignment; previous holders on both sides are released.
    pub fn assign_driver_to_vehicle(&mut self, driver: &DriverId, vehicle: &VehicleId) -> FleetResult<()> {
        self.fleet.assign(driver, vehicle)?;
        info!(%driver, %vehicle, "driver assigned");
        Ok(())
    }

    pub fn unassign_driver(&mut self, driver: &DriverId) -> FleetResult<Option<VehicleId>> {
        self.fleet.unassign_driver(driver)
    }

    pub fn remove_vehicle(&mut self, id: &VehicleId) -> FleetResult<Vehicle> {
        self.fleet.remove_vehicle(id)
    }

    pub fn remove_driver(&mut self, id: &DriverId) -> FleetResult<Driver> {
        self.fleet.remove_driver(id)
    }

    /// Remove a station, drop its marker, and clear focus if it was focused.
    pub fn remove_station(&mut self, id: &StationId) -> FleetResult<ChargingStation> {
        let station = self.fleet.remove_station(id)?;
        self.clear_focus_on(&FocusRef::Station(id.clone()));
        self.refresh_station_markers();
        Ok(station)
    }

    /// Remove a route and clear focus if it was focused.
    pub fn remove_route(&mut self, id: &RouteId) -> FleetResult<Route> {
        let route = self.fleet.remove_route(id)?;
        self.clear_focus_on(&FocusRef::Route(id.clone()));
        Ok(route)
    }

    /// Patch a station and redraw what depends on it.
    pub fn patch_station(&mut self, id: &StationId, patch: StationPatch) -> FleetResult<&ChargingStation> {
        self.fleet.patch_station(id, patch)?;
        self.after_station_change(id);
        self.fleet.station(id)
    }

    pub fn set_station_status(&mut self, id: &StationId, status: StationStatus) -> FleetResult<()> {
        self.fleet.set_station_status(id, status)?;
        self.after_station_change(id);
        Ok(())
    }

    /// Patch a route; a focused route is redrawn with its new geometry.
    pub fn patch_route(&mut self, id: &RouteId, patch: RoutePatch) -> FleetResult<&Route> {
        self.fleet.patch_route(id, patch)?;
        self.redraw_if_focused(FocusRef::Route(id.clone()));
        self.fleet.route(id)
    }

    // ── Telemetry ─────────────────────────────────────────────────────────

    pub fn tick(&mut self, now: Timestamp) -> TickReport {
        self.tick_with(now, &mut NoopObserver)
    }

    pub fn tick_with<O: TickObserver>(&mut self, now: Timestamp, observer: &mut O) -> TickReport {
        self.runner.tick(&mut self.fleet, now, observer)
    }

    pub fn run_ticks<O: TickObserver>(&mut self, n: u64, start: Timestamp, observer: &mut O) -> Vec<TickReport> {
        self.runner.run_ticks(n, &mut self.fleet, start, observer)
    }

    // ── Map ───────────────────────────────────────────────────────────────

    /// Resolve `focus` against the stores and hand it to the map.
    ///
    /// An unknown id returns `NotFound` and leaves the current focus as it
    /// was.  `None` clears.  A surface failure is not an error here: the map
    /// keeps the request and draws it on the next mount.
    pub fn set_focus(&mut self, focus: Option<FocusRef>) -> FleetResult<()> {
        let target = focus.as_ref().map(|f| resolve_focus(&self.fleet, f)).transpose()?;
        self.map.set_focus(target);
        Ok(())
    }

    pub fn mount_map(&mut self) -> MapStatus {
        self.map.mount()
    }

    pub fn unmount_map(&mut self) {
        self.map.unmount();
    }

    /// Rebuild the station marker set from the store.
    pub fn refresh_station_markers(&mut self) {
        self.map.set_markers(station_markers(&self.fleet));
    }

    /// Route a marker click to [`set_focus`](Self::set_focus).  Returns the
    /// newly focused entity, or `None` if `layer` is not a current marker.
    pub fn click_marker(&mut self, layer: LayerHandle) -> FleetResult<Option<FocusRef>> {
        let Some(event) = self.map.click_marker(layer) else {
            debug!(%layer, "click on unknown layer ignored");
            return Ok(None);
        };
        self.set_focus(Some(event.target.clone()))?;
        Ok(Some(event.target))
    }

    pub fn on_container_resize(&mut self) {
        self.map.on_container_resize();
    }

    pub fn on_timer(&mut self, id: TimerId) -> bool {
        self.map.on_timer(id)
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn clear_focus_on(&mut self, removed: &FocusRef) {
        if self.focus().as_ref() == Some(removed) {
            info!(focus = %removed, "focused entity removed, clearing focus");
            self.map.clear_focus();
        }
    }

    fn redraw_if_focused(&mut self, focus: FocusRef) {
        if self.focus().as_ref() != Some(&focus) {
            return;
        }
        if let Err(err) = self.set_focus(Some(focus)) {
            warn!(%err, "focus not redrawn");
        }
    }

    fn after_station_change(&mut self, id: &StationId) {
        self.refresh_station_markers();
        self.redraw_if_focused(FocusRef::Station(id.clone()));
    }
}
