//! Turning store records into map geometry.

use fw_core::{FleetResult, FocusRef};
use fw_map::{FocusTarget, MarkerSpec};
use fw_store::{ChargingStation, FleetState};

/// Look `focus` up in the stores and build its geometry.
///
/// `NotFound` if the route or station does not exist.
pub fn resolve_focus(fleet: &FleetState, focus: &FocusRef) -> FleetResult<FocusTarget> {
    match focus {
        FocusRef::Route(id) => {
            let route = fleet.route(id)?;
            Ok(FocusTarget::Route {
                id:        route.id.clone(),
                name:      route.name.clone(),
                start:     route.start,
                end:       route.end,
                waypoints: route.waypoints.clone(),
            })
        }
        FocusRef::Station(id) => {
            let station = fleet.station(id)?;
            Ok(FocusTarget::Station {
                id:       station.id.clone(),
                name:     station.name.clone(),
                location: station.location,
            })
        }
    }
}

/// One clickable marker per station, in store order.
pub fn station_markers(fleet: &FleetState) -> Vec<MarkerSpec> {
    fleet.stations().iter().map(station_marker).collect()
}

fn station_marker(station: &ChargingStation) -> MarkerSpec {
    MarkerSpec {
        target:   FocusRef::Station(station.id.clone()),
        position: station.location,
        popup:    format!(
            "{} ({}, {}/{} ports)",
            station.name, station.status, station.available_ports, station.total_ports
        ),
    }
}
