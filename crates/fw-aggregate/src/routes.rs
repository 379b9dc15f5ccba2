use fw_store::{FleetState, RouteStatus};
use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_routes:      usize,
    pub active:            usize,
    pub completed:         usize,
    pub scheduled:         usize,
    /// Routes with an assigned vehicle.
    pub assigned:          usize,
    pub total_distance_km: f64,
}

pub fn route_summary(fleet: &FleetState) -> RouteSummary {
    let mut s = RouteSummary::default();
    for route in fleet.routes() {
        s.total_routes += 1;
        match route.status {
            RouteStatus::Active    => s.active += 1,
            RouteStatus::Completed => s.completed += 1,
            RouteStatus::Scheduled => s.scheduled += 1,
        }
        if route.assigned_vehicle.is_some() {
            s.assigned += 1;
        }
        s.total_distance_km += route.distance_km;
    }
    s
}
