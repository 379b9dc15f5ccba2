//! `fw-aggregate`: derived views over a [`FleetState`](fw_store::FleetState).
//!
//! Every function here is pure: it takes `&FleetState`, recomputes from
//! scratch, and keeps no cache.  Calling one twice without an intervening
//! mutation yields equal results.
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`summary`]     | `fleet_summary`, `FleetSummary`, `VehicleStatusCounts`    |
//! | [`critical`]    | `critical_list`, `CriticalVehicle`, `CriticalReason`      |
//! | [`stations`]    | `station_summary`                                         |
//! | [`routes`]      | `route_summary`                                           |
//! | [`nearest`]     | `StationIndex` (R-tree), `nearest_available_station`      |

pub mod critical;
pub mod nearest;
pub mod routes;
pub mod stations;
pub mod summary;

#[cfg(test)]
mod tests;

pub use critical::{critical_count, critical_list, critical_reasons, is_critical, CriticalReason, CriticalVehicle};
pub use nearest::{nearest_available_station, NearestStation, StationIndex};
pub use routes::{route_summary, RouteSummary};
pub use stations::{station_summary, StationSummary};
pub use summary::{fleet_summary, FleetSummary, VehicleStatusCounts};
