//! `fw-core`: foundational types for the `fleetwatch` monitoring engine.
//!
//! This crate is a dependency of every other `fw-*` crate.  It has no `fw-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `chrono`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `DriverId`, `StationId`, `RouteId`, `FocusRef` |
//! | [`geo`]         | `LatLng`, `Bounds`, haversine distance                    |
//! | [`time`]        | `Tick`, `TickClock`, `Timestamp`                          |
//! | [`rng`]         | `SimRng` (seeded telemetry randomness)                    |
//! | [`range`]       | `ValueRange` clamping domains                             |
//! | [`telemetry`]   | `TelemetryRecord`, `FieldUpdate`                          |
//! | [`config`]      | `FleetConfig` and its sections                            |
//! | [`error`]       | `FleetError`, `FleetResult`                               |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod range;
pub mod rng;
pub mod telemetry;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CriticalThresholds, FleetConfig, MapConfig, TelemetryConfig};
pub use error::{FleetError, FleetResult};
pub use geo::{Bounds, LatLng};
pub use ids::{DriverId, EntityKind, FocusRef, RouteId, StationId, VehicleId};
pub use range::ValueRange;
pub use rng::SimRng;
pub use telemetry::{FieldUpdate, TelemetryRecord};
pub use time::{Tick, TickClock, Timestamp};
