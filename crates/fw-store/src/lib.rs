//! `fw-store`: entity records and the mutable fleet state.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`entity`]      | `Vehicle`, `Driver`, `ChargingStation`, `Route`, statuses, patches |
//! | [`store`]       | `Entity` trait, insertion-ordered `EntityStore<E>`        |
//! | [`fleet`]       | `FleetState` container (upsert, patch, status, telemetry) |
//! | [`assign`]      | Driver ↔ vehicle coordinator and entity creation          |
//! | [`builder`]     | `FleetStateBuilder` (bulk load with link reconciliation)  |
//! | [`seed`]        | Built-in demo fleet                                       |

pub mod assign;
pub mod builder;
pub mod entity;
pub mod fleet;
pub mod seed;
pub mod store;


pub use builder::FleetStateBuilder;
pub use entity::{
    ChargingStation, Driver, DriverPatch, NewDriver, NewRoute, NewStation, NewVehicle, Route,
    RoutePatch, RouteStatus, StationPatch, StationStatus, Vehicle, VehiclePatch, VehicleStatus,
};
pub use fleet::{FieldLimits, FleetState};
pub use seed::demo_fleet;
pub use store::{Entity, EntityStore};
