//! `fw-console`: the operator console facade.
//!
//! [`FleetConsole`] owns one [`FleetState`](fw_store::FleetState), one
//! [`TelemetryRunner`](fw_telemetry::TelemetryRunner), and one
//! [`MapAdapter`](fw_map::MapAdapter).  Views read through it; every write
//! that changes what the map shows goes through it so focus and markers stay
//! in step with the stores.
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`console`]     | `FleetConsole` read and write surface                     |
//! | [`builder`]     | `ConsoleBuilder`                                          |
//! | [`resolve`]     | `FocusRef` → `FocusTarget`, station marker specs          |

pub mod builder;
pub mod console;
pub mod resolve;


pub use builder::ConsoleBuilder;
pub use console::FleetConsole;
pub use resolve::{resolve_focus, station_markers};
