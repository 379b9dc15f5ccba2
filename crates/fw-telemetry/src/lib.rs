//! `fw-telemetry`: periodic telemetry for the fleet state.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`producer`]    | `TickProducer` trait                                      |
//! | [`simulator`]   | `RandomWalkSimulator` (seeded SOC/temperature jitter)     |
//! | [`live`]        | `LiveFeed` / `LiveFeedSender` over a tokio channel        |
//! | [`runner`]      | `TelemetryRunner` tick loop                               |
//! | [`observer`]    | `TickObserver`, `TickReport`, `NoopObserver`              |
//! | [`error`]       | `TelemetryError`, `TelemetryResult`                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fw_telemetry::{NoopObserver, RandomWalkSimulator, TelemetryRunner};
//!
//! let sim = RandomWalkSimulator::from_config(&cfg.telemetry);
//! let mut runner = TelemetryRunner::from_config(sim, &cfg.telemetry);
//! let report = runner.tick(&mut fleet, Utc::now(), &mut NoopObserver);
//! ```

pub mod error;
pub mod live;
pub mod observer;
pub mod producer;
pub mod runner;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use error::{TelemetryError, TelemetryResult};
pub use live::{live_feed, LiveFeed, LiveFeedSender};
pub use observer::{NoopObserver, TickObserver, TickReport};
pub use producer::TickProducer;
pub use runner::TelemetryRunner;
pub use simulator::RandomWalkSimulator;
