//! Random-walk telemetry simulator.
//!
//! Each tick, every vehicle gets a uniform SOC delta in `±soc_jitter` and a
//! uniform temperature delta in `±temp_jitter_c`.  Clamping to the physical
//! domains happens when the batch is applied, not here, so the walk sticks to
//! a bound until a delta pulls it back inside.
//!
//! Vehicles are visited in store order and the RNG is seeded from the
//! configuration, so two simulators with the same seed over the same fleet
//! emit identical batches.

use fw_core::{SimRng, TelemetryConfig, TelemetryRecord, Timestamp};
use fw_store::FleetState;

use crate::TickProducer;

pub struct RandomWalkSimulator {
    rng:           SimRng,
    soc_jitter:    f64,
    temp_jitter_c: f64,
}

impl RandomWalkSimulator {
    pub fn new(soc_jitter: f64, temp_jitter_c: f64, seed: u64) -> Self {
        Self { rng: SimRng::new(seed), soc_jitter, temp_jitter_c }
    }

    pub fn from_config(cfg: &TelemetryConfig) -> Self {
        Self::new(cfg.soc_jitter, cfg.temp_jitter_c, cfg.seed)
    }
}

impl TickProducer for RandomWalkSimulator {
    fn produce(&mut self, fleet: &FleetState, now: Timestamp) -> Vec<TelemetryRecord> {
        fleet
            .vehicles()
            .iter()
            .map(|v| {
                let soc = self.rng.symmetric(self.soc_jitter);
                let temperature = self.rng.symmetric(self.temp_jitter_c);
                TelemetryRecord::delta(v.id.clone(), soc, temperature, now)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "random-walk"
    }
}
