//! Engine configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! the console builder.  Every field has a default, so a partial file (or
//! `{}`) is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{FleetError, FleetResult, ValueRange};

// ── TelemetryConfig ───────────────────────────────────────────────────────────

/// Tick interval, random-walk amplitude, and clamping domains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Milliseconds between ticks.  Default: 5000.
    pub interval_ms: u64,

    /// Maximum absolute SOC change per simulated tick.  Default: 2.5.
    pub soc_jitter: f64,

    /// Maximum absolute temperature change per simulated tick.  Default: 1.0.
    pub temp_jitter_c: f64,

    /// SOC domain for telemetry writes.  The floor of 10 keeps simulated
    /// vehicles out of the zero-battery state.
    pub soc_range: ValueRange,

    /// Physical temperature domain in °C.  Default: 15–55.
    pub temperature_range_c: ValueRange,

    /// Temperature given to newly added vehicles.
    pub default_temperature_c: f64,

    /// Master RNG seed for the simulator.
    pub seed: u64,

    /// Observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            interval_ms:             5_000,
            soc_jitter:              2.5,
            temp_jitter_c:           1.0,
            soc_range:               ValueRange::new(10.0, 100.0),
            temperature_range_c:     ValueRange::new(15.0, 55.0),
            default_temperature_c:   25.0,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}

impl TelemetryConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

// ── CriticalThresholds ────────────────────────────────────────────────────────

/// Red-list thresholds.  Both comparisons are strict.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalThresholds {
    /// Vehicles hotter than this are critical.  Default: 45 °C.
    pub max_temperature_c: f64,
    /// Vehicles below this SOC are critical.  Default: 20.
    pub min_soc: f64,
}

impl Default for CriticalThresholds {
    fn default() -> Self {
        Self { max_temperature_c: 45.0, min_soc: 20.0 }
    }
}

// ── MapConfig ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Padding passed to `fit_bounds` when focusing an entity.
    pub fit_padding_px: u32,
    /// Delay between mount/resize and the size invalidation.
    pub invalidate_delay_ms: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { fit_padding_px: 50, invalidate_delay_ms: 100 }
    }
}

impl MapConfig {
    #[inline]
    pub fn invalidate_delay(&self) -> Duration {
        Duration::from_millis(self.invalidate_delay_ms)
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub telemetry: TelemetryConfig,
    pub critical:  CriticalThresholds,
    pub map:       MapConfig,
}

impl FleetConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> FleetResult<()> {
        let t = &self.telemetry;
        if t.interval_ms == 0 {
            return Err(FleetError::Config("telemetry.interval_ms must be positive".into()));
        }
        if !(t.soc_jitter.is_finite() && t.soc_jitter >= 0.0) {
            return Err(FleetError::Config(format!("telemetry.soc_jitter {} must be >= 0", t.soc_jitter)));
        }
        if !(t.temp_jitter_c.is_finite() && t.temp_jitter_c >= 0.0) {
            return Err(FleetError::Config(format!(
                "telemetry.temp_jitter_c {} must be >= 0",
                t.temp_jitter_c
            )));
        }
        if !t.soc_range.is_valid()
            || t.soc_range.min < ValueRange::PERCENT.min
            || t.soc_range.max > ValueRange::PERCENT.max
        {
            return Err(FleetError::Config(format!(
                "telemetry.soc_range [{}, {}] must be ordered and within [0, 100]",
                t.soc_range.min, t.soc_range.max
            )));
        }
        if !t.temperature_range_c.is_valid() {
            return Err(FleetError::Config(format!(
                "telemetry.temperature_range_c [{}, {}] must be ordered",
                t.temperature_range_c.min, t.temperature_range_c.max
            )));
        }
        if !t.temperature_range_c.contains(t.default_temperature_c) {
            return Err(FleetError::Config(format!(
                "telemetry.default_temperature_c {} outside the temperature range",
                t.default_temperature_c
            )));
        }
        Ok(())
    }
}
