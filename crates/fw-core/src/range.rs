//! Closed numeric domains used for clamping telemetry and entity fields.

use serde::{Deserialize, Serialize};

use crate::FleetError;

/// Inclusive `[min, max]` range over `f64`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// `[0, 100]`: SOC, SOH, and driver scores.
    pub const PERCENT: ValueRange = ValueRange::new(0.0, 100.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `true` if `min <= max` and both bounds are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` into the range.  NaN is passed through unchanged;
    /// callers reject non-finite input before clamping.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// The `InvalidRange` error describing `value` if it lies outside.
    pub fn violation(&self, field: &'static str, value: f64) -> Option<FleetError> {
        (!self.contains(value)).then_some(FleetError::InvalidRange {
            field,
            value,
            min: self.min,
            max: self.max,
        })
    }
}
