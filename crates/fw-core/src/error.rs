//! Engine-wide error type.
//!
//! Sub-crates define their own error enums where they have failure modes of
//! their own and wrap `FleetError` as one variant via `From`.

use thiserror::Error;

use crate::EntityKind;

/// The top-level error type shared by all `fw-*` crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// A write would have left `field` outside `[min, max]`.
    ///
    /// Writes are clamped rather than rejected; this variant exists so the
    /// violation can be logged with full context.
    #[error("{field} value {value} outside [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("map surface unavailable: {0}")]
    MapSurfaceUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FleetError {
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        FleetError::NotFound { kind, id: id.to_string() }
    }
}

/// Shorthand result type for all `fw-*` crates.
pub type FleetResult<T> = Result<T, FleetError>;
