//! Strongly typed entity identifiers.
//!
//! Identifiers are human-readable strings of the form `PREFIX-NNN`
//! (`EV-001`, `DR-014`, …).  Seed data may use any string, so the sequence
//! number is parsed on demand rather than stored.  Ids are `Clone + Ord +
//! Hash` so they can be used as map keys and sorted without ceremony.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a prefixed, string-backed id wrapper.
macro_rules! prefixed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            /// Prefix used by [`from_seq`](Self::from_seq).
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an arbitrary identifier string.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Build the canonical id for sequence number `seq`, zero-padded
            /// to three digits (`EV-007`).  Wider numbers are kept intact.
            pub fn from_seq(seq: u32) -> Self {
                Self(format!("{}-{:03}", $prefix, seq))
            }

            /// Sequence number if the id follows the `PREFIX-NNN` scheme.
            pub fn seq(&self) -> Option<u32> {
                self.0
                    .strip_prefix($prefix)?
                    .strip_prefix('-')?
                    .parse()
                    .ok()
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }
    };
}

prefixed_id! {
    /// Identifier of a vehicle (`EV-001`).
    pub struct VehicleId = "EV";
}

prefixed_id! {
    /// Identifier of a driver (`DR-001`).
    pub struct DriverId = "DR";
}

prefixed_id! {
    /// Identifier of a charging station (`CS-001`).
    pub struct StationId = "CS";
}

prefixed_id! {
    /// Identifier of a route (`RT-001`).
    pub struct RouteId = "RT";
}

/// The four entity collections.  Used in error messages and log fields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Vehicle,
    Driver,
    Station,
    Route,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Vehicle => "vehicle",
            EntityKind::Driver  => "driver",
            EntityKind::Station => "station",
            EntityKind::Route   => "route",
        };
        f.write_str(s)
    }
}

/// An entity that can be bound to the map's focus layer group.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum FocusRef {
    Route(RouteId),
    Station(StationId),
}

impl FocusRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            FocusRef::Route(_)   => EntityKind::Route,
            FocusRef::Station(_) => EntityKind::Station,
        }
    }
}

impl fmt::Display for FocusRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusRef::Route(id)   => write!(f, "route {id}"),
            FocusRef::Station(id) => write!(f, "station {id}"),
        }
    }
}
