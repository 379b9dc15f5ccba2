//! What the adapter draws: focus targets and marker specs.

use fw_core::{FocusRef, LatLng, RouteId, StationId};
use serde::{Deserialize, Serialize};

/// Resolved geometry for the focused entity.
///
/// Built by the caller from the stores, so the adapter never sees an entity
/// record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusTarget {
    Route {
        id:        RouteId,
        name:      String,
        start:     LatLng,
        end:       LatLng,
        waypoints: Vec<LatLng>,
    },
    Station {
        id:       StationId,
        name:     String,
        location: LatLng,
    },
}

impl FocusTarget {
    pub fn focus_ref(&self) -> FocusRef {
        match self {
            FocusTarget::Route { id, .. } => FocusRef::Route(id.clone()),
            FocusTarget::Station { id, .. } => FocusRef::Station(id.clone()),
        }
    }

    /// Every point the focus group covers, for fitting the viewport.
    pub fn points(&self) -> Vec<LatLng> {
        match self {
            FocusTarget::Route { start, end, waypoints, .. } => {
                let mut pts = Vec::with_capacity(waypoints.len() + 2);
                pts.push(*start);
                pts.extend_from_slice(waypoints);
                pts.push(*end);
                pts
            }
            FocusTarget::Station { location, .. } => vec![*location],
        }
    }
}

/// One clickable marker in the marker set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub target:   FocusRef,
    pub position: LatLng,
    pub popup:    String,
}

/// Emitted when the operator clicks a marker.  The caller decides what to do
/// with it; the adapter does not change focus on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusChanged {
    pub target: FocusRef,
}
