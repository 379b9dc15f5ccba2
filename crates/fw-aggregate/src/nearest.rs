//! Nearest usable charging station.
//!
//! # Index
//!
//! Stations are projected onto the unit sphere and stored in an R-tree
//! (`rstar`) keyed by `[x, y, z]`.  Straight-line chord length on the sphere
//! grows monotonically with great-circle distance, so the R-tree's Euclidean
//! nearest neighbour is also the haversine nearest neighbour; no
//! re-ranking is needed.
//!
//! Only stations that can take a vehicle now (not offline, at least one free
//! port) are indexed.  The index is a snapshot: rebuild it after port or
//! status changes.

use fw_core::{LatLng, StationId};
use fw_store::FleetState;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::Serialize;

#[derive(Clone)]
struct StationEntry {
    point:    [f64; 3],
    id:       StationId,
    location: LatLng,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

fn unit_vector(p: LatLng) -> [f64; 3] {
    let (lat, lng) = (p.lat.to_radians(), p.lng.to_radians());
    [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestStation {
    pub station_id:  StationId,
    pub location:    LatLng,
    pub distance_km: f64,
}

/// R-tree over the stations that currently have a free port.
pub struct StationIndex {
    tree: RTree<StationEntry>,
}

impl StationIndex {
    pub fn build(fleet: &FleetState) -> Self {
        let entries: Vec<StationEntry> = fleet
            .stations()
            .iter()
            .filter(|s| s.has_free_port())
            .map(|s| StationEntry { point: unit_vector(s.location), id: s.id.clone(), location: s.location })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn nearest(&self, from: LatLng) -> Option<NearestStation> {
        self.tree.nearest_neighbor(&unit_vector(from)).map(|e| NearestStation {
            station_id:  e.id.clone(),
            location:    e.location,
            distance_km: from.distance_km(e.location),
        })
    }

    /// Up to `k` stations, nearest first.
    pub fn k_nearest(&self, from: LatLng, k: usize) -> Vec<NearestStation> {
        self.tree
            .nearest_neighbor_iter(&unit_vector(from))
            .take(k)
            .map(|e| NearestStation {
                station_id:  e.id.clone(),
                location:    e.location,
                distance_km: from.distance_km(e.location),
            })
            .collect()
    }
}

/// One-shot query.  Builds a fresh index; hold a [`StationIndex`] for
/// repeated queries.
pub fn nearest_available_station(fleet: &FleetState, from: LatLng) -> Option<NearestStation> {
    StationIndex::build(fleet).nearest(from)
}
