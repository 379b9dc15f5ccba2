//! The map-library seam.
//!
//! `MapSurface` is the only place the engine touches a concrete map library.
//! Handles are opaque numbers minted by the surface; the adapter stores them
//! and hands them back, nothing else.

use std::fmt;

use fw_core::{Bounds, LatLng};
use serde::{Deserialize, Serialize};

use crate::SurfaceResult;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MapHandle(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

impl fmt::Display for MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

impl fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Operations the adapter needs from a map library.
///
/// Creating calls can fail (library not loaded, container missing).  The
/// remaining calls act on handles the surface issued and are infallible
/// from the adapter's point of view; a surface should ignore handles it
/// does not recognise.
pub trait MapSurface {
    /// Bind a new map to `container`.
    fn create_map(&mut self, container: &str) -> SurfaceResult<MapHandle>;

    fn add_tile_layer(&mut self, map: MapHandle) -> SurfaceResult<LayerHandle>;

    fn add_marker(&mut self, map: MapHandle, at: LatLng, popup: &str) -> SurfaceResult<LayerHandle>;

    fn add_polyline(&mut self, map: MapHandle, path: &[LatLng]) -> SurfaceResult<LayerHandle>;

    fn remove_layer(&mut self, map: MapHandle, layer: LayerHandle);

    fn fit_bounds(&mut self, map: MapHandle, bounds: Bounds, padding_px: u32);

    /// Recompute the map's size after its container changed.
    fn invalidate_size(&mut self, map: MapHandle);

    /// Tear the map down and release the container.
    fn destroy(&mut self, map: MapHandle);
}
