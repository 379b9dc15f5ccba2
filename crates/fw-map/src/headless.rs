//! In-memory [`MapSurface`] that records every call.
//!
//! Used by the test suites and the demo binary.  Each live map keeps its
//! layers, `fit_bounds` calls, and invalidation count; destroyed maps are
//! remembered by handle only.
//!
//! Two failure switches exist for exercising the adapter's recovery paths:
//! [`set_available`](HeadlessSurface::set_available) makes `create_map` fail,
//! and [`fail_layer_after`](HeadlessSurface::fail_layer_after) lets `n` more
//! layer additions succeed and fails the next one.

use std::collections::BTreeMap;

use fw_core::{Bounds, LatLng};

use crate::{LayerHandle, MapHandle, MapSurface, SurfaceError, SurfaceResult};

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedLayer {
    Tile,
    Marker { at: LatLng, popup: String },
    Polyline { path: Vec<LatLng> },
}

#[derive(Clone, Debug, Default)]
pub struct RecordedMap {
    pub container:     String,
    pub layers:        BTreeMap<LayerHandle, RecordedLayer>,
    pub fits:          Vec<(Bounds, u32)>,
    pub invalidations: usize,
}

impl RecordedMap {
    pub fn markers(&self) -> impl Iterator<Item = (LayerHandle, &RecordedLayer)> + '_ {
        self.layers
            .iter()
            .filter(|(_, l)| matches!(l, RecordedLayer::Marker { .. }))
            .map(|(h, l)| (*h, l))
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[LatLng]> + '_ {
        self.layers.values().filter_map(|l| match l {
            RecordedLayer::Polyline { path } => Some(path.as_slice()),
            _ => None,
        })
    }

    pub fn tile_count(&self) -> usize {
        self.layers.values().filter(|l| **l == RecordedLayer::Tile).count()
    }
}

#[derive(Debug)]
pub struct HeadlessSurface {
    next_handle:      u64,
    live:             BTreeMap<MapHandle, RecordedMap>,
    destroyed:        Vec<MapHandle>,
    created:          usize,
    available:        bool,
    fail_layer_after: Option<usize>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            next_handle:      0,
            live:             BTreeMap::new(),
            destroyed:        Vec::new(),
            created:          0,
            available:        true,
            fail_layer_after: None,
        }
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `create_map` fails until made available.
    pub fn unavailable() -> Self {
        Self { available: false, ..Self::default() }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Let `n` more layer additions succeed, then fail exactly one.
    pub fn fail_layer_after(&mut self, n: usize) {
        self.fail_layer_after = Some(n);
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn live_map_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> &[MapHandle] {
        &self.destroyed
    }

    pub fn map(&self, handle: MapHandle) -> Option<&RecordedMap> {
        self.live.get(&handle)
    }

    /// Layers on `handle`, or 0 if it is not live.
    pub fn layer_count(&self, handle: MapHandle) -> usize {
        self.live.get(&handle).map_or(0, |m| m.layers.len())
    }

    /// Layers across every live map.
    pub fn total_layer_count(&self) -> usize {
        self.live.values().map(|m| m.layers.len()).sum()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn mint(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn add_layer(&mut self, map: MapHandle, layer: RecordedLayer) -> SurfaceResult<LayerHandle> {
        if !self.live.contains_key(&map) {
            return Err(SurfaceError::UnknownMap(map));
        }
        match self.fail_layer_after {
            Some(0) => {
                self.fail_layer_after = None;
                return Err(SurfaceError::Unavailable("injected layer failure".into()));
            }
            Some(n) => self.fail_layer_after = Some(n - 1),
            None => {}
        }
        let handle = LayerHandle(self.mint());
        if let Some(m) = self.live.get_mut(&map) {
            m.layers.insert(handle, layer);
        }
        Ok(handle)
    }
}

impl MapSurface for HeadlessSurface {
    fn create_map(&mut self, container: &str) -> SurfaceResult<MapHandle> {
        if !self.available {
            return Err(SurfaceError::Unavailable("headless surface offline".into()));
        }
        if self.live.values().any(|m| m.container == container) {
            return Err(SurfaceError::ContainerBusy(container.to_owned()));
        }
        let handle = MapHandle(self.mint());
        self.live.insert(handle, RecordedMap { container: container.to_owned(), ..RecordedMap::default() });
        self.created += 1;
        Ok(handle)
    }

    fn add_tile_layer(&mut self, map: MapHandle) -> SurfaceResult<LayerHandle> {
        self.add_layer(map, RecordedLayer::Tile)
    }

    fn add_marker(&mut self, map: MapHandle, at: LatLng, popup: &str) -> SurfaceResult<LayerHandle> {
        self.add_layer(map, RecordedLayer::Marker { at, popup: popup.to_owned() })
    }

    fn add_polyline(&mut self, map: MapHandle, path: &[LatLng]) -> SurfaceResult<LayerHandle> {
        self.add_layer(map, RecordedLayer::Polyline { path: path.to_vec() })
    }

    fn remove_layer(&mut self, map: MapHandle, layer: LayerHandle) {
        if let Some(m) = self.live.get_mut(&map) {
            m.layers.remove(&layer);
        }
    }

    fn fit_bounds(&mut self, map: MapHandle, bounds: Bounds, padding_px: u32) {
        if let Some(m) = self.live.get_mut(&map) {
            m.fits.push((bounds, padding_px));
        }
    }

    fn invalidate_size(&mut self, map: MapHandle) {
        if let Some(m) = self.live.get_mut(&map) {
            m.invalidations += 1;
        }
    }

    fn destroy(&mut self, map: MapHandle) {
        if self.live.remove(&map).is_some() {
            self.destroyed.push(map);
        }
    }
}
