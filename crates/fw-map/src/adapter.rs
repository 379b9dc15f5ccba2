//! `MapAdapter`: lifecycle of one map bound to one container.
//!
//! # States
//!
//! ```text
//!              mount (ok)                 set_focus(Some)
//!  Unmounted ─────────────► Mounted ◄──────────────────► Mounted(focused)
//!     ▲   │                    │          set_focus(None)        │
//!     │   │ mount (surface     │ unmount                         │ unmount
//!     │   ▼  unavailable)      ▼                                 ▼
//!     │ Placeholder ──unmount──► Unmounted ◄─────────────────────┘
//!     │   │
//!     └───┘ mount retries
//! ```
//!
//! # Handles
//!
//! While mounted the adapter holds exactly one map handle, one tile layer,
//! at most one focus group, and the current marker set.  Unmount removes
//! every one of those layers, destroys the map, and forgets the handles.
//!
//! Focus and markers requested while not mounted are remembered and drawn on
//! the next successful mount.

use fw_core::{Bounds, FocusRef, MapConfig};
use tracing::{debug, info, warn};

use crate::{
    FocusChanged, FocusTarget, LayerHandle, MapHandle, MapSurface, MarkerSpec, SurfaceError,
    SurfaceResult, TimerId, TimerQueue,
};

/// Externally visible lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapStatus {
    Unmounted,
    /// Mount was attempted but the surface refused; nothing is interactive.
    Placeholder,
    Mounted,
}

enum AdapterState {
    Unmounted,
    Placeholder { reason: String },
    Mounted(LiveMap),
}

struct LiveMap {
    map:                MapHandle,
    tile:               LayerHandle,
    focus:              Option<FocusGroup>,
    markers:            Vec<(LayerHandle, FocusRef)>,
    pending_invalidate: Option<TimerId>,
}

impl LiveMap {
    fn layer_count(&self) -> usize {
        1 + self.focus.as_ref().map_or(0, |g| g.layers.len()) + self.markers.len()
    }
}

/// Layers drawn for the focused entity, removed as a unit.
struct FocusGroup {
    target: FocusRef,
    layers: Vec<LayerHandle>,
}

pub struct MapAdapter<S: MapSurface, T: TimerQueue> {
    surface:         S,
    timers:          T,
    container:       String,
    config:          MapConfig,
    state:           AdapterState,
    desired_focus:   Option<FocusTarget>,
    desired_markers: Vec<MarkerSpec>,
}

impl<S: MapSurface, T: TimerQueue> MapAdapter<S, T> {
    pub fn new(surface: S, timers: T, container: impl Into<String>, config: MapConfig) -> Self {
        Self {
            surface,
            timers,
            container: container.into(),
            config,
            state: AdapterState::Unmounted,
            desired_focus: None,
            desired_markers: Vec::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Create the map, attach the tile layer, schedule the first size
    /// invalidation, and draw any remembered markers and focus.
    ///
    /// A no-op while mounted.  If the surface is unavailable the adapter
    /// enters [`MapStatus::Placeholder`]; calling `mount` again retries.
    pub fn mount(&mut self) -> MapStatus {
        if matches!(self.state, AdapterState::Mounted(_)) {
            return MapStatus::Mounted;
        }

        let map = match self.surface.create_map(&self.container) {
            Ok(map) => map,
            Err(err) => return self.enter_placeholder(err),
        };
        let tile = match self.surface.add_tile_layer(map) {
            Ok(tile) => tile,
            Err(err) => {
                self.surface.destroy(map);
                return self.enter_placeholder(err);
            }
        };

        let mut live = LiveMap {
            map,
            tile,
            focus: None,
            markers: Vec::new(),
            pending_invalidate: Some(self.timers.schedule(self.config.invalidate_delay())),
        };
        info!(container = %self.container, %map, "map mounted");

        if let Err(err) = add_markers(&mut self.surface, &mut live, &self.desired_markers) {
            warn!(%map, %err, "marker set not drawn on mount");
        }
        if let Some(target) = &self.desired_focus {
            match build_focus(&mut self.surface, map, target, self.config.fit_padding_px) {
                Ok(group) => live.focus = Some(group),
                Err(err) => warn!(%map, focus = %target.focus_ref(), %err, "focus not drawn on mount"),
            }
        }

        self.state = AdapterState::Mounted(live);
        MapStatus::Mounted
    }

    /// Cancel the pending invalidation, remove every held layer, destroy the
    /// map, and return to `Unmounted`.  Idempotent.
    pub fn unmount(&mut self) {
        match std::mem::replace(&mut self.state, AdapterState::Unmounted) {
            AdapterState::Unmounted => {}
            AdapterState::Placeholder { .. } => debug!(container = %self.container, "placeholder cleared"),
            AdapterState::Mounted(mut live) => {
                if let Some(id) = live.pending_invalidate {
                    self.timers.cancel(id);
                }
                remove_focus_group(&mut self.surface, &mut live);
                remove_layers(&mut self.surface, live.map, live.markers.into_iter().map(|(l, _)| l));
                self.surface.remove_layer(live.map, live.tile);
                self.surface.destroy(live.map);
                info!(container = %self.container, map = %live.map, "map unmounted");
            }
        }
    }

    fn enter_placeholder(&mut self, err: SurfaceError) -> MapStatus {
        warn!(container = %self.container, %err, "map surface unavailable, showing placeholder");
        self.state = AdapterState::Placeholder { reason: err.to_string() };
        MapStatus::Placeholder
    }

    // ── Focus ─────────────────────────────────────────────────────────────

    /// Replace the focus group.
    ///
    /// The previous group is removed before anything new is drawn.  `None`
    /// only clears; the viewport is left where it is.  If drawing the new
    /// group fails, the layers already added are removed and no group is
    /// drawn, but the target stays requested and the next mount retries it.
    pub fn set_focus(&mut self, target: Option<FocusTarget>) {
        self.desired_focus = target;
        let AdapterState::Mounted(live) = &mut self.state else {
            debug!(focus = ?self.desired_focus.as_ref().map(FocusTarget::focus_ref), "focus deferred until mount");
            return;
        };

        remove_focus_group(&mut self.surface, live);
        let Some(target) = &self.desired_focus else {
            return;
        };
        match build_focus(&mut self.surface, live.map, target, self.config.fit_padding_px) {
            Ok(group) => {
                debug!(map = %live.map, focus = %group.target, layers = group.layers.len(), "focus group drawn");
                live.focus = Some(group);
            }
            Err(err) => {
                warn!(map = %live.map, focus = %target.focus_ref(), %err, "focus group rolled back until next mount");
            }
        }
    }

    pub fn clear_focus(&mut self) {
        self.desired_focus = None;
        if let AdapterState::Mounted(live) = &mut self.state {
            remove_focus_group(&mut self.surface, live);
        }
    }

    // ── Markers ───────────────────────────────────────────────────────────

    /// Replace the whole marker set.  Every previous marker is removed before
    /// the new set is added.  On failure the partial set is removed and the
    /// full set is drawn again on the next mount.
    pub fn set_markers(&mut self, specs: Vec<MarkerSpec>) {
        self.desired_markers = specs;
        let AdapterState::Mounted(live) = &mut self.state else {
            return;
        };
        let old = std::mem::take(&mut live.markers);
        remove_layers(&mut self.surface, live.map, old.into_iter().map(|(l, _)| l));
        if let Err(err) = add_markers(&mut self.surface, live, &self.desired_markers) {
            warn!(map = %live.map, markers = self.desired_markers.len(), %err, "marker set rolled back until next mount");
        }
    }

    /// Translate a click on `layer` into a focus request.  `None` if the layer
    /// is not one of the current markers.
    pub fn click_marker(&self, layer: LayerHandle) -> Option<FocusChanged> {
        let AdapterState::Mounted(live) = &self.state else {
            return None;
        };
        live.markers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, target)| FocusChanged { target: target.clone() })
    }

    // ── Resize and timers ─────────────────────────────────────────────────

    /// The container changed size: (re)schedule the delayed invalidation.
    /// At most one invalidation is pending at a time.
    pub fn on_container_resize(&mut self) {
        let AdapterState::Mounted(live) = &mut self.state else {
            return;
        };
        if let Some(old) = live.pending_invalidate.take() {
            self.timers.cancel(old);
        }
        live.pending_invalidate = Some(self.timers.schedule(self.config.invalidate_delay()));
    }

    /// Deliver a fired timer.  Invalidates the map only if `id` is the
    /// pending invalidation; anything else is stale and ignored.  Returns
    /// whether the map was invalidated.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        match &mut self.state {
            AdapterState::Mounted(live) if live.pending_invalidate == Some(id) => {
                live.pending_invalidate = None;
                self.surface.invalidate_size(live.map);
                debug!(map = %live.map, timer = %id, "map size invalidated");
                true
            }
            _ => {
                debug!(timer = %id, "ignoring stale timer");
                false
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn status(&self) -> MapStatus {
        match self.state {
            AdapterState::Unmounted => MapStatus::Unmounted,
            AdapterState::Placeholder { .. } => MapStatus::Placeholder,
            AdapterState::Mounted(_) => MapStatus::Mounted,
        }
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.status() == MapStatus::Mounted
    }

    /// Why the last mount fell back to a placeholder.
    pub fn placeholder_reason(&self) -> Option<&str> {
        match &self.state {
            AdapterState::Placeholder { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn map_handle(&self) -> Option<MapHandle> {
        match &self.state {
            AdapterState::Mounted(live) => Some(live.map),
            _ => None,
        }
    }

    /// The entity whose group is currently drawn.
    pub fn focused(&self) -> Option<&FocusRef> {
        match &self.state {
            AdapterState::Mounted(live) => live.focus.as_ref().map(|g| &g.target),
            _ => None,
        }
    }

    /// The focus that will be drawn on the next mount (or is drawn now).
    pub fn requested_focus(&self) -> Option<&FocusTarget> {
        self.desired_focus.as_ref()
    }

    pub fn focus_layers(&self) -> &[LayerHandle] {
        match &self.state {
            AdapterState::Mounted(live) => live.focus.as_ref().map_or(&[][..], |g| g.layers.as_slice()),
            _ => &[],
        }
    }

    pub fn marker_layers(&self) -> Vec<LayerHandle> {
        match &self.state {
            AdapterState::Mounted(live) => live.markers.iter().map(|(l, _)| *l).collect(),
            _ => Vec::new(),
        }
    }

    /// Layers held right now: tile, focus group, and markers.
    pub fn layer_count(&self) -> usize {
        match &self.state {
            AdapterState::Mounted(live) => live.layer_count(),
            _ => 0,
        }
    }

    pub fn pending_invalidation(&self) -> Option<TimerId> {
        match &self.state {
            AdapterState::Mounted(live) => live.pending_invalidate,
            _ => None,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn remove_focus_group<S: MapSurface>(surface: &mut S, live: &mut LiveMap) {
    if let Some(group) = live.focus.take() {
        debug!(map = %live.map, focus = %group.target, layers = group.layers.len(), "focus group removed");
        remove_layers(surface, live.map, group.layers);
    }
}

fn remove_layers<S: MapSurface>(surface: &mut S, map: MapHandle, layers: impl IntoIterator<Item = LayerHandle>) {
    for layer in layers {
        surface.remove_layer(map, layer);
    }
}

/// Draw the group for `target` and fit the viewport to it.  Nothing is left
/// on the map if any layer fails.
fn build_focus<S: MapSurface>(
    surface: &mut S,
    map:     MapHandle,
    target:  &FocusTarget,
    padding: u32,
) -> SurfaceResult<FocusGroup> {
    let mut layers = Vec::with_capacity(3);
    if let Err(err) = add_focus_layers(surface, map, target, &mut layers) {
        remove_layers(surface, map, layers);
        return Err(err);
    }
    if let Some(bounds) = Bounds::from_points(target.points()) {
        surface.fit_bounds(map, bounds, padding);
    }
    Ok(FocusGroup { target: target.focus_ref(), layers })
}

fn add_focus_layers<S: MapSurface>(
    surface: &mut S,
    map:     MapHandle,
    target:  &FocusTarget,
    layers:  &mut Vec<LayerHandle>,
) -> SurfaceResult<()> {
    match target {
        FocusTarget::Route { name, start, end, .. } => {
            layers.push(surface.add_marker(map, *start, &format!("Start: {name}"))?);
            layers.push(surface.add_marker(map, *end, &format!("End: {name}"))?);
            // start → waypoints → end; a direct segment without waypoints.
            layers.push(surface.add_polyline(map, &target.points())?);
        }
        FocusTarget::Station { name, location, .. } => {
            layers.push(surface.add_marker(map, *location, name)?);
        }
    }
    Ok(())
}

/// Add every marker in `specs` to `live.markers`.  On failure the markers added by this
/// call are removed again.
fn add_markers<S: MapSurface>(surface: &mut S, live: &mut LiveMap, specs: &[MarkerSpec]) -> SurfaceResult<()> {
    for spec in specs {
        match surface.add_marker(live.map, spec.position, &spec.popup) {
            Ok(layer) => live.markers.push((layer, spec.target.clone())),
            Err(err) => {
                let added = std::mem::take(&mut live.markers);
                remove_layers(surface, live.map, added.into_iter().map(|(l, _)| l));
                return Err(err);
            }
        }
    }
    debug!(map = %live.map, markers = live.markers.len(), "marker set drawn");
    Ok(())
}
