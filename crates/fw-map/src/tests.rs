//! Unit tests for fw-map.

#[cfg(test)]
mod fixtures {
    use fw_core::{FocusRef, LatLng, MapConfig, RouteId, StationId};

    use crate::{FocusTarget, HeadlessSurface, ManualTimers, MapAdapter, MarkerSpec};

    pub type TestAdapter = MapAdapter<HeadlessSurface, ManualTimers>;

    pub fn adapter() -> TestAdapter {
        MapAdapter::new(HeadlessSurface::new(), ManualTimers::new(), "fleet-map", MapConfig::default())
    }

    pub fn route(n: u32, waypoints: Vec<LatLng>) -> FocusTarget {
        FocusTarget::Route {
            id:    RouteId::from_seq(n),
            name:  format!("Route {n}"),
            start: LatLng::new(37.0, -122.0),
            end:   LatLng::new(37.5, -121.5),
            waypoints,
        }
    }

    pub fn station(n: u32) -> FocusTarget {
        FocusTarget::Station {
            id:       StationId::from_seq(n),
            name:     format!("Station {n}"),
            location: LatLng::new(37.7, -122.4),
        }
    }

    pub fn marker(n: u32) -> MarkerSpec {
        MarkerSpec {
            target:   FocusRef::Station(StationId::from_seq(n)),
            position: LatLng::new(37.0 + f64::from(n) * 0.01, -122.0),
            popup:    format!("CS-{n:03}"),
        }
    }
}

#[cfg(test)]
mod lifecycle {
    use std::time::Duration;

    use super::fixtures::{adapter, route};
    use crate::{HeadlessSurface, ManualTimers, MapAdapter, MapStatus, RecordedLayer};

    #[test]
    fn mount_creates_one_map_with_one_tile_layer() {
        let mut a = adapter();
        assert_eq!(a.mount(), MapStatus::Mounted);
        let map = a.map_handle().unwrap();

        let recorded = a.surface().map(map).unwrap();
        assert_eq!(recorded.container, "fleet-map");
        assert_eq!(recorded.tile_count(), 1);
        assert_eq!(a.layer_count(), 1);
        assert!(a.pending_invalidation().is_some());
    }

    #[test]
    fn mount_is_idempotent() {
        let mut a = adapter();
        a.mount();
        let map = a.map_handle();
        a.mount();
        assert_eq!(a.map_handle(), map);
        assert_eq!(a.surface().created_count(), 1);
        assert_eq!(a.surface().total_layer_count(), 1);
    }

    #[test]
    fn unmount_while_focused_leaves_nothing() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(route(1, Vec::new())));
        let map = a.map_handle().unwrap();
        let timer = a.pending_invalidation().unwrap();

        a.unmount();
        assert_eq!(a.status(), MapStatus::Unmounted);
        assert_eq!(a.layer_count(), 0);
        assert_eq!(a.surface().total_layer_count(), 0);
        assert_eq!(a.surface().live_map_count(), 0);
        assert_eq!(a.surface().destroyed(), [map]);
        assert!(!a.timers().is_pending(timer));
        assert!(a.map_handle().is_none());
    }

    #[test]
    fn unmount_twice_is_harmless() {
        let mut a = adapter();
        a.mount();
        a.unmount();
        a.unmount();
        assert_eq!(a.surface().destroyed().len(), 1);
    }

    #[test]
    fn remount_yields_exactly_one_live_map() {
        let mut a = adapter();
        for _ in 0..3 {
            a.mount();
            a.unmount();
        }
        a.mount();
        assert_eq!(a.surface().live_map_count(), 1);
        assert_eq!(a.surface().created_count(), 4);
        assert_eq!(a.surface().destroyed().len(), 3);
    }

    #[test]
    fn remount_redraws_remembered_focus() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(route(2, Vec::new())));
        a.unmount();
        a.mount();

        assert_eq!(a.focused().map(ToString::to_string).as_deref(), Some("route RT-002"));
        assert_eq!(a.focus_layers().len(), 3);
    }

    #[test]
    fn focus_before_mount_is_drawn_on_mount() {
        let mut a = adapter();
        a.set_focus(Some(route(1, Vec::new())));
        assert!(a.focused().is_none());
        a.mount();
        let map = a.map_handle().unwrap();
        let recorded = a.surface().map(map).unwrap();
        assert_eq!(recorded.markers().count(), 2);
        assert_eq!(recorded.fits.len(), 1);
    }

    #[test]
    fn unavailable_surface_gives_placeholder_then_recovers() {
        let mut a = MapAdapter::new(HeadlessSurface::unavailable(), ManualTimers::new(), "fleet-map", Default::default());
        a.set_focus(Some(route(1, Vec::new())));

        assert_eq!(a.mount(), MapStatus::Placeholder);
        assert!(a.placeholder_reason().unwrap().contains("unavailable"));
        assert_eq!(a.layer_count(), 0);
        assert!(a.timers().is_empty());

        a.surface_mut().set_available(true);
        assert_eq!(a.mount(), MapStatus::Mounted);
        assert!(a.placeholder_reason().is_none());
        assert_eq!(a.focus_layers().len(), 3);
    }

    #[test]
    fn busy_container_gives_placeholder() {
        let mut surface = HeadlessSurface::new();
        use crate::MapSurface;
        surface.create_map("fleet-map").unwrap();

        let mut a = MapAdapter::new(surface, ManualTimers::new(), "fleet-map", Default::default());
        assert_eq!(a.mount(), MapStatus::Placeholder);
        assert!(a.placeholder_reason().unwrap().contains("already bound"));
    }

    #[test]
    fn tile_failure_destroys_half_built_map() {
        let mut a = adapter();
        a.surface_mut().fail_layer_after(0);
        assert_eq!(a.mount(), MapStatus::Placeholder);
        assert_eq!(a.surface().live_map_count(), 0);
        assert_eq!(a.surface().destroyed().len(), 1);
    }

    #[test]
    fn invalidation_fires_after_delay() {
        let mut a = adapter();
        a.mount();
        let map = a.map_handle().unwrap();

        assert!(a.timers_mut().advance(Duration::from_millis(50)).is_empty());
        let fired = a.timers_mut().advance(Duration::from_millis(50));
        assert_eq!(fired.len(), 1);
        assert!(a.on_timer(fired[0]));
        assert_eq!(a.surface().map(map).unwrap().invalidations, 1);
        assert!(a.pending_invalidation().is_none());
    }

    #[test]
    fn resize_keeps_one_pending_invalidation() {
        let mut a = adapter();
        a.mount();
        let first = a.pending_invalidation().unwrap();
        a.on_container_resize();
        a.on_container_resize();
        let last = a.pending_invalidation().unwrap();

        assert_ne!(first, last);
        assert_eq!(a.timers().len(), 1);
        assert!(!a.on_timer(first));
        let fired = a.timers_mut().advance(Duration::from_millis(100));
        assert_eq!(fired, [last]);
        assert!(a.on_timer(last));
    }

    #[test]
    fn stale_timer_after_unmount_is_ignored() {
        let mut a = adapter();
        a.mount();
        let timer = a.pending_invalidation().unwrap();
        a.unmount();
        assert!(!a.on_timer(timer));

        a.mount();
        assert!(!a.on_timer(timer));
        let map = a.map_handle().unwrap();
        assert_eq!(a.surface().map(map).unwrap().invalidations, 0);
    }

    #[test]
    fn layers_recorded_as_expected_kinds() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(route(1, Vec::new())));
        let map = a.map_handle().unwrap();
        let kinds: Vec<&RecordedLayer> = a.surface().map(map).unwrap().layers.values().collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[0], &RecordedLayer::Tile);
    }
}

#[cfg(test)]
mod focus {
    use fw_core::{Bounds, FleetError, FocusRef, LatLng, RouteId};

    use super::fixtures::{adapter, route, station};
    use crate::SurfaceError;

    #[test]
    fn route_group_has_two_markers_and_a_polyline() {
        let mut a = adapter();
        a.mount();
        let wp = vec![LatLng::new(37.2, -121.8), LatLng::new(37.3, -121.7)];
        a.set_focus(Some(route(1, wp.clone())));

        let map = a.map_handle().unwrap();
        let recorded = a.surface().map(map).unwrap();
        let popups: Vec<String> = recorded
            .markers()
            .map(|(_, l)| match l {
                crate::RecordedLayer::Marker { popup, .. } => popup.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(popups, ["Start: Route 1", "End: Route 1"]);

        let lines: Vec<&[LatLng]> = recorded.polylines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
        assert_eq!(lines[0][1], wp[0]);
    }

    #[test]
    fn route_without_waypoints_is_a_direct_line() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(route(1, Vec::new())));
        let map = a.map_handle().unwrap();
        let line = a.surface().map(map).unwrap().polylines().next().unwrap().to_vec();
        assert_eq!(line, [LatLng::new(37.0, -122.0), LatLng::new(37.5, -121.5)]);
    }

    #[test]
    fn viewport_fits_group_with_padding() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(route(1, Vec::new())));
        let map = a.map_handle().unwrap();
        let fits = &a.surface().map(map).unwrap().fits;
        let expected = Bounds { south_west: LatLng::new(37.0, -122.0), north_east: LatLng::new(37.5, -121.5) };
        assert_eq!(fits.as_slice(), [(expected, 50)]);
    }

    #[test]
    fn switching_focus_leaves_only_the_new_group() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(route(1, Vec::new())));
        let old_layers = a.focus_layers().to_vec();
        a.set_focus(Some(station(3)));

        let map = a.map_handle().unwrap();
        let recorded = a.surface().map(map).unwrap();
        assert!(old_layers.iter().all(|l| !recorded.layers.contains_key(l)));
        assert_eq!(a.focus_layers().len(), 1);
        assert_eq!(recorded.layers.len(), 2); // tile + station marker
        assert_eq!(a.focused().map(ToString::to_string).as_deref(), Some("station CS-003"));
    }

    #[test]
    fn clear_focus_keeps_viewport() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(station(1)));
        a.clear_focus();
        let map = a.map_handle().unwrap();
        let recorded = a.surface().map(map).unwrap();
        assert_eq!(recorded.layers.len(), 1);
        assert_eq!(recorded.fits.len(), 1);
        assert!(a.focused().is_none());
        assert!(a.requested_focus().is_none());
    }

    #[test]
    fn failed_group_is_rolled_back() {
        let mut a = adapter();
        a.mount();
        a.set_focus(Some(station(1)));
        // Start and end markers succeed, the polyline fails.
        a.surface_mut().fail_layer_after(2);
        a.set_focus(Some(route(1, Vec::new())));

        let map = a.map_handle().unwrap();
        assert_eq!(a.surface().layer_count(map), 1);
        assert!(a.focused().is_none());
        assert!(a.focus_layers().is_empty());
        assert_eq!(a.requested_focus().map(|t| t.focus_ref()), Some(FocusRef::Route(RouteId::from_seq(1))));
    }

    #[test]
    fn failed_group_is_redrawn_on_next_mount() {
        let mut a = adapter();
        a.mount();
        a.surface_mut().fail_layer_after(0);
        a.set_focus(Some(route(1, Vec::new())));
        assert!(a.focused().is_none());

        a.unmount();
        a.mount();
        assert_eq!(a.focused(), Some(&FocusRef::Route(RouteId::from_seq(1))));
        assert_eq!(a.focus_layers().len(), 3);
    }

    #[test]
    fn surface_errors_convert_to_fleet_errors() {
        let err: FleetError = SurfaceError::ContainerBusy("fleet-map".into()).into();
        assert!(matches!(err, FleetError::MapSurfaceUnavailable(msg) if msg.contains("fleet-map")));
    }
}

#[cfg(test)]
mod markers {
    use fw_core::{FocusRef, StationId};

    use super::fixtures::{adapter, marker};
    use crate::FocusChanged;

    #[test]
    fn set_markers_replaces_the_whole_set() {
        let mut a = adapter();
        a.mount();
        a.set_markers(vec![marker(1), marker(2), marker(3)]);
        let first = a.marker_layers();
        a.set_markers(vec![marker(4)]);

        let map = a.map_handle().unwrap();
        let recorded = a.surface().map(map).unwrap();
        assert!(first.iter().all(|l| !recorded.layers.contains_key(l)));
        assert_eq!(recorded.markers().count(), 1);
        assert_eq!(a.layer_count(), 2);
    }

    #[test]
    fn click_returns_focus_event() {
        let mut a = adapter();
        a.mount();
        a.set_markers(vec![marker(1), marker(2)]);
        let layer = a.marker_layers()[1];

        assert_eq!(
            a.click_marker(layer),
            Some(FocusChanged { target: FocusRef::Station(StationId::from_seq(2)) })
        );
        assert!(a.focused().is_none());
        assert_eq!(a.click_marker(crate::LayerHandle(9_999)), None);
    }

    #[test]
    fn markers_before_mount_are_drawn_on_mount() {
        let mut a = adapter();
        a.set_markers(vec![marker(1), marker(2)]);
        assert!(a.marker_layers().is_empty());
        a.mount();
        assert_eq!(a.marker_layers().len(), 2);
    }

    #[test]
    fn failed_marker_set_leaves_no_markers() {
        let mut a = adapter();
        a.mount();
        a.surface_mut().fail_layer_after(1);
        a.set_markers(vec![marker(1), marker(2), marker(3)]);
        assert!(a.marker_layers().is_empty());
        assert_eq!(a.surface().total_layer_count(), 1);
    }

    #[test]
    fn failed_marker_set_is_redrawn_on_next_mount() {
        let mut a = adapter();
        a.mount();
        a.surface_mut().fail_layer_after(1);
        a.set_markers(vec![marker(1), marker(2), marker(3)]);

        a.unmount();
        a.mount();
        assert_eq!(a.marker_layers().len(), 3);
        assert_eq!(a.layer_count(), 4);
    }
}

#[cfg(test)]
mod timers {
    use std::time::Duration;

    use crate::{ManualTimers, TimerQueue};

    #[test]
    fn fire_in_deadline_order() {
        let mut t = ManualTimers::new();
        let late = t.schedule(Duration::from_millis(300));
        let early = t.schedule(Duration::from_millis(100));
        let tie = t.schedule(Duration::from_millis(100));
        assert_eq!(t.advance(Duration::from_millis(300)), [early, tie, late]);
        assert!(t.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut t = ManualTimers::new();
        let id = t.schedule(Duration::from_millis(10));
        t.cancel(id);
        t.cancel(id);
        assert!(t.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(t.now(), Duration::from_secs(1));
    }
}
