//! Unit tests for fw-aggregate.

#[cfg(test)]
mod fixtures {
    use chrono::{TimeZone, Utc};
    use fw_core::{LatLng, StationId, VehicleId};
    use fw_store::{ChargingStation, FleetState, StationStatus, Vehicle, VehicleStatus};

    pub fn vehicle(id: &str, soc: f64, temp: f64, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id:                   VehicleId::from(id),
            model:                "Test".into(),
            license_plate:        id.into(),
            status,
            battery_capacity_kwh: 80.0,
            soc,
            soh:                  90.0,
            odometer_km:          1_000.0,
            assigned_driver:      None,
            location:             LatLng::new(0.0, 0.0),
            temperature_c:        temp,
            last_update:          Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn station(id: &str, at: LatLng, status: StationStatus, total: u32, available: u32) -> ChargingStation {
        ChargingStation {
            id:              StationId::from(id),
            name:            id.into(),
            location:        at,
            status,
            total_ports:     total,
            available_ports: available,
            power_output_kw: 150.0,
            cost_per_kwh:    0.4,
        }
    }

    pub fn fleet_of(vehicles: impl IntoIterator<Item = Vehicle>) -> FleetState {
        let mut fleet = FleetState::default();
        for v in vehicles {
            fleet.upsert_vehicle(v);
        }
        fleet
    }
}

#[cfg(test)]
mod summary {
    use fw_store::{FleetState, VehicleStatus};

    use super::fixtures::{fleet_of, vehicle};
    use crate::fleet_summary;

    #[test]
    fn empty_fleet_is_all_zero() {
        let s = fleet_summary(&FleetState::default());
        assert_eq!(s.total_vehicles, 0);
        assert_eq!(s.active_vehicles, 0);
        assert_eq!(s.avg_temperature_c, 0.0);
        assert_eq!(s.avg_soc, 0.0);
        assert_eq!(s.total_energy_kwh, 0.0);
    }

    #[test]
    fn totals_and_averages() {
        let fleet = fleet_of([
            vehicle("EV-001", 50.0, 30.0, VehicleStatus::Moving),
            vehicle("EV-002", 100.0, 20.0, VehicleStatus::Idle),
            vehicle("EV-003", 75.0, 40.0, VehicleStatus::Maintenance),
        ]);
        let s = fleet_summary(&fleet);

        assert_eq!(s.total_vehicles, 3);
        assert_eq!(s.active_vehicles, 2);
        assert_eq!(s.by_status.moving, 1);
        assert_eq!(s.by_status.get(VehicleStatus::Maintenance), 1);
        assert_eq!(s.by_status.charging, 0);
        assert_eq!(s.total_distance_km, 3_000.0);
        // 80 × 0.5 + 0 + 80 × 0.25
        assert!((s.total_energy_kwh - 60.0).abs() < 1e-9);
        assert!((s.avg_temperature_c - 30.0).abs() < 1e-9);
        assert!((s.avg_soc - 75.0).abs() < 1e-9);
    }

    #[test]
    fn recomputation_is_stable() {
        let fleet = fleet_of([vehicle("EV-001", 61.3, 33.3, VehicleStatus::Charging)]);
        assert_eq!(fleet_summary(&fleet), fleet_summary(&fleet));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(fleet_summary(&FleetState::default())).unwrap();
        assert_eq!(json["totalVehicles"], 0);
        assert_eq!(json["byStatus"]["maintenance"], 0);
    }
}

#[cfg(test)]
mod critical {
    use fw_core::CriticalThresholds;
    use fw_store::VehicleStatus;

    use super::fixtures::{fleet_of, vehicle};
    use crate::{critical_count, critical_list, fleet_summary, is_critical, CriticalReason};

    #[test]
    fn hot_vehicle_is_critical() {
        let v = vehicle("EV-001", 80.0, 46.0, VehicleStatus::Idle);
        assert!(is_critical(&v, &CriticalThresholds::default()));
    }

    #[test]
    fn vehicle_inside_thresholds_is_not() {
        let v = vehicle("EV-001", 25.0, 44.0, VehicleStatus::Idle);
        assert!(!is_critical(&v, &CriticalThresholds::default()));
    }

    #[test]
    fn thresholds_are_strict() {
        let v = vehicle("EV-001", 20.0, 45.0, VehicleStatus::Moving);
        assert!(!is_critical(&v, &CriticalThresholds::default()));
    }

    #[test]
    fn low_charge_scenario() {
        let fleet = fleet_of([vehicle("EV-001", 15.0, 30.0, VehicleStatus::Idle)]);
        let list = critical_list(&fleet, &CriticalThresholds::default());
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].reasons, [CriticalReason::LowCharge]);
        assert_eq!(fleet_summary(&fleet).by_status.idle, 1);
    }

    #[test]
    fn every_reason_listed_in_store_order() {
        let fleet = fleet_of([
            vehicle("EV-001", 10.0, 50.0, VehicleStatus::Maintenance),
            vehicle("EV-002", 90.0, 25.0, VehicleStatus::Moving),
            vehicle("EV-003", 90.0, 25.0, VehicleStatus::Maintenance),
        ]);
        let thresholds = CriticalThresholds::default();
        let list = critical_list(&fleet, &thresholds);

        let ids: Vec<&str> = list.iter().map(|c| c.vehicle_id.as_str()).collect();
        assert_eq!(ids, ["EV-001", "EV-003"]);
        assert_eq!(
            list[0].reasons,
            [CriticalReason::Overheating, CriticalReason::LowCharge, CriticalReason::Maintenance]
        );
        assert_eq!(critical_count(&fleet, &thresholds), 2);
    }

    #[test]
    fn custom_thresholds() {
        let fleet = fleet_of([vehicle("EV-001", 35.0, 30.0, VehicleStatus::Idle)]);
        let strict = CriticalThresholds { max_temperature_c: 45.0, min_soc: 40.0 };
        assert_eq!(critical_list(&fleet, &strict).len(), 1);
        assert!(critical_list(&fleet, &CriticalThresholds::default()).is_empty());
    }
}

#[cfg(test)]
mod stations_and_routes {
    use fw_core::{LatLng, RouteId};
    use fw_store::{FleetState, Route, RouteStatus, StationStatus};

    use super::fixtures::station;
    use crate::{route_summary, station_summary};

    #[test]
    fn station_counts_and_utilisation() {
        let mut fleet = FleetState::default();
        fleet.upsert_station(station("CS-001", LatLng::new(0.0, 0.0), StationStatus::Available, 4, 3));
        fleet.upsert_station(station("CS-002", LatLng::new(0.0, 1.0), StationStatus::InUse, 4, 0));
        fleet.upsert_station(station("CS-003", LatLng::new(0.0, 2.0), StationStatus::Offline, 2, 2));
        let s = station_summary(&fleet);

        assert_eq!((s.available, s.in_use, s.offline), (1, 1, 1));
        assert_eq!((s.total_ports, s.available_ports), (10, 5));
        // 5 of the 8 ports at online stations are occupied.
        assert!((s.utilisation - 0.625).abs() < 1e-9);
    }

    #[test]
    fn offline_fleet_has_zero_utilisation() {
        let mut fleet = FleetState::default();
        fleet.upsert_station(station("CS-001", LatLng::new(0.0, 0.0), StationStatus::Offline, 4, 4));
        fleet.upsert_station(station("CS-002", LatLng::new(0.0, 1.0), StationStatus::Offline, 2, 2));
        let s = station_summary(&fleet);
        assert_eq!((s.offline, s.total_ports), (2, 6));
        assert_eq!(s.utilisation, 0.0);
    }

    #[test]
    fn no_stations_zero_utilisation() {
        assert_eq!(station_summary(&FleetState::default()).utilisation, 0.0);
    }

    #[test]
    fn route_counts() {
        let mut fleet = FleetState::default();
        for (n, status, km) in [(1, RouteStatus::Active, 10.0), (2, RouteStatus::Scheduled, 5.5), (3, RouteStatus::Scheduled, 4.5)] {
            fleet.upsert_route(Route {
                id:                     RouteId::from_seq(n),
                name:                   format!("R{n}"),
                status,
                assigned_vehicle:       None,
                start:                  LatLng::new(0.0, 0.0),
                end:                    LatLng::new(1.0, 1.0),
                waypoints:              Vec::new(),
                distance_km:            km,
                estimated_duration_min: 30,
                estimated_energy_kwh:   None,
            });
        }
        let s = route_summary(&fleet);
        assert_eq!((s.total_routes, s.active, s.scheduled, s.completed), (3, 1, 2, 0));
        assert_eq!(s.assigned, 0);
        assert!((s.total_distance_km - 20.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod nearest {
    use fw_core::LatLng;
    use fw_store::{FleetState, StationStatus};

    use super::fixtures::station;
    use crate::{nearest_available_station, StationIndex};

    fn bay_area() -> FleetState {
        let mut fleet = FleetState::default();
        fleet.upsert_station(station("CS-001", LatLng::new(37.7706, -122.3892), StationStatus::Available, 4, 2));
        fleet.upsert_station(station("CS-002", LatLng::new(37.7955, -122.2767), StationStatus::InUse, 4, 0));
        fleet.upsert_station(station("CS-003", LatLng::new(37.4419, -122.1430), StationStatus::Available, 4, 4));
        fleet.upsert_station(station("CS-004", LatLng::new(37.8044, -122.2712), StationStatus::Offline, 4, 4));
        fleet
    }

    #[test]
    fn skips_full_and_offline_stations() {
        let fleet = bay_area();
        // Right next to the full Oakland station and the offline one.
        let hit = nearest_available_station(&fleet, LatLng::new(37.80, -122.27)).unwrap();
        assert_eq!(hit.station_id.as_str(), "CS-001");
        assert!(hit.distance_km > 5.0 && hit.distance_km < 15.0, "got {}", hit.distance_km);
    }

    #[test]
    fn k_nearest_sorted() {
        let index = StationIndex::build(&bay_area());
        assert_eq!(index.len(), 2);
        let hits = index.k_nearest(LatLng::new(37.45, -122.15), 5);
        let ids: Vec<&str> = hits.iter().map(|h| h.station_id.as_str()).collect();
        assert_eq!(ids, ["CS-003", "CS-001"]);
        assert!(hits[0].distance_km < hits[1].distance_km);
    }

    #[test]
    fn no_candidates_is_none() {
        assert!(nearest_available_station(&FleetState::default(), LatLng::new(0.0, 0.0)).is_none());
    }
}
