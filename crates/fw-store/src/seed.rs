//! Built-in demo fleet around the San Francisco Bay.
//!
//! Used by the `fleetwatch` demo and by tests that want a realistic,
//! already-linked starting state.  The data is fixed, so only `now` varies.

use fw_core::{DriverId, LatLng, RouteId, StationId, Timestamp, VehicleId};

use crate::entity::{
    ChargingStation, Driver, Route, RouteStatus, StationStatus, Vehicle, VehicleStatus,
};
use crate::{FieldLimits, FleetState, FleetStateBuilder};

struct VehicleSeed {
    model:    &'static str,
    plate:    &'static str,
    status:   VehicleStatus,
    capacity: f64,
    soc:      f64,
    soh:      f64,
    odometer: f64,
    at:       (f64, f64),
    temp:     f64,
}

const VEHICLES: &[VehicleSeed] = &[
    VehicleSeed { model: "Tesla Model 3",    plate: "7ABC123", status: VehicleStatus::Moving,      capacity: 75.0,  soc: 78.0, soh: 96.0, odometer: 18_420.0, at: (37.7749, -122.4194), temp: 31.0 },
    VehicleSeed { model: "Nissan Leaf",      plate: "8DEF456", status: VehicleStatus::Charging,    capacity: 62.0,  soc: 34.0, soh: 89.0, odometer: 42_115.0, at: (37.7849, -122.4094), temp: 28.5 },
    VehicleSeed { model: "Chevrolet Bolt",   plate: "6GHI789", status: VehicleStatus::Idle,        capacity: 65.0,  soc: 15.0, soh: 92.0, odometer: 27_903.0, at: (37.7649, -122.4294), temp: 30.0 },
    VehicleSeed { model: "Ford E-Transit",   plate: "9JKL012", status: VehicleStatus::Moving,      capacity: 89.0,  soc: 61.0, soh: 94.0, odometer: 9_870.0,  at: (37.8044, -122.2712), temp: 46.5 },
    VehicleSeed { model: "Rivian EDV 700",   plate: "5MNO345", status: VehicleStatus::Maintenance, capacity: 135.0, soc: 52.0, soh: 81.0, odometer: 63_250.0, at: (37.3382, -121.8863), temp: 24.0 },
    VehicleSeed { model: "Hyundai Ioniq 5",  plate: "4PQR678", status: VehicleStatus::Idle,        capacity: 77.4,  soc: 92.0, soh: 98.0, odometer: 5_112.0,  at: (37.5485, -121.9886), temp: 26.0 },
];

struct DriverSeed {
    name:       &'static str,
    phone:      &'static str,
    license:    &'static str,
    vehicle:    Option<u32>,
    safety:     f64,
    efficiency: f64,
    trips:      u32,
}

const DRIVERS: &[DriverSeed] = &[
    DriverSeed { name: "Maya Chen",      phone: "+1-415-555-0101", license: "D1234567", vehicle: Some(1), safety: 94.0, efficiency: 88.0, trips: 412 },
    DriverSeed { name: "Luis Ortega",    phone: "+1-415-555-0102", license: "D2345678", vehicle: Some(2), safety: 87.0, efficiency: 91.0, trips: 289 },
    DriverSeed { name: "Priya Raman",    phone: "+1-510-555-0103", license: "D3456789", vehicle: Some(4), safety: 91.0, efficiency: 84.0, trips: 356 },
    DriverSeed { name: "Sam Okafor",     phone: "+1-408-555-0104", license: "D4567890", vehicle: None,    safety: 78.0, efficiency: 80.0, trips: 97 },
];

struct StationSeed {
    name:      &'static str,
    at:        (f64, f64),
    status:    StationStatus,
    total:     u32,
    available: u32,
    power_kw:  f64,
    cost:      f64,
}

const STATIONS: &[StationSeed] = &[
    StationSeed { name: "Mission Bay Supercharger", at: (37.7706, -122.3892), status: StationStatus::Available, total: 12, available: 7, power_kw: 250.0, cost: 0.42 },
    StationSeed { name: "Oakland Depot",            at: (37.7955, -122.2767), status: StationStatus::InUse,     total: 6,  available: 0, power_kw: 150.0, cost: 0.38 },
    StationSeed { name: "Palo Alto Hub",            at: (37.4419, -122.1430), status: StationStatus::Available, total: 8,  available: 3, power_kw: 120.0, cost: 0.35 },
    StationSeed { name: "San Jose North",           at: (37.3688, -121.9137), status: StationStatus::Offline,   total: 4,  available: 4, power_kw: 50.0,  cost: 0.29 },
];

/// Build the demo fleet.  Drivers 1–3 are assigned; routes 1 and 3 have
/// vehicles.
pub fn demo_fleet(limits: FieldLimits, now: Timestamp) -> FleetState {
    let vehicles = VEHICLES.iter().zip(1..).map(|(s, n)| Vehicle {
        id:                   VehicleId::from_seq(n),
        model:                s.model.to_owned(),
        license_plate:        s.plate.to_owned(),
        status:               s.status,
        battery_capacity_kwh: s.capacity,
        soc:                  s.soc,
        soh:                  s.soh,
        odometer_km:          s.odometer,
        assigned_driver:      None,
        location:             LatLng::new(s.at.0, s.at.1),
        temperature_c:        s.temp,
        last_update:          now,
    });

    let drivers = DRIVERS.iter().zip(1..).map(|(s, n)| Driver {
        id:                DriverId::from_seq(n),
        full_name:         s.name.to_owned(),
        phone:             s.phone.to_owned(),
        license_number:    s.license.to_owned(),
        assigned_vehicle:  s.vehicle.map(VehicleId::from_seq),
        safety_score:      s.safety,
        efficiency_rating: s.efficiency,
        total_trips:       s.trips,
        join_date:         now,
    });

    let stations = STATIONS.iter().zip(1..).map(|(s, n)| ChargingStation {
        id:              StationId::from_seq(n),
        name:            s.name.to_owned(),
        location:        LatLng::new(s.at.0, s.at.1),
        status:          s.status,
        total_ports:     s.total,
        available_ports: s.available,
        power_output_kw: s.power_kw,
        cost_per_kwh:    s.cost,
    });

    FleetStateBuilder::new()
        .limits(limits)
        .vehicles(vehicles)
        .drivers(drivers)
        .stations(stations)
        .routes(demo_routes())
        .build()
}

fn demo_routes() -> Vec<Route> {
    vec![
        Route {
            id:                     RouteId::from_seq(1),
            name:                   "Downtown Loop".to_owned(),
            status:                 RouteStatus::Active,
            assigned_vehicle:       Some(VehicleId::from_seq(1)),
            start:                  LatLng::new(37.7749, -122.4194),
            end:                    LatLng::new(37.7955, -122.3937),
            waypoints:              vec![LatLng::new(37.7850, -122.4060), LatLng::new(37.7897, -122.3990)],
            distance_km:            6.8,
            estimated_duration_min: 25,
            estimated_energy_kwh:   Some(1.2),
        },
        Route {
            id:                     RouteId::from_seq(2),
            name:                   "Bay Bridge Express".to_owned(),
            status:                 RouteStatus::Scheduled,
            assigned_vehicle:       None,
            start:                  LatLng::new(37.7879, -122.3961),
            end:                    LatLng::new(37.8044, -122.2712),
            waypoints:              Vec::new(),
            distance_km:            13.4,
            estimated_duration_min: 22,
            estimated_energy_kwh:   Some(2.4),
        },
        Route {
            id:                     RouteId::from_seq(3),
            name:                   "Peninsula Run".to_owned(),
            status:                 RouteStatus::Completed,
            assigned_vehicle:       Some(VehicleId::from_seq(4)),
            start:                  LatLng::new(37.8044, -122.2712),
            end:                    LatLng::new(37.3382, -121.8863),
            waypoints:              vec![LatLng::new(37.5485, -121.9886)],
            distance_km:            68.9,
            estimated_duration_min: 65,
            estimated_energy_kwh:   Some(14.8),
        },
    ]
}
