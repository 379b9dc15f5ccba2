//! Unit tests for fw-telemetry.

#[cfg(test)]
fn t0() -> fw_core::Timestamp {
    use chrono::TimeZone;
    chrono::Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

#[cfg(test)]
fn small_fleet(n: usize) -> fw_store::FleetState {
    use fw_core::LatLng;
    use fw_store::{FleetState, NewVehicle};

    let mut fleet = FleetState::default();
    for i in 0..n {
        fleet.add_vehicle(
            NewVehicle {
                model:                "Sim".into(),
                license_plate:        format!("P{i}"),
                battery_capacity_kwh: 60.0,
                location:             LatLng::new(37.0, -122.0),
            },
            t0(),
        );
    }
    fleet
}

#[cfg(test)]
mod simulator {
    use super::{small_fleet, t0};
    use crate::{RandomWalkSimulator, TickProducer};
    use fw_core::FieldUpdate;

    #[test]
    fn one_record_per_vehicle_in_store_order() {
        let fleet = small_fleet(3);
        let mut sim = RandomWalkSimulator::new(2.5, 1.0, 7);
        let batch = sim.produce(&fleet, t0());
        let ids: Vec<&str> = batch.iter().map(|r| r.vehicle_id.as_str()).collect();
        assert_eq!(ids, ["EV-001", "EV-002", "EV-003"]);
    }

    #[test]
    fn deltas_stay_within_jitter() {
        let fleet = small_fleet(5);
        let mut sim = RandomWalkSimulator::new(2.5, 1.0, 7);
        for _ in 0..50 {
            for rec in sim.produce(&fleet, t0()) {
                let Some(FieldUpdate::Delta(soc)) = rec.soc else { panic!("expected soc delta") };
                let Some(FieldUpdate::Delta(temp)) = rec.temperature else { panic!("expected temp delta") };
                assert!(soc.abs() <= 2.5);
                assert!(temp.abs() <= 1.0);
            }
        }
    }

    #[test]
    fn same_seed_same_batches() {
        let fleet = small_fleet(4);
        let mut a = RandomWalkSimulator::new(2.5, 1.0, 99);
        let mut b = RandomWalkSimulator::new(2.5, 1.0, 99);
        for _ in 0..10 {
            assert_eq!(a.produce(&fleet, t0()), b.produce(&fleet, t0()));
        }
    }

    #[test]
    fn empty_fleet_empty_batch() {
        let fleet = small_fleet(0);
        let mut sim = RandomWalkSimulator::new(2.5, 1.0, 1);
        assert!(sim.produce(&fleet, t0()).is_empty());
    }
}

#[cfg(test)]
mod runner {
    use std::time::Duration;

    use fw_core::{TelemetryRecord, Tick, VehicleId};
    use fw_store::FleetState;

    use super::{small_fleet, t0};
    use crate::{NoopObserver, TelemetryRunner, TickObserver, TickProducer, TickReport};

    /// Replays a fixed batch every tick.
    struct Fixed(Vec<TelemetryRecord>);

    impl TickProducer for Fixed {
        fn produce(&mut self, _fleet: &FleetState, _now: fw_core::Timestamp) -> Vec<TelemetryRecord> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Counting {
        starts:    u64,
        ends:      u64,
        snapshots: Vec<Tick>,
        run_end:   Option<Tick>,
        skipped:   usize,
    }

    impl TickObserver for Counting {
        fn on_tick_start(&mut self, _t: Tick) { self.starts += 1; }
        fn on_tick_end(&mut self, r: &TickReport, _f: &FleetState) {
            self.ends += 1;
            self.skipped += r.skipped;
        }
        fn on_snapshot(&mut self, t: Tick, _now: fw_core::Timestamp, _f: &FleetState) { self.snapshots.push(t); }
        fn on_run_end(&mut self, t: Tick) { self.run_end = Some(t); }
    }

    #[test]
    fn bad_records_are_skipped_not_fatal() {
        let mut fleet = small_fleet(2);
        let batch = vec![
            TelemetryRecord::absolute(VehicleId::from("EV-001"), 50.0, 30.0, t0()),
            TelemetryRecord::absolute(VehicleId::from("EV-404"), 50.0, 30.0, t0()),
            TelemetryRecord::absolute(VehicleId::from("EV-002"), f64::NAN, 30.0, t0()),
            TelemetryRecord::absolute(VehicleId::from("EV-002"), 60.0, 31.0, t0()),
        ];
        let mut runner = TelemetryRunner::new(Fixed(batch), Duration::from_secs(5), 1);
        let report = runner.tick(&mut fleet, t0(), &mut NoopObserver);

        assert_eq!(report, TickReport { tick: Tick(0), now: t0(), applied: 2, skipped: 2 });
        assert_eq!(fleet.vehicle(&VehicleId::from("EV-001")).unwrap().soc, 50.0);
        assert_eq!(fleet.vehicle(&VehicleId::from("EV-002")).unwrap().soc, 60.0);
    }

    #[test]
    fn observer_called_per_tick_and_snapshots_on_interval() {
        let mut fleet = small_fleet(1);
        let mut runner = TelemetryRunner::new(Fixed(Vec::new()), Duration::from_secs(5), 2);
        let mut obs = Counting::default();
        let reports = runner.run_ticks(5, &mut fleet, t0(), &mut obs);

        assert_eq!(reports.len(), 5);
        assert_eq!((obs.starts, obs.ends), (5, 5));
        assert_eq!(obs.snapshots, [Tick(0), Tick(2), Tick(4)]);
        assert_eq!(obs.run_end, Some(Tick(5)));
        assert_eq!(runner.current_tick(), Tick(5));
    }

    #[test]
    fn zero_snapshot_interval_never_snapshots() {
        let mut fleet = small_fleet(1);
        let mut runner = TelemetryRunner::new(Fixed(Vec::new()), Duration::from_secs(5), 0);
        let mut obs = Counting::default();
        runner.run_ticks(3, &mut fleet, t0(), &mut obs);
        assert!(obs.snapshots.is_empty());
    }

    #[test]
    fn run_ticks_stamps_successive_instants() {
        let mut fleet = small_fleet(1);
        let id = VehicleId::from("EV-001");
        let mut runner = TelemetryRunner::new(crate::RandomWalkSimulator::new(1.0, 1.0, 3), Duration::from_secs(5), 1);
        runner.run_ticks(3, &mut fleet, t0(), &mut NoopObserver);
        let expected = t0() + chrono::TimeDelta::seconds(10);
        assert_eq!(fleet.vehicle(&id).unwrap().last_update, expected);
    }

    #[test]
    fn skipped_count_reaches_observer() {
        let mut fleet = small_fleet(1);
        let batch = vec![TelemetryRecord::delta(VehicleId::from("EV-009"), 1.0, 1.0, t0())];
        let mut runner = TelemetryRunner::new(Fixed(batch), Duration::from_secs(1), 1);
        let mut obs = Counting::default();
        runner.run_ticks(3, &mut fleet, t0(), &mut obs);
        assert_eq!(obs.skipped, 3);
    }
}

#[cfg(test)]
mod live_feed {
    use fw_core::VehicleId;

    use super::{small_fleet, t0};
    use crate::{live_feed, NoopObserver, TelemetryError, TelemetryRunner, TickProducer};

    #[test]
    fn tick_drains_everything_queued() {
        let mut fleet = small_fleet(2);
        let (tx, feed) = live_feed();
        tx.send_reading(VehicleId::from("EV-001"), 42.0, 33.0, t0()).unwrap();
        tx.send_reading(VehicleId::from("EV-002"), 77.0, 29.0, t0()).unwrap();
        tx.send_reading(VehicleId::from("EV-001"), 41.0, 34.0, t0()).unwrap();

        let mut runner = TelemetryRunner::new(feed, std::time::Duration::from_secs(1), 1);
        let report = runner.tick(&mut fleet, t0(), &mut NoopObserver);
        assert_eq!(report.applied, 3);
        let v1 = fleet.vehicle(&VehicleId::from("EV-001")).unwrap();
        assert_eq!((v1.soc, v1.temperature_c), (41.0, 34.0));

        let report = runner.tick(&mut fleet, t0(), &mut NoopObserver);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn dropped_senders_give_empty_batches() {
        let fleet = small_fleet(1);
        let (tx, mut feed) = live_feed();
        tx.send_reading(VehicleId::from("EV-001"), 50.0, 30.0, t0()).unwrap();
        drop(tx);
        assert_eq!(feed.produce(&fleet, t0()).len(), 1);
        assert!(feed.produce(&fleet, t0()).is_empty());
        assert!(feed.is_disconnected());
    }

    #[test]
    fn send_after_feed_dropped_is_closed() {
        let (tx, feed) = live_feed();
        drop(feed);
        assert!(tx.is_closed());
        let err = tx.send_reading(VehicleId::from("EV-001"), 50.0, 30.0, t0()).unwrap_err();
        assert_eq!(err, TelemetryError::FeedClosed);
    }

    #[tokio::test]
    async fn sender_works_from_another_task() {
        let mut fleet = small_fleet(1);
        let (tx, feed) = live_feed();
        let handle = tokio::spawn(async move {
            tx.send_reading(VehicleId::from("EV-001"), 12.0, 40.0, t0())
        });
        handle.await.unwrap().unwrap();

        let mut runner = TelemetryRunner::new(feed, std::time::Duration::from_secs(1), 1);
        runner.tick(&mut fleet, t0(), &mut NoopObserver);
        assert_eq!(fleet.vehicle(&VehicleId::from("EV-001")).unwrap().soc, 12.0);
    }
}

#[cfg(test)]
mod bounds {
    use proptest::prelude::*;

    use super::{small_fleet, t0};
    use crate::{NoopObserver, RandomWalkSimulator, TelemetryRunner};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn random_walk_never_leaves_domains(
            seed in any::<u64>(),
            ticks in 1u64..300,
            soc_jitter in 0.0f64..30.0,
            temp_jitter in 0.0f64..15.0,
        ) {
            let mut fleet = small_fleet(4);
            let sim = RandomWalkSimulator::new(soc_jitter, temp_jitter, seed);
            let mut runner = TelemetryRunner::new(sim, std::time::Duration::from_secs(5), 0);
            runner.run_ticks(ticks, &mut fleet, t0(), &mut NoopObserver);

            for v in fleet.vehicles() {
                prop_assert!((10.0..=100.0).contains(&v.soc), "soc {}", v.soc);
                prop_assert!((15.0..=55.0).contains(&v.temperature_c), "temp {}", v.temperature_c);
            }
        }
    }
}
