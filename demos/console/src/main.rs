//! fleetwatch: headless run of the fleet monitoring console.
//!
//! Loads the demo fleet, mounts a recording map surface, and applies
//! random-walk telemetry on a fixed interval until `--ticks` is reached or
//! Ctrl-C is pressed.  Aggregates are logged as the run goes; with
//! `--output` every tick is also exported to CSV.

mod cli;

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use fw_console::{ConsoleBuilder, FleetConsole};
use fw_core::{FocusRef, RouteId, Tick, Timestamp};
use fw_map::{HeadlessSurface, ManualTimers, MapStatus};
use fw_output::{CsvWriter, TelemetryOutputObserver};
use fw_store::{demo_fleet, FieldLimits, FleetState};
use fw_telemetry::{RandomWalkSimulator, TickObserver, TickReport};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Args;

type Console = FleetConsole<RandomWalkSimulator, HeadlessSurface, ManualTimers>;

/// Log aggregates every this many ticks.
const REPORT_EVERY: u64 = 10;

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards to the CSV observer when one is configured and counts skipped
/// records across the run.
struct DemoObserver {
    output:  Option<TelemetryOutputObserver<CsvWriter>>,
    skipped: usize,
}

impl TickObserver for DemoObserver {
    fn on_tick_end(&mut self, report: &TickReport, fleet: &FleetState) {
        self.skipped += report.skipped;
        if let Some(out) = &mut self.output {
            out.on_tick_end(report, fleet);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, now: Timestamp, fleet: &FleetState) {
        if let Some(out) = &mut self.output {
            out.on_snapshot(tick, now, fleet);
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        if let Some(out) = &mut self.output {
            out.on_run_end(final_tick);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.fleet_config()?;
    let interval_dur = config.telemetry.interval();

    let fleet = demo_fleet(FieldLimits::from(&config.telemetry), Utc::now());
    let simulator = RandomWalkSimulator::from_config(&config.telemetry);
    let mut console = ConsoleBuilder::new(simulator, HeadlessSurface::new(), ManualTimers::new())
        .config(config)
        .fleet(fleet)
        .build()?;

    prepare_map(&mut console)?;

    let output = match &args.output {
        Some(dir) => {
            info!(dir = %dir.display(), "exporting telemetry to CSV");
            Some(TelemetryOutputObserver::new(CsvWriter::new(dir)?, *console.thresholds()))
        }
        None => None,
    };
    let mut observer = DemoObserver { output, skipped: 0 };

    log_aggregates(&console);
    info!(interval_ms = interval_dur.as_millis() as u64, ticks = ?args.ticks, "telemetry loop started");

    let started = Instant::now();
    let mut ticker = interval(interval_dur);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut ran = 0u64;
    loop {
        if args.ticks.is_some_and(|limit| ran >= limit) {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                let report = console.tick_with(Utc::now(), &mut observer);
                ran += 1;
                if report.tick.is_every(REPORT_EVERY) {
                    log_aggregates(&console);
                }
            }
            res = &mut ctrl_c => {
                if let Err(err) = res {
                    warn!(%err, "ctrl-c handler failed");
                }
                info!("interrupted");
                break;
            }
        }
    }

    observer.on_run_end(console.runner().current_tick());
    console.unmount_map();

    info!(
        ticks = ran,
        skipped = observer.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "telemetry loop finished"
    );
    println!("{}", serde_json::to_string_pretty(&console.fleet_summary())?);

    if let Some(err) = observer.output.as_mut().and_then(TelemetryOutputObserver::take_error) {
        return Err(err.into());
    }
    Ok(())
}

/// Mount the map, let the first size invalidation fire, and focus the first
/// route so the run exercises the whole adapter lifecycle.
fn prepare_map(console: &mut Console) -> Result<()> {
    if console.mount_map() != MapStatus::Mounted {
        warn!(reason = ?console.map().placeholder_reason(), "map not mounted, continuing without it");
        return Ok(());
    }

    let delay = console.map().config().invalidate_delay();
    let fired = console.map_mut().timers_mut().advance(delay);
    for id in fired {
        console.on_timer(id);
    }

    if !console.list_routes().is_empty() {
        console.set_focus(Some(FocusRef::Route(RouteId::from_seq(1))))?;
    }
    info!(
        layers = console.map().layer_count(),
        markers = console.map().marker_layers().len(),
        focus = ?console.focus(),
        "map ready"
    );
    Ok(())
}

fn log_aggregates(console: &Console) {
    let summary = console.fleet_summary();
    let stations = console.station_summary();
    let critical = console.critical_list();
    info!(
        tick = %console.runner().current_tick(),
        active = summary.active_vehicles,
        avg_soc = format_args!("{:.1}", summary.avg_soc),
        avg_temp_c = format_args!("{:.1}", summary.avg_temperature_c),
        free_ports = stations.available_ports,
        critical = critical.len(),
        "fleet status"
    );
    for v in &critical {
        warn!(vehicle = %v.vehicle_id, soc = v.soc, temp_c = v.temperature_c, reasons = ?v.reasons, "critical vehicle");
    }
}
