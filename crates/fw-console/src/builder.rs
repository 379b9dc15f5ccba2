//! Fluent builder for constructing a [`FleetConsole`].

use fw_core::{FleetConfig, FleetResult};
use fw_map::{MapAdapter, MapSurface, TimerQueue};
use fw_store::{FieldLimits, FleetState};
use fw_telemetry::{TelemetryRunner, TickProducer};
use tracing::info;

use crate::FleetConsole;

/// Container id used when none is given.
pub const DEFAULT_CONTAINER: &str = "fleet-map";

/// Fluent builder for [`FleetConsole<P, S, T>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                        |
/// |---------------------|------------------------------------------------|
/// | `.config(c)`        | `FleetConfig::default()`                       |
/// | `.fleet(f)`         | Empty `FleetState` with limits from the config |
/// | `.container(id)`    | `"fleet-map"`                                  |
///
/// # Example
///
/// ```rust,ignore
/// let mut console = ConsoleBuilder::new(simulator, HeadlessSurface::new(), ManualTimers::new())
///     .config(config)
///     .fleet(demo_fleet(limits, Utc::now()))
///     .build()?;
/// console.mount_map();
/// ```
pub struct ConsoleBuilder<P: TickProducer, S: MapSurface, T: TimerQueue> {
    producer:  P,
    surface:   S,
    timers:    T,
    config:    FleetConfig,
    fleet:     Option<FleetState>,
    container: String,
}

impl<P: TickProducer, S: MapSurface, T: TimerQueue> ConsoleBuilder<P, S, T> {
    pub fn new(producer: P, surface: S, timers: T) -> Self {
        Self {
            producer,
            surface,
            timers,
            config:    FleetConfig::default(),
            fleet:     None,
            container: DEFAULT_CONTAINER.to_owned(),
        }
    }

    pub fn config(mut self, config: FleetConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an existing fleet instead of an empty one.  Its field
    /// limits are kept as they are.
    pub fn fleet(mut self, fleet: FleetState) -> Self {
        self.fleet = Some(fleet);
        self
    }

    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Validate the config and assemble the console.  The map stays
    /// unmounted; the station marker set is queued for the first mount.
    pub fn build(self) -> FleetResult<FleetConsole<P, S, T>> {
        self.config.validate()?;

        let fleet = self
            .fleet
            .unwrap_or_else(|| FleetState::new(FieldLimits::from(&self.config.telemetry)));
        let runner = TelemetryRunner::from_config(self.producer, &self.config.telemetry);
        let map = MapAdapter::new(self.surface, self.timers, self.container, self.config.map);

        info!(
            vehicles = fleet.vehicles().len(),
            stations = fleet.stations().len(),
            routes = fleet.routes().len(),
            producer = runner.producer().name(),
            "console built"
        );

        let mut console = FleetConsole { fleet, runner, map, thresholds: self.config.critical };
        console.refresh_station_markers();
        Ok(console)
    }
}
