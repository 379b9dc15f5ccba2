//! Command-line flags and config loading.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fw_core::FleetConfig;

#[derive(Parser, Debug)]
#[command(name = "fleetwatch", about = "Simulated EV fleet monitoring console")]
pub struct Args {
    /// JSON config file; every field is optional.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Telemetry interval in milliseconds (overrides the config).
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many ticks.  Runs until Ctrl-C when omitted.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Random-walk seed (overrides the config).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for CSV telemetry export.  Nothing is written when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Load the config file (or defaults) and apply flag overrides.
    pub fn fleet_config(&self) -> Result<FleetConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => FleetConfig::default(),
        };
        if let Some(ms) = self.interval_ms {
            config.telemetry.interval_ms = ms;
        }
        if let Some(seed) = self.seed {
            config.telemetry.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}
