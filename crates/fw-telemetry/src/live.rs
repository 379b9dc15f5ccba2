//! Live telemetry feed backed by an unbounded tokio channel.
//!
//! ```text
//!  ingest task ── LiveFeedSender::send ──► mpsc ──► LiveFeed::produce (per tick)
//! ```
//!
//! The sender half is `Clone` and can be moved into any task.  Records pile
//! up between ticks and the next tick drains all of them in arrival order.
//! Dropping every sender does not stop the runner; ticks simply produce empty
//! batches.

use fw_core::{TelemetryRecord, Timestamp, VehicleId};
use fw_store::FleetState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::debug;

use crate::{TelemetryError, TelemetryResult, TickProducer};

/// Create a connected sender / feed pair.
pub fn live_feed() -> (LiveFeedSender, LiveFeed) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LiveFeedSender { tx }, LiveFeed { rx, disconnected: false })
}

#[derive(Clone, Debug)]
pub struct LiveFeedSender {
    tx: UnboundedSender<TelemetryRecord>,
}

impl LiveFeedSender {
    pub fn send(&self, record: TelemetryRecord) -> TelemetryResult<()> {
        self.tx.send(record).map_err(|_| TelemetryError::FeedClosed)
    }

    /// Queue a measured reading.
    pub fn send_reading(&self, vehicle: VehicleId, soc: f64, temperature_c: f64, at: Timestamp) -> TelemetryResult<()> {
        self.send(TelemetryRecord::absolute(vehicle, soc, temperature_c, at))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct LiveFeed {
    rx:           UnboundedReceiver<TelemetryRecord>,
    disconnected: bool,
}

impl LiveFeed {
    /// `true` once every sender has been dropped and the queue is empty.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl TickProducer for LiveFeed {
    /// Drain everything queued so far.  `now` is ignored; each record keeps
    /// the timestamp it was sent with.
    fn produce(&mut self, _fleet: &FleetState, _now: Timestamp) -> Vec<TelemetryRecord> {
        let mut batch = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(record) => batch.push(record),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        debug!("live feed disconnected");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        batch
    }

    fn name(&self) -> &'static str {
        "live-feed"
    }
}
