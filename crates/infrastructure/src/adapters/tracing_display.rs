//! Display adapter writing meter snapshots to the log
//!
//! Used when the meter runs headless; a UI shell provides its own
//! `MeterDisplayPort` instead.

use application::ports::MeterDisplayPort;
use domain::MeterView;
use tracing::{debug, info};

/// Logs every snapshot, status changes at `info` and ticks at `debug`
#[derive(Debug, Default)]
pub struct TracingDisplay {
    last_status: parking_lot::Mutex<Option<domain::MeterStatus>>,
}

impl TracingDisplay {
    /// Create a new log display
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeterDisplayPort for TracingDisplay {
    fn render(&self, view: &MeterView) {
        let mut last = self.last_status.lock();
        if *last == Some(view.status) {
            debug!(
                fare = %view.fare,
                distance = %view.distance,
                elapsed = %view.time_elapsed,
                stopped = %view.time_stopped,
                band = view.band,
                "Meter updated"
            );
        } else {
            info!(
                status = %view.status_label,
                fare = %view.fare,
                band = view.band,
                "Meter status changed"
            );
            *last = Some(view.status);
        }
    }
}
