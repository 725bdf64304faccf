//! Meter display port
//!
//! Defines the interface towards the presentation layer that renders the
//! meter screen. Adapters in the infrastructure layer implement this port.

use domain::MeterView;
#[cfg(test)]
use mockall::automock;

/// Port for rendering meter snapshots
///
/// `render` is called once after every command and every tick, while the
/// meter is locked so snapshots arrive in order. Implementations must
/// return quickly and must not call back into the meter service.
#[cfg_attr(test, automock)]
pub trait MeterDisplayPort: Send + Sync {
    /// Show the given snapshot
    fn render(&self, view: &MeterView);
}
