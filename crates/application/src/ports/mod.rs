//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod meter_display_port;

pub use meter_display_port::MeterDisplayPort;
#[cfg(test)]
pub use meter_display_port::MockMeterDisplayPort;
