//! Application services - Use case implementations

mod meter_service;

pub use meter_service::{DEFAULT_TICK_INTERVAL, MeterConfig, MeterService};
