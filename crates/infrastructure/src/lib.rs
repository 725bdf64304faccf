//! Infrastructure layer - Adapters for external systems
//!
//! Configuration loading, logging setup and the log-backed display adapter.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::TracingDisplay;
pub use config::{AppConfig, ConfigLoadError, DEFAULT_CONFIG_FILE, MeterSettings};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
