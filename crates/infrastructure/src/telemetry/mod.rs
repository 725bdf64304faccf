//! Logging initialization
//!
//! Installs a `tracing-subscriber` formatter filtered by the configured
//! directives.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
