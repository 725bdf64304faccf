//! Application configuration
//!
//! Loaded from an optional TOML file; every missing value falls back to its
//! default. No environment variables are consulted.

use std::path::Path;
use std::time::Duration;

use application::{ApplicationError, MeterConfig};
use domain::{DEFAULT_SIMULATED_SPEED_KMH, TariffConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::telemetry::LoggingConfig;

/// Config file looked up in the working directory by [`AppConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "taximeter";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// File could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable
    #[error(transparent)]
    Invalid(#[from] ApplicationError),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Meter timing and simulation
    #[serde(default)]
    pub meter: MeterSettings,

    /// Tariff the meter starts with
    #[serde(default)]
    pub tariff: TariffConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Meter timing and simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterSettings {
    /// Tick period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Simulated speed while moving
    #[serde(default = "default_simulated_speed_kmh")]
    pub simulated_speed_kmh: f64,
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_simulated_speed_kmh() -> f64 {
    DEFAULT_SIMULATED_SPEED_KMH
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            simulated_speed_kmh: default_simulated_speed_kmh(),
        }
    }
}

impl AppConfig {
    /// Load `taximeter.toml` from the working directory if present
    pub fn load() -> Result<Self, ConfigLoadError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit TOML file, which must exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let config = config::Config::builder()
            .add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Toml)
                    .required(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validated settings for the meter service
    pub fn meter_config(&self) -> Result<MeterConfig, ConfigLoadError> {
        let meter = MeterConfig {
            tick_interval: Duration::from_millis(self.meter.tick_interval_ms),
            simulated_speed_kmh: self.meter.simulated_speed_kmh,
        };
        meter.validate()?;
        Ok(meter)
    }

    /// Starting tariff
    #[must_use]
    pub fn tariff_config(&self) -> TariffConfig {
        self.tariff.clone()
    }
}
