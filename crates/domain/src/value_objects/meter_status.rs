//! Meter status shown on the display

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived status of the meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterStatus {
    /// Meter off, taxi available
    Free,
    /// Meter on, vehicle moving
    Running,
    /// Meter on, vehicle stopped in traffic
    StoppedInTraffic,
}

impl MeterStatus {
    /// Derive the status from the two ride flags
    #[must_use]
    pub const fn from_flags(is_running: bool, is_car_moving: bool) -> Self {
        match (is_running, is_car_moving) {
            (false, _) => Self::Free,
            (true, true) => Self::Running,
            (true, false) => Self::StoppedInTraffic,
        }
    }

    /// Label shown to the driver
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Free => "Livre",
            Self::Running => "Rodando",
            Self::StoppedInTraffic => "Parado no Trânsito",
        }
    }
}

impl fmt::Display for MeterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
