//! Meter commands - Strongly typed representations of driver intents

use serde::{Deserialize, Serialize};

use crate::value_objects::TariffField;

/// All intents the presentation can forward to the meter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeterCommand {
    /// Start the meter, or stop it keeping the ride
    ToggleRunning,
    /// Switch tariff band (only while running)
    ToggleBand,
    /// Switch between moving and stopped (only while running)
    ToggleMovement,
    /// Ask for reset confirmation
    RequestReset,
    /// Reset the ride
    ConfirmReset,
    /// Dismiss the reset confirmation
    CancelReset,
    /// A tariff input changed
    SetTariffField {
        /// Which input
        field: TariffField,
        /// Raw text as typed
        value: String,
    },
}

impl MeterCommand {
    /// Whether the command is only accepted while the meter runs
    #[must_use]
    pub const fn requires_running(&self) -> bool {
        matches!(self, Self::ToggleBand | Self::ToggleMovement)
    }

    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ToggleRunning => "toggle_running",
            Self::ToggleBand => "toggle_band",
            Self::ToggleMovement => "toggle_movement",
            Self::RequestReset => "request_reset",
            Self::ConfirmReset => "confirm_reset",
            Self::CancelReset => "cancel_reset",
            Self::SetTariffField { .. } => "set_tariff_field",
        }
    }
}
