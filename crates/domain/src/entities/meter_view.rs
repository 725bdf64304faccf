//! Display snapshot of the meter

use serde::{Deserialize, Serialize};

use super::RideState;
use crate::formatting::{format_currency, format_decimal, format_elapsed};
use crate::value_objects::{Band, MeterStatus, TariffConfig};

/// Everything the presentation needs to render the meter screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterView {
    /// Fare as currency, e.g. `"R$ 7,50"`
    pub fare: String,
    /// Distance, e.g. `"1,00 km"`
    pub distance: String,
    /// Total ride time as `MM:SS`
    pub time_elapsed: String,
    /// Stopped time as `MM:SS`
    pub time_stopped: String,
    /// Active band number
    pub band: u8,
    /// Derived status
    pub status: MeterStatus,
    /// Status label, e.g. `"Rodando"`
    pub status_label: String,
    /// Caption of the start/stop button
    pub start_stop_label: String,
    /// Caption of the band button, naming the band it switches to
    pub toggle_band_label: String,
    /// Caption of the movement simulation button
    pub toggle_movement_label: String,
    /// Whether the band and movement buttons accept input
    pub controls_enabled: bool,
    /// Whether the reset confirmation prompt is shown
    pub reset_prompt_open: bool,
    /// Raw tariff text, echoed back into the inputs
    pub tariff: TariffConfig,
}

impl MeterView {
    /// Build the snapshot from ride state and tariff
    #[must_use]
    pub fn new(state: &RideState, tariff: &TariffConfig) -> Self {
        let status = MeterStatus::from_flags(state.is_running, state.is_car_moving);
        let start_stop_label = if state.is_running {
            "Parar Corrida"
        } else {
            "Iniciar Corrida"
        };
        let toggle_movement_label = if state.is_car_moving {
            "Simular Parada"
        } else {
            "Simular Movimento"
        };

        Self {
            fare: format_currency(state.current_fare),
            distance: format!("{} km", format_decimal(state.distance_km)),
            time_elapsed: format_elapsed(state.time_elapsed_seconds),
            time_stopped: format_elapsed(state.time_stopped_seconds),
            band: state.current_band.number(),
            status,
            status_label: status.label().to_string(),
            start_stop_label: start_stop_label.to_string(),
            toggle_band_label: band_button_label(state.current_band),
            toggle_movement_label: toggle_movement_label.to_string(),
            controls_enabled: state.is_running,
            reset_prompt_open: state.reset_prompt_open,
            tariff: tariff.clone(),
        }
    }
}

fn band_button_label(current: Band) -> String {
    format!("Mudar Bandeira ({})", current.toggled().number())
}
