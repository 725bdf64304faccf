//! Fare meter entity - Ride state machine and fare computation
//!
//! The meter is advanced by [`FareMeter::tick`] once per tick period while
//! running and by driver commands. The fare is never accumulated: it is
//! recomputed from distance, stopped time, band and tariff after every
//! mutation of those inputs.

use serde::{Deserialize, Serialize};

use super::MeterView;
use crate::commands::MeterCommand;
use crate::value_objects::{Band, TariffConfig, TariffField};

/// Simulated vehicle speed while moving
pub const DEFAULT_SIMULATED_SPEED_KMH: f64 = 30.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Mutable state of the current ride
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideState {
    /// Whether the meter is accruing
    pub is_running: bool,
    /// Simulated motion flag
    pub is_car_moving: bool,
    /// Active tariff band
    pub current_band: Band,
    /// Accumulated simulated distance
    pub distance_km: f64,
    /// Ticks since the ride started, across pause/resume
    pub time_elapsed_seconds: u64,
    /// Ticks spent stopped, always <= `time_elapsed_seconds`
    pub time_stopped_seconds: u64,
    /// Derived fare
    pub current_fare: f64,
    /// Whether the reset confirmation prompt is shown
    pub reset_prompt_open: bool,
}

impl Default for RideState {
    fn default() -> Self {
        Self {
            is_running: false,
            is_car_moving: true,
            current_band: Band::One,
            distance_km: 0.0,
            time_elapsed_seconds: 0,
            time_stopped_seconds: 0,
            current_fare: 0.0,
            reset_prompt_open: false,
        }
    }
}

/// Compute the fare for the given ride inputs
///
/// `initial + distance * rate(band) + stopped_minutes * rate_stopped`,
/// where unparseable tariff text counts as zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_fare(
    distance_km: f64,
    time_stopped_seconds: u64,
    band: Band,
    tariff: &TariffConfig,
) -> f64 {
    let stopped_minutes = time_stopped_seconds as f64 / SECONDS_PER_MINUTE;

    tariff.initial_fare()
        + distance_km * tariff.fare_per_km(band)
        + stopped_minutes * tariff.fare_per_minute_stopped()
}

/// Simulated taxi fare meter
#[derive(Debug, Clone, PartialEq)]
pub struct FareMeter {
    state: RideState,
    tariff: TariffConfig,
    simulated_speed_kmh: f64,
}

impl Default for FareMeter {
    fn default() -> Self {
        Self::new(TariffConfig::default())
    }
}

impl FareMeter {
    /// Create an idle meter with the given tariff
    #[must_use]
    pub fn new(tariff: TariffConfig) -> Self {
        Self {
            state: RideState::default(),
            tariff,
            simulated_speed_kmh: DEFAULT_SIMULATED_SPEED_KMH,
        }
    }

    /// Override the simulated speed used while moving
    ///
    /// Negative or non-finite speeds are ignored.
    #[must_use]
    pub fn with_simulated_speed(mut self, speed_kmh: f64) -> Self {
        if speed_kmh.is_finite() && speed_kmh >= 0.0 {
            self.simulated_speed_kmh = speed_kmh;
        }
        self
    }

    /// Current ride state
    #[must_use]
    pub const fn state(&self) -> &RideState {
        &self.state
    }

    /// Current tariff text
    #[must_use]
    pub const fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Simulated speed while moving
    #[must_use]
    pub const fn simulated_speed_kmh(&self) -> f64 {
        self.simulated_speed_kmh
    }

    /// Distance covered by one moving tick
    #[must_use]
    pub fn km_per_tick(&self) -> f64 {
        self.simulated_speed_kmh / SECONDS_PER_HOUR
    }

    /// Snapshot for the display
    #[must_use]
    pub fn view(&self) -> MeterView {
        MeterView::new(&self.state, &self.tariff)
    }

    /// Advance the ride by one tick
    ///
    /// Returns `false` without touching the state when the meter is not running.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }

        self.state.time_elapsed_seconds += 1;
        if self.state.is_car_moving {
            self.state.distance_km += self.km_per_tick();
        } else {
            self.state.time_stopped_seconds += 1;
        }
        self.recompute();
        true
    }

    /// Recompute the fare from the current inputs
    pub fn recompute(&mut self) {
        self.state.current_fare = compute_fare(
            self.state.distance_km,
            self.state.time_stopped_seconds,
            self.state.current_band,
            &self.tariff,
        );
    }

    /// Start or stop the meter, returning the new running flag
    ///
    /// Starting with a fare of exactly zero seeds the flag-fall so the
    /// display never shows zero on a running meter. Stop/resume keeps the
    /// accumulated fare and does not seed again.
    #[allow(clippy::float_cmp)]
    pub fn toggle_running(&mut self) -> bool {
        if !self.state.is_running && self.state.current_fare == 0.0 {
            self.state.current_fare = self.tariff.initial_fare();
        }
        self.state.is_running = !self.state.is_running;
        self.state.is_running
    }

    /// Switch between band 1 and band 2
    ///
    /// Only while running. The new rate re-prices the whole accumulated
    /// distance immediately.
    pub fn toggle_band(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }
        self.state.current_band = self.state.current_band.toggled();
        self.recompute();
        true
    }

    /// Switch between moving and stopped in traffic
    ///
    /// Only while running.
    pub fn toggle_movement(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }
        self.state.is_car_moving = !self.state.is_car_moving;
        true
    }

    /// Open the reset confirmation prompt
    pub fn request_reset(&mut self) {
        self.state.reset_prompt_open = true;
    }

    /// Close the reset confirmation prompt without resetting
    pub fn cancel_reset(&mut self) {
        self.state.reset_prompt_open = false;
    }

    /// Clear the ride back to defaults, keeping the tariff
    pub fn confirm_reset(&mut self) {
        self.state = RideState::default();
    }

    /// Replace the raw text of a tariff field and re-price the ride
    pub fn set_tariff_field(&mut self, field: TariffField, value: impl Into<String>) {
        self.tariff.set(field, value);
        self.recompute();
    }

    /// Apply a driver command
    ///
    /// Returns `false` when the command was ignored because its control is
    /// disabled (band or movement toggle while the meter is off).
    pub fn apply(&mut self, command: MeterCommand) -> bool {
        if command.requires_running() && !self.state.is_running {
            return false;
        }

        match command {
            MeterCommand::ToggleRunning => {
                self.toggle_running();
                true
            },
            MeterCommand::ToggleBand => self.toggle_band(),
            MeterCommand::ToggleMovement => self.toggle_movement(),
            MeterCommand::RequestReset => {
                self.request_reset();
                true
            },
            MeterCommand::ConfirmReset => {
                self.confirm_reset();
                true
            },
            MeterCommand::CancelReset => {
                self.cancel_reset();
                true
            },
            MeterCommand::SetTariffField { field, value } => {
                self.set_tariff_field(field, value);
                true
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KM_PER_TICK: f64 = 30.0 / 3600.0;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn running_meter() -> FareMeter {
        let mut meter = FareMeter::default();
        meter.toggle_running();
        meter
    }

    fn tick_n(meter: &mut FareMeter, n: u64) {
        for _ in 0..n {
            meter.tick();
        }
    }

    #[test]
    fn new_meter_is_idle_with_defaults() {
        let meter = FareMeter::default();
        assert_eq!(meter.state(), &RideState::default());
        assert_eq!(meter.tariff(), &TariffConfig::default());
        assert_close(meter.simulated_speed_kmh(), 30.0);
        assert_close(meter.state().current_fare, 0.0);
    }

    #[test]
    fn tick_is_ignored_when_not_running() {
        let mut meter = FareMeter::default();
        assert!(!meter.tick());
        assert_eq!(meter.state(), &RideState::default());
    }

    #[test]
    fn start_seeds_flag_fall() {
        let mut meter = FareMeter::default();
        assert!(meter.toggle_running());
        assert_close(meter.state().current_fare, 5.0);
    }

    #[test]
    fn moving_ticks_accumulate_distance() {
        let mut meter = running_meter();
        tick_n(&mut meter, 10);

        let state = meter.state();
        assert_close(state.distance_km, 10.0 * KM_PER_TICK);
        assert_eq!(state.time_elapsed_seconds, 10);
        assert_eq!(state.time_stopped_seconds, 0);
    }

    #[test]
    fn two_minutes_moving_costs_one_km() {
        let mut meter = running_meter();
        tick_n(&mut meter, 120);

        assert!((meter.state().distance_km - 1.0).abs() < 1e-9);
        assert!((meter.state().current_fare - 7.5).abs() < 1e-9);
    }

    #[test]
    fn two_minutes_stopped_costs_one_real() {
        let mut meter = running_meter();
        assert!(meter.toggle_movement());
        tick_n(&mut meter, 120);

        let state = meter.state();
        assert_eq!(state.time_stopped_seconds, 120);
        assert_eq!(state.time_elapsed_seconds, 120);
        assert_close(state.distance_km, 0.0);
        assert_close(state.current_fare, 6.0);
    }

    #[test]
    fn mixed_ride_keeps_stopped_within_elapsed() {
        let mut meter = running_meter();
        tick_n(&mut meter, 30);
        meter.toggle_movement();
        tick_n(&mut meter, 45);
        meter.toggle_movement();
        tick_n(&mut meter, 15);

        let state = meter.state();
        assert_eq!(state.time_elapsed_seconds, 90);
        assert_eq!(state.time_stopped_seconds, 45);
        assert_close(state.distance_km, 45.0 * KM_PER_TICK);
        assert_close(
            state.current_fare,
            5.0 + 45.0 * KM_PER_TICK * 2.5 + 0.75 * 0.5,
        );
    }

    #[test]
    fn band_switch_reprices_whole_distance() {
        let mut meter = running_meter();
        tick_n(&mut meter, 60);
        let distance = meter.state().distance_km;
        let before = meter.state().current_fare;

        assert!(meter.toggle_band());

        assert_eq!(meter.state().current_band, Band::Two);
        assert_close(meter.state().distance_km, distance);
        assert_close(meter.state().current_fare - before, distance * (3.2 - 2.5));
    }

    #[test]
    fn band_and_movement_toggles_are_disabled_when_stopped() {
        let mut meter = FareMeter::default();
        assert!(!meter.toggle_band());
        assert!(!meter.toggle_movement());
        assert_eq!(meter.state().current_band, Band::One);
        assert!(meter.state().is_car_moving);
    }

    #[test]
    fn stop_preserves_ride() {
        let mut meter = running_meter();
        tick_n(&mut meter, 20);
        let snapshot = meter.state().clone();

        assert!(!meter.toggle_running());
        assert!(!meter.tick());

        let state = meter.state();
        assert!(!state.is_running);
        assert_eq!(state.time_elapsed_seconds, snapshot.time_elapsed_seconds);
        assert_close(state.distance_km, snapshot.distance_km);
        assert_close(state.current_fare, snapshot.current_fare);
    }

    #[test]
    fn resume_does_not_reseed_non_zero_fare() {
        let mut meter = running_meter();
        tick_n(&mut meter, 120);
        meter.toggle_running();
        meter.set_tariff_field(TariffField::InitialFare, "9.00");
        let fare = meter.state().current_fare;

        meter.toggle_running();

        assert!(meter.state().is_running);
        assert_close(meter.state().current_fare, fare);
        assert_close(fare, 9.0 + 2.5);
    }

    #[test]
    fn start_after_reset_seeds_current_flag_fall() {
        let mut meter = running_meter();
        tick_n(&mut meter, 5);
        meter.confirm_reset();
        meter.tariff.set(TariffField::InitialFare, "4,40");

        meter.toggle_running();

        assert_close(meter.state().current_fare, 4.4);
    }

    #[test]
    fn confirm_reset_restores_defaults_and_keeps_tariff() {
        let mut meter = running_meter();
        meter.set_tariff_field(TariffField::FarePerKmBand1, "3,00");
        meter.toggle_band();
        meter.toggle_movement();
        tick_n(&mut meter, 30);
        meter.request_reset();

        meter.confirm_reset();

        assert_eq!(meter.state(), &RideState::default());
        assert_eq!(meter.tariff().fare_per_km_band1, "3,00");
    }

    #[test]
    fn confirm_reset_is_idempotent() {
        let mut meter = running_meter();
        tick_n(&mut meter, 30);

        meter.confirm_reset();
        let once = meter.clone();
        meter.confirm_reset();

        assert_eq!(meter, once);
    }

    #[test]
    fn reset_prompt_does_not_touch_ride() {
        let mut meter = running_meter();
        tick_n(&mut meter, 10);
        let before = meter.state().clone();

        meter.request_reset();
        assert!(meter.state().reset_prompt_open);
        meter.cancel_reset();

        assert_eq!(meter.state(), &before);
    }

    #[test]
    fn tariff_edit_recomputes_immediately() {
        let mut meter = running_meter();
        tick_n(&mut meter, 120);

        meter.set_tariff_field(TariffField::FarePerKmBand1, "3,");
        assert_close(meter.state().current_fare, 5.0 + 3.0);

        meter.set_tariff_field(TariffField::FarePerKmBand1, "abc");
        assert_close(meter.state().current_fare, 5.0);
    }

    #[test]
    fn custom_speed() {
        let mut meter = FareMeter::default().with_simulated_speed(60.0);
        meter.toggle_running();
        tick_n(&mut meter, 60);
        assert_close(meter.state().distance_km, 1.0);
    }

    #[test]
    fn invalid_speed_is_ignored() {
        let meter = FareMeter::default()
            .with_simulated_speed(-5.0)
            .with_simulated_speed(f64::NAN);
        assert_close(meter.simulated_speed_kmh(), 30.0);
    }

    #[test]
    fn apply_reports_disabled_commands() {
        let mut meter = FareMeter::default();
        assert!(!meter.apply(MeterCommand::ToggleBand));
        assert!(!meter.apply(MeterCommand::ToggleMovement));
        assert!(meter.apply(MeterCommand::ToggleRunning));
        assert!(meter.apply(MeterCommand::ToggleBand));
        assert!(meter.apply(MeterCommand::SetTariffField {
            field: TariffField::FarePerMinuteStopped,
            value: "1,00".to_string(),
        }));
        assert_eq!(meter.tariff().fare_per_minute_stopped, "1,00");
    }

    #[test]
    fn apply_leaves_state_untouched_for_disabled_commands() {
        let mut meter = FareMeter::default();
        meter.toggle_running();
        meter.toggle_running();
        let before = meter.clone();

        assert!(!meter.apply(MeterCommand::ToggleBand));
        assert!(!meter.apply(MeterCommand::ToggleMovement));

        assert_eq!(meter, before);
    }

    #[test]
    fn fifteen_seconds_stopped_shows_rounded_up_cent() {
        let mut meter = running_meter();
        meter.toggle_movement();
        tick_n(&mut meter, 15);

        assert_close(meter.state().current_fare, 5.125);
        assert_eq!(meter.view().fare, "R$ 5,13");
    }

    #[test]
    fn compute_fare_is_pure() {
        let tariff = TariffConfig::default();
        assert_close(compute_fare(0.0, 0, Band::One, &tariff), 5.0);
        assert_close(compute_fare(2.0, 0, Band::Two, &tariff), 5.0 + 6.4);
        assert_close(compute_fare(0.0, 90, Band::One, &tariff), 5.75);
    }
}
