//! Meter service
//!
//! Drives a [`FareMeter`] from a periodic tick source and from driver
//! commands. The tick source is started when the meter starts running and
//! released whenever it stops, is reset, or the service goes away.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use domain::{
    DEFAULT_SIMULATED_SPEED_KMH, FareMeter, MeterCommand, MeterView, RideState, TariffConfig,
    TariffField,
};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::MeterDisplayPort, ticker::TickerHandle};

/// Default tick period: one wall-clock second
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the meter service
#[derive(Debug, Clone, PartialEq)]
pub struct MeterConfig {
    /// Period of the tick source (default: 1 s)
    pub tick_interval: Duration,
    /// Simulated speed while moving (default: 30 km/h)
    pub simulated_speed_kmh: f64,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            simulated_speed_kmh: DEFAULT_SIMULATED_SPEED_KMH,
        }
    }
}

impl MeterConfig {
    /// Check the values are usable
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.tick_interval.is_zero() {
            return Err(ApplicationError::Configuration(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        if !self.simulated_speed_kmh.is_finite() || self.simulated_speed_kmh < 0.0 {
            return Err(ApplicationError::Configuration(format!(
                "simulated speed must be a non-negative number, got {}",
                self.simulated_speed_kmh
            )));
        }
        Ok(())
    }
}

/// State shared with the tick task
struct Shared {
    meter: FareMeter,
    /// Bumped every time the tick source is started or released; ticks
    /// from an older generation are dropped
    generation: u64,
    ticker: Option<TickerHandle>,
    display: Arc<dyn MeterDisplayPort>,
}

impl Shared {
    fn release_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.generation += 1;
    }

    fn render(&self) {
        self.display.render(&self.meter.view());
    }
}

/// Service running a single taxi meter
pub struct MeterService {
    shared: Arc<Mutex<Shared>>,
    runtime: Handle,
    config: MeterConfig,
}

impl fmt::Debug for MeterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("MeterService")
            .field("config", &self.config)
            .field("state", shared.meter.state())
            .field("ticking", &shared.ticker.is_some())
            .finish_non_exhaustive()
    }
}

impl MeterService {
    /// Create an idle meter
    ///
    /// Must be called from within a Tokio runtime, which later drives the
    /// tick source.
    pub fn new(
        config: MeterConfig,
        tariff: TariffConfig,
        display: Arc<dyn MeterDisplayPort>,
    ) -> Result<Self, ApplicationError> {
        config.validate()?;
        let runtime =
            Handle::try_current().map_err(|e| ApplicationError::Runtime(e.to_string()))?;

        let meter = FareMeter::new(tariff).with_simulated_speed(config.simulated_speed_kmh);
        info!(
            tick_interval_ms = config.tick_interval.as_millis(),
            speed_kmh = config.simulated_speed_kmh,
            "Meter service created"
        );

        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                meter,
                generation: 0,
                ticker: None,
                display,
            })),
            runtime,
            config,
        })
    }

    /// Service configuration
    #[must_use]
    pub const fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Copy of the current ride state
    #[must_use]
    pub fn state(&self) -> RideState {
        self.shared.lock().meter.state().clone()
    }

    /// Copy of the current tariff text
    #[must_use]
    pub fn tariff(&self) -> TariffConfig {
        self.shared.lock().meter.tariff().clone()
    }

    /// Current display snapshot
    #[must_use]
    pub fn view(&self) -> MeterView {
        self.shared.lock().meter.view()
    }

    /// Whether a tick source is currently held
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.shared
            .lock()
            .ticker
            .as_ref()
            .is_some_and(TickerHandle::is_active)
    }

    /// Apply a driver command and render the result
    ///
    /// Returns `false` when the command was ignored because its control is
    /// disabled.
    #[instrument(skip(self, command), fields(command = command.name()))]
    pub fn dispatch(&self, command: MeterCommand) -> bool {
        let mut shared = self.shared.lock();
        let was_running = shared.meter.state().is_running;

        if matches!(command, MeterCommand::ConfirmReset) {
            shared.release_ticker();
        }

        let accepted = shared.meter.apply(command);
        if !accepted {
            debug!("Command ignored while meter is off");
        }

        match (was_running, shared.meter.state().is_running) {
            (false, true) => self.acquire_ticker(&mut shared),
            (true, false) => shared.release_ticker(),
            _ => {},
        }

        let state = shared.meter.state();
        debug!(
            running = state.is_running,
            moving = state.is_car_moving,
            band = state.current_band.number(),
            fare = state.current_fare,
            "Command applied"
        );

        shared.render();
        accepted
    }

    /// Start or stop the meter, returning the new running flag
    pub fn toggle_running(&self) -> bool {
        self.dispatch(MeterCommand::ToggleRunning);
        self.shared.lock().meter.state().is_running
    }

    /// Switch tariff band (ignored while the meter is off)
    pub fn toggle_band(&self) -> bool {
        self.dispatch(MeterCommand::ToggleBand)
    }

    /// Switch between moving and stopped (ignored while the meter is off)
    pub fn toggle_movement(&self) -> bool {
        self.dispatch(MeterCommand::ToggleMovement)
    }

    /// Open the reset confirmation prompt
    pub fn request_reset(&self) {
        self.dispatch(MeterCommand::RequestReset);
    }

    /// Stop the tick source and clear the ride
    pub fn confirm_reset(&self) {
        self.dispatch(MeterCommand::ConfirmReset);
    }

    /// Dismiss the reset confirmation prompt
    pub fn cancel_reset(&self) {
        self.dispatch(MeterCommand::CancelReset);
    }

    /// Store new raw text for a tariff field
    pub fn set_tariff_field(&self, field: TariffField, value: impl Into<String>) {
        self.dispatch(MeterCommand::SetTariffField {
            field,
            value: value.into(),
        });
    }

    /// Store new raw text for a tariff field given by name
    pub fn set_tariff_field_named(&self, name: &str, value: &str) -> Result<(), ApplicationError> {
        let field = name.parse::<TariffField>()?;
        self.set_tariff_field(field, value);
        Ok(())
    }

    /// Release the tick source and stop the meter
    ///
    /// Safe to call more than once. Dropping the service has the same effect
    /// on the tick source.
    pub fn shutdown(&self) {
        let mut shared = self.shared.lock();
        shared.release_ticker();
        if shared.meter.state().is_running {
            shared.meter.toggle_running();
            shared.render();
        }
        info!("Meter service shut down");
    }

    fn acquire_ticker(&self, shared: &mut Shared) {
        shared.release_ticker();
        let generation = shared.generation;
        let weak = Arc::downgrade(&self.shared);

        shared.ticker = Some(TickerHandle::spawn(
            &self.runtime,
            self.config.tick_interval,
            generation,
            move || tick_shared(&weak, generation),
        ));
    }
}

impl Drop for MeterService {
    fn drop(&mut self) {
        self.shared.lock().release_ticker();
    }
}

/// Apply one tick if the ticker that fired is still current
fn tick_shared(shared: &Weak<Mutex<Shared>>, generation: u64) -> bool {
    let Some(strong) = shared.upgrade() else {
        return false;
    };
    let mut shared = strong.lock();

    if shared.generation != generation {
        warn!(
            stale = generation,
            current = shared.generation,
            "Dropping tick from released tick source"
        );
        return false;
    }

    if !shared.meter.tick() {
        return false;
    }
    shared.render();
    true
}
