//! Domain entities - Objects with identity and lifecycle

mod fare_meter;
mod meter_view;

pub use fare_meter::{DEFAULT_SIMULATED_SPEED_KMH, FareMeter, RideState, compute_fare};
pub use meter_view::MeterView;
