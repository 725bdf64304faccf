//! Value Objects - Immutable, identity-less domain primitives

mod band;
mod meter_status;
mod tariff;

pub use band::Band;
pub use meter_status::MeterStatus;
pub use tariff::{TariffConfig, TariffField, parse_fare};
