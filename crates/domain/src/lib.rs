//! Domain layer for the taximeter
//!
//! Contains the fare meter state machine, tariff value objects, display
//! formatting and domain errors. No I/O, no clock: ticks are driven from
//! the application layer.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod formatting;
pub mod value_objects;

pub use commands::MeterCommand;
pub use entities::*;
pub use errors::DomainError;
pub use formatting::{format_currency, format_decimal, format_elapsed};
pub use value_objects::*;
