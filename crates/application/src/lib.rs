//! Application layer - Use cases and orchestration
//!
//! Runs the fare meter: owns the tick source, dispatches driver commands
//! and pushes display snapshots through the display port.

pub mod error;
pub mod ports;
pub mod services;
pub mod ticker;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
pub use ticker::TickerHandle;
