//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod tracing_display;

pub use tracing_display::TracingDisplay;
