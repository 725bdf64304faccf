//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
///
/// The ride itself never fails: unparseable tariff text degrades to zero.
/// These errors only cover conversions at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Band number outside of {1, 2}
    #[error("Invalid tariff band: {0}")]
    InvalidBand(u8),

    /// Unknown tariff field name
    #[error("Invalid tariff field: {0}")]
    InvalidTariffField(String),
}
