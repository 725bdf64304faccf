//! Tariff band value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Tariff band (bandeira)
///
/// Selects which per-kilometer rate applies to the whole accumulated
/// distance. Serialized as its number (1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Band {
    /// Band 1 - regular rate
    #[default]
    One,
    /// Band 2 - higher rate
    Two,
}

impl Band {
    /// Band number as shown to the driver
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The other band
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Band {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(DomainError::InvalidBand(other)),
        }
    }
}

impl From<Band> for u8 {
    fn from(band: Band) -> Self {
        band.number()
    }
}
