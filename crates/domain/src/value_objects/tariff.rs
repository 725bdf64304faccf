//! Tariff configuration value object
//!
//! Tariff fields are kept as the raw text the driver typed so that partial
//! input such as `"2,"` survives while editing. Values are parsed on use and
//! anything unparseable counts as zero.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::Band;
use crate::errors::DomainError;

/// Parse a tariff amount typed by the driver
///
/// Accepts `.` or `,` as decimal separator (the first comma is read as a
/// dot) and uses the longest leading decimal literal, so `"2,"` is `2.0` and
/// `"2.5abc"` is `2.5`. Returns `0.0` for empty, unparseable, negative or
/// non-finite input. Never fails.
#[must_use]
pub fn parse_fare(text: &str) -> f64 {
    let normalized = text.trim().replacen(',', ".", 1);
    let literal = leading_decimal_literal(&normalized);

    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Longest prefix of `text` shaped like `[+-]digits[.digits][(e|E)[+-]digits]`
fn leading_decimal_literal(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

/// One of the editable tariff fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffField {
    /// Flag-fall charged when the ride starts
    InitialFare,
    /// Per-kilometer rate on band 1
    FarePerKmBand1,
    /// Per-kilometer rate on band 2
    FarePerKmBand2,
    /// Per-minute rate while stopped in traffic
    FarePerMinuteStopped,
}

impl TariffField {
    /// Snake-case field name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InitialFare => "initial_fare",
            Self::FarePerKmBand1 => "fare_per_km_band1",
            Self::FarePerKmBand2 => "fare_per_km_band2",
            Self::FarePerMinuteStopped => "fare_per_minute_stopped",
        }
    }

    /// Label shown next to the input
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InitialFare => "Bandeirada (R$)",
            Self::FarePerKmBand1 => "Valor/Km (Bandeira 1 - R$)",
            Self::FarePerKmBand2 => "Valor/Km (Bandeira 2 - R$)",
            Self::FarePerMinuteStopped => "Valor/Min Parado (R$)",
        }
    }

    /// All fields in display order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::InitialFare,
            Self::FarePerKmBand1,
            Self::FarePerKmBand2,
            Self::FarePerMinuteStopped,
        ]
    }
}

impl fmt::Display for TariffField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TariffField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::InvalidTariffField(s.to_string()))
    }
}

/// Driver-editable tariff, stored as raw text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    /// Flag-fall (bandeirada)
    pub initial_fare: String,
    /// Per-kilometer rate on band 1
    pub fare_per_km_band1: String,
    /// Per-kilometer rate on band 2
    pub fare_per_km_band2: String,
    /// Per-minute rate while stopped
    pub fare_per_minute_stopped: String,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            initial_fare: "5.00".to_string(),
            fare_per_km_band1: "2.50".to_string(),
            fare_per_km_band2: "3.20".to_string(),
            fare_per_minute_stopped: "0.50".to_string(),
        }
    }
}

impl TariffConfig {
    /// Raw text of a field
    #[must_use]
    pub fn get(&self, field: TariffField) -> &str {
        match field {
            TariffField::InitialFare => &self.initial_fare,
            TariffField::FarePerKmBand1 => &self.fare_per_km_band1,
            TariffField::FarePerKmBand2 => &self.fare_per_km_band2,
            TariffField::FarePerMinuteStopped => &self.fare_per_minute_stopped,
        }
    }

    /// Replace the raw text of a field
    pub fn set(&mut self, field: TariffField, value: impl Into<String>) {
        let slot = match field {
            TariffField::InitialFare => &mut self.initial_fare,
            TariffField::FarePerKmBand1 => &mut self.fare_per_km_band1,
            TariffField::FarePerKmBand2 => &mut self.fare_per_km_band2,
            TariffField::FarePerMinuteStopped => &mut self.fare_per_minute_stopped,
        };
        *slot = value.into();
    }

    /// Parsed flag-fall
    #[must_use]
    pub fn initial_fare(&self) -> f64 {
        parse_fare(&self.initial_fare)
    }

    /// Parsed per-kilometer rate for a band
    #[must_use]
    pub fn fare_per_km(&self, band: Band) -> f64 {
        match band {
            Band::One => parse_fare(&self.fare_per_km_band1),
            Band::Two => parse_fare(&self.fare_per_km_band2),
        }
    }

    /// Parsed per-minute stopped rate
    #[must_use]
    pub fn fare_per_minute_stopped(&self) -> f64 {
        parse_fare(&self.fare_per_minute_stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parses_dot_decimal() {
        assert_close(parse_fare("2.50"), 2.5);
        assert_close(parse_fare("5"), 5.0);
        assert_close(parse_fare(".5"), 0.5);
    }

    #[test]
    fn parses_comma_decimal() {
        assert_close(parse_fare("2,50"), 2.5);
        assert_close(parse_fare("0,5"), 0.5);
    }

    #[test]
    fn partial_input_uses_leading_number() {
        assert_close(parse_fare("2,"), 2.0);
        assert_close(parse_fare("2."), 2.0);
        assert_close(parse_fare("2.5abc"), 2.5);
        assert_close(parse_fare("3 reais"), 3.0);
    }

    #[test]
    fn only_first_comma_is_a_separator() {
        assert_close(parse_fare("1,234,5"), 1.234);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_close(parse_fare("  4,75 "), 4.75);
    }

    #[test]
    fn exponent_is_honored() {
        assert_close(parse_fare("1e2"), 100.0);
        assert_close(parse_fare("2.5E-1"), 0.25);
        assert_close(parse_fare("3e"), 3.0);
    }

    #[test]
    fn invalid_input_is_zero() {
        assert_close(parse_fare(""), 0.0);
        assert_close(parse_fare("abc"), 0.0);
        assert_close(parse_fare(","), 0.0);
        assert_close(parse_fare("."), 0.0);
        assert_close(parse_fare("-"), 0.0);
        assert_close(parse_fare("R$ 5"), 0.0);
    }

    #[test]
    fn negative_and_non_finite_are_zero() {
        assert_close(parse_fare("-3.00"), 0.0);
        assert_close(parse_fare("inf"), 0.0);
        assert_close(parse_fare("NaN"), 0.0);
        assert_close(parse_fare("1e400"), 0.0);
    }

    #[test]
    fn default_tariff_values() {
        let tariff = TariffConfig::default();
        assert_close(tariff.initial_fare(), 5.0);
        assert_close(tariff.fare_per_km(Band::One), 2.5);
        assert_close(tariff.fare_per_km(Band::Two), 3.2);
        assert_close(tariff.fare_per_minute_stopped(), 0.5);
    }

    #[test]
    fn set_and_get_field() {
        let mut tariff = TariffConfig::default();
        tariff.set(TariffField::FarePerKmBand2, "4,");
        assert_eq!(tariff.get(TariffField::FarePerKmBand2), "4,");
        assert_close(tariff.fare_per_km(Band::Two), 4.0);
    }

    #[test]
    fn field_from_str() {
        assert_eq!(
            "fare_per_minute_stopped".parse::<TariffField>().unwrap(),
            TariffField::FarePerMinuteStopped
        );
        assert_eq!(
            "tip".parse::<TariffField>(),
            Err(DomainError::InvalidTariffField("tip".to_string()))
        );
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let tariff: TariffConfig =
            serde_json::from_str(r#"{"fare_per_km_band2":"4,10"}"#).expect("deserialize");
        assert_eq!(tariff.initial_fare, "5.00");
        assert_eq!(tariff.fare_per_km_band2, "4,10");
    }

    #[test]
    fn field_names_round_trip_through_display() {
        for field in TariffField::all() {
            assert_eq!(field.to_string().parse::<TariffField>().unwrap(), field);
        }
    }
}
