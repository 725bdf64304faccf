//! Display formatting for meter values

/// Format a second counter as `MM:SS`
///
/// Minutes are not rolled over into hours, so 4503 seconds is `"75:03"`.
#[must_use]
pub fn format_elapsed(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Two decimals with a comma separator, e.g. `"1,25"`
///
/// Values exactly halfway between two cents round away from zero, so
/// `5.125` shows as `"5,13"`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", round_cent_ties_away(value)).replacen('.', ",", 1)
}

/// Resolve exact half-cent ties away from zero; other values are left to
/// the formatter, which rounds to the nearest cent
#[allow(clippy::float_cmp)]
fn round_cent_ties_away(value: f64) -> f64 {
    // Only odd multiples of 1/8 sit exactly on a half cent
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (value * 100.0).round() / 100.0
    } else {
        value
    }
}

/// Currency amount, e.g. `"R$ 7,50"`
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_decimal(value))
}
