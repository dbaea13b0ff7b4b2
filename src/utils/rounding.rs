// Monetary rounding. Inputs are validated non-negative before they get here,
// so f64::round (half away from zero) is round-half-up.

use crate::utils::error::{ConsolidationError, Result};

/// Largest whole amount any fee or conversion may produce. Well inside both
/// `i64` and the exactly representable integer range of `f64`.
pub const MAX_WHOLE_AMOUNT: f64 = 1e15;

/// Nearest whole currency unit.
pub fn round_whole(field_name: &str, value: f64) -> Result<i64> {
    if !value.is_finite() || value.abs() > MAX_WHOLE_AMOUNT {
        return Err(ConsolidationError::invalid_argument(
            field_name,
            value,
            format!("Amount exceeds the supported maximum of {}", MAX_WHOLE_AMOUNT),
        ));
    }
    Ok(value.round() as i64)
}

/// Adds two whole amounts, reporting overflow instead of panicking.
pub fn checked_sum(field_name: &str, a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or_else(|| {
        ConsolidationError::invalid_argument(field_name, format!("{} + {}", a, b), "Amount overflow")
    })
}

/// Two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
