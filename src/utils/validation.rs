use crate::utils::error::{ConsolidationError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Physical and monetary inputs: finite and >= 0.
pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ConsolidationError::invalid_argument(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(ConsolidationError::invalid_argument(
            field_name,
            value,
            "Value must not be negative",
        ));
    }
    Ok(())
}

/// Exchange rates: finite and strictly positive.
pub fn validate_rate(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConsolidationError::invalid_argument(
            field_name,
            value,
            "Rate must be a positive finite number",
        ));
    }
    Ok(())
}

pub fn validate_config_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConsolidationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a non-negative finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(ConsolidationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
