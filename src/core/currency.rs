// KRW <-> PHP conversion with a caller-supplied rate. Rates are never fetched here.

use crate::utils::error::Result;
use crate::utils::rounding::{round2, round_whole};
use crate::utils::validation::{validate_non_negative, validate_rate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Krw,
    Php,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Krw => f.write_str("KRW"),
            Currency::Php => f.write_str("PHP"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KRW" => Ok(Currency::Krw),
            "PHP" => Ok(Currency::Php),
            other => Err(format!("unsupported currency '{}', expected KRW or PHP", other)),
        }
    }
}

/// PHP has centavos, so the result keeps two decimals.
pub fn convert_krw_to_php(amount: f64, rate: f64) -> Result<f64> {
    validate_non_negative("amount", amount)?;
    validate_rate("rate", rate)?;
    let converted = round2(amount * rate);
    validate_non_negative("amount", converted)?;
    Ok(converted)
}

/// KRW is handled in whole won.
pub fn convert_php_to_krw(amount: f64, rate: f64) -> Result<i64> {
    validate_non_negative("amount", amount)?;
    validate_rate("rate", rate)?;
    round_whole("amount", amount * rate)
}
