use crate::domain::model::{FeeRates, StoragePolicy};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConsolidationError, Result};
use crate::utils::validation::{validate_config_non_negative, validate_range, Validate};
use chrono::Duration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_FREE_PERIOD_DAYS: i64 = 3650;
const MAX_DAILY_PENALTY: i64 = 1_000_000;
const MAX_QUOTE_VALIDITY_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingConfig {
    pub rates: FeeRates,
    pub storage: StoragePolicy,
    pub quote: QuoteConfig,
    pub currency: CurrencyConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub validity_hours: i64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self { validity_hours: 72 }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// PHP per 1 KRW. Only a CLI fallback; the engine always takes the rate as an argument.
    pub krw_to_php_rate: Option<f64>,
}

impl ShippingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DAILY_PENALTY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConsolidationError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_config_non_negative("rates.isf_volume_rate", self.rates.isf_volume_rate)?;
        validate_config_non_negative("rates.isf_weight_rate", self.rates.isf_weight_rate)?;
        validate_config_non_negative("rates.lsf_volume_rate", self.rates.lsf_volume_rate)?;
        validate_config_non_negative("rates.lsf_weight_rate", self.rates.lsf_weight_rate)?;
        if self.rates.shared_multiplier <= 0.0 {
            return Err(ConsolidationError::InvalidConfigValueError {
                field: "rates.shared_multiplier".to_string(),
                value: self.rates.shared_multiplier.to_string(),
                reason: "A shared box must still pay part of the local fee".to_string(),
            });
        }
        validate_range("rates.shared_multiplier", self.rates.shared_multiplier, 0.0, 1.0)?;

        validate_range(
            "storage.free_period_days",
            self.storage.free_period_days,
            1,
            MAX_FREE_PERIOD_DAYS,
        )?;
        validate_range(
            "storage.daily_penalty",
            self.storage.daily_penalty,
            0,
            MAX_DAILY_PENALTY,
        )?;
        validate_range(
            "quote.validity_hours",
            self.quote.validity_hours,
            1,
            MAX_QUOTE_VALIDITY_HOURS,
        )?;

        if let Some(rate) = self.currency.krw_to_php_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConsolidationError::InvalidConfigValueError {
                    field: "currency.krw_to_php_rate".to_string(),
                    value: rate.to_string(),
                    reason: "Rate must be a positive finite number".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for ShippingConfig {
    fn fee_rates(&self) -> FeeRates {
        self.rates
    }

    fn storage_policy(&self) -> StoragePolicy {
        self.storage
    }

    fn quote_validity(&self) -> Duration {
        // out-of-range windows surface as an error when a quote is issued
        Duration::try_hours(self.quote.validity_hours).unwrap_or(Duration::MAX)
    }
}

impl Validate for ShippingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
