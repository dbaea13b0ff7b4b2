//! Two-part shipping fee: the international service fee (ISF, Korea to Manila)
//! and the local service fee (LSF, Manila to the customer).
//!
//! Both fees depend on physical attributes only. The ISF and the solo LSF are
//! rounded where they are produced; the shared LSF is the solo LSF scaled by
//! the shared multiplier and rounded. Totals are sums of already-rounded
//! parts so that `isf + lsf == total` always holds.

use crate::core::currency;
use crate::domain::model::{BoxType, FeeBreakdown, FeeRates, ShippingQuote};
use crate::utils::error::{ConsolidationError, Result};
use crate::utils::rounding::{checked_sum, round_whole};
use crate::utils::validation::validate_non_negative;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub struct FeeCalculator {
    rates: FeeRates,
}

impl FeeCalculator {
    pub fn new(rates: FeeRates) -> Self {
        Self { rates }
    }

    /// `round(volume * isf_volume_rate + weight * isf_weight_rate)`, same for every box type.
    pub fn calculate_isf(&self, weight_kg: f64, volume_cbm: f64) -> Result<i64> {
        validate_inputs(weight_kg, volume_cbm)?;
        round_whole(
            "isf",
            volume_cbm * self.rates.isf_volume_rate + weight_kg * self.rates.isf_weight_rate,
        )
    }

    pub fn calculate_lsf(&self, box_type: BoxType, weight_kg: f64, volume_cbm: f64) -> Result<i64> {
        validate_inputs(weight_kg, volume_cbm)?;
        let (solo, shared) = self.lsf_variants(weight_kg, volume_cbm)?;
        Ok(match box_type {
            BoxType::Solo => solo,
            BoxType::Shared => shared,
        })
    }

    pub fn calculate_shipping_fee(
        &self,
        box_type: BoxType,
        weight_kg: f64,
        volume_cbm: f64,
    ) -> Result<FeeBreakdown> {
        let isf = self.calculate_isf(weight_kg, volume_cbm)?;
        let (solo_lsf, shared_lsf) = self.lsf_variants(weight_kg, volume_cbm)?;
        let lsf = match box_type {
            BoxType::Solo => solo_lsf,
            BoxType::Shared => shared_lsf,
        };

        let breakdown = FeeBreakdown {
            box_type,
            isf,
            lsf,
            total: checked_sum("total", isf, lsf)?,
            solo_lsf,
            solo_total: checked_sum("solo_total", isf, solo_lsf)?,
            shared_lsf,
            shared_total: checked_sum("shared_total", isf, shared_lsf)?,
        };
        tracing::debug!(
            "Fee for {} box ({} kg, {} cbm): ISF {} + LSF {} = {}",
            box_type,
            weight_kg,
            volume_cbm,
            breakdown.isf,
            breakdown.lsf,
            breakdown.total
        );
        Ok(breakdown)
    }

    /// Prices a shipment and adds the storage penalty as a surcharge.
    pub fn quote(
        &self,
        box_type: BoxType,
        weight_kg: f64,
        volume_cbm: f64,
        storage_penalty: i64,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Result<ShippingQuote> {
        validate_non_negative("storage_penalty", storage_penalty as f64)?;
        let fees = self.calculate_shipping_fee(box_type, weight_kg, volume_cbm)?;
        let surcharges = storage_penalty;
        let valid_until = issued_at.checked_add_signed(validity).ok_or_else(|| {
            ConsolidationError::invalid_argument(
                "quote_validity",
                validity,
                "Validity window runs past the supported date range",
            )
        })?;

        Ok(ShippingQuote {
            box_type,
            fees,
            storage_penalty,
            surcharges,
            total_due: checked_sum("total_due", fees.total, surcharges)?,
            issued_at,
            valid_until,
        })
    }

    // Solo LSF from the raw figure; shared LSF scales the rounded solo LSF.
    fn lsf_variants(&self, weight_kg: f64, volume_cbm: f64) -> Result<(i64, i64)> {
        let raw = volume_cbm * self.rates.lsf_volume_rate + weight_kg * self.rates.lsf_weight_rate;
        let solo = round_whole("lsf", raw)?;
        let shared = round_whole("lsf", solo as f64 * self.rates.shared_multiplier)?;
        Ok((solo, shared))
    }
}

fn validate_inputs(weight_kg: f64, volume_cbm: f64) -> Result<()> {
    validate_non_negative("weight_kg", weight_kg)?;
    validate_non_negative("volume_cbm", volume_cbm)
}

impl ShippingQuote {
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.issued_at && at <= self.valid_until
    }

    /// Amount due converted for a customer viewing prices in KRW.
    pub fn total_due_in_krw(&self, php_to_krw_rate: f64) -> Result<i64> {
        currency::convert_php_to_krw(self.total_due as f64, php_to_krw_rate)
    }
}
