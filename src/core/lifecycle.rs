//! Box lifecycle: `open -> closed -> shipped -> delivered`.
//!
//! Items are only accepted while a box is open. The first item fixes the
//! free-period deadline; closing prices the box and freezes the penalty.

use crate::core::fee::FeeCalculator;
use crate::domain::model::{
    BoxConsolidation, BoxStatus, BoxType, ConsolidatedItem, FeeRates, ItemReceived,
    ShippingQuote, StoragePolicy,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConsolidationError, Result};
use crate::utils::validation::validate_non_negative;
use chrono::{DateTime, Duration, Utc};

const DEFAULT_QUOTE_VALIDITY_HOURS: i64 = 72;

/// Drives a box through `open -> closed -> shipped -> delivered`.
///
/// Every operation checks its guard and validates its input before touching
/// the box, so a rejected call leaves the aggregate exactly as it was.
/// Callers serialize operations on the same box.
#[derive(Debug, Clone)]
pub struct ConsolidationLifecycle {
    calculator: FeeCalculator,
    policy: StoragePolicy,
    quote_validity: Duration,
}

impl Default for ConsolidationLifecycle {
    fn default() -> Self {
        Self::new(
            FeeRates::default(),
            StoragePolicy::default(),
            Duration::hours(DEFAULT_QUOTE_VALIDITY_HOURS),
        )
    }
}

impl ConsolidationLifecycle {
    pub fn new(rates: FeeRates, policy: StoragePolicy, quote_validity: Duration) -> Self {
        Self {
            calculator: FeeCalculator::new(rates),
            policy,
            quote_validity,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.fee_rates(),
            config.storage_policy(),
            config.quote_validity(),
        )
    }

    pub fn with_storage_policy(mut self, free_period_days: i64, daily_penalty: i64) -> Self {
        self.policy = StoragePolicy {
            free_period_days,
            daily_penalty,
        };
        self
    }

    /// New empty box. The free period starts with the first item, not here.
    pub fn create_box(
        &self,
        id: impl Into<String>,
        customer_id: impl Into<String>,
        box_number: u32,
        created_at: DateTime<Utc>,
    ) -> BoxConsolidation {
        let b = BoxConsolidation {
            id: id.into(),
            customer_id: customer_id.into(),
            box_number,
            status: BoxStatus::Open,
            box_type: BoxType::default(),
            items: Vec::new(),
            total_weight_kg: 0.0,
            total_volume_cbm: 0.0,
            free_period_days: self.policy.free_period_days,
            first_item_received_at: None,
            free_period_end: None,
            penalty_start_date: None,
            daily_penalty: self.policy.daily_penalty,
            final_quote: None,
            created_at,
            closed_at: None,
            shipped_at: None,
            delivered_at: None,
            next_item_seq: 1,
        };
        tracing::info!(
            "📦 Created box {} (#{}) for customer {}",
            b.id,
            b.box_number,
            b.customer_id
        );
        b
    }

    pub fn receive_item<'a>(
        &self,
        b: &'a mut BoxConsolidation,
        event: ItemReceived,
    ) -> Result<&'a ConsolidatedItem> {
        require_status(b, BoxStatus::Open, "receive items into")?;
        let item_id = format!("{}-{:03}", b.id, b.next_item_seq);
        let item = item_from_event(item_id, event)?;

        if b.first_item_received_at.is_none() {
            let free_period_end = free_period_end(item.received_at, b.free_period_days)?;
            b.first_item_received_at = Some(item.received_at);
            b.free_period_end = Some(free_period_end);
            tracing::info!("⏱️ Box {} free storage runs until {}", b.id, free_period_end);
        }
        b.next_item_seq += 1;
        b.items.push(item);
        b.recompute_totals();

        tracing::info!(
            "📥 Box {} received item ({} items, {:.2} kg, {:.4} cbm)",
            b.id,
            b.items.len(),
            b.total_weight_kg,
            b.total_volume_cbm
        );
        Ok(&b.items[b.items.len() - 1])
    }

    /// Corrects a recorded item. The id is kept and the free period never moves.
    pub fn replace_item(
        &self,
        b: &mut BoxConsolidation,
        item_id: &str,
        event: ItemReceived,
    ) -> Result<()> {
        require_status(b, BoxStatus::Open, "correct items in")?;
        let index = b
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| ConsolidationError::ItemNotFound {
                item_id: item_id.to_string(),
            })?;
        let replacement = item_from_event(item_id.to_string(), event)?;

        b.items[index] = replacement;
        b.recompute_totals();
        tracing::info!("✏️ Box {} item {} corrected", b.id, item_id);
        Ok(())
    }

    /// Stamps `penalty_start_date` the first time an open box is seen past its
    /// free period. Returns whether it was set by this call.
    pub fn record_penalty_start(&self, b: &mut BoxConsolidation, now: DateTime<Utc>) -> bool {
        if !b.is_open() || b.penalty_start_date.is_some() {
            return false;
        }
        match b.free_period_end {
            Some(end) if now > end => {
                b.penalty_start_date = Some(end);
                tracing::warn!(
                    "⚠️ Box {} is past its free period; {} PHP per day from {}",
                    b.id,
                    b.daily_penalty,
                    end
                );
                true
            }
            _ => false,
        }
    }

    pub fn close_box(
        &self,
        b: &mut BoxConsolidation,
        box_type: BoxType,
        now: DateTime<Utc>,
    ) -> Result<ShippingQuote> {
        require_status(b, BoxStatus::Open, "close")?;

        let penalty = b.current_penalty(now)?;
        let quote = self.calculator.quote(
            box_type,
            b.total_weight_kg,
            b.total_volume_cbm,
            penalty,
            now,
            self.quote_validity,
        )?;

        self.record_penalty_start(b, now);
        b.status = BoxStatus::Closed;
        b.box_type = box_type;
        b.closed_at = Some(now);
        b.final_quote = Some(quote.clone());

        tracing::info!(
            "🔒 Closed box {} as {}: fees {} + penalty {} = {} PHP",
            b.id,
            box_type,
            quote.fees.total,
            quote.storage_penalty,
            quote.total_due
        );
        Ok(quote)
    }

    pub fn ship_box(&self, b: &mut BoxConsolidation, now: DateTime<Utc>) -> Result<()> {
        require_status(b, BoxStatus::Closed, "ship")?;
        b.status = BoxStatus::Shipped;
        b.shipped_at = Some(now);
        tracing::info!("🚚 Box {} shipped", b.id);
        Ok(())
    }

    pub fn deliver_box(&self, b: &mut BoxConsolidation, now: DateTime<Utc>) -> Result<()> {
        require_status(b, BoxStatus::Shipped, "deliver")?;
        b.status = BoxStatus::Delivered;
        b.delivered_at = Some(now);
        tracing::info!("✅ Box {} delivered", b.id);
        Ok(())
    }
}

fn require_status(b: &BoxConsolidation, expected: BoxStatus, operation: &str) -> Result<()> {
    if b.status != expected {
        tracing::warn!(
            "Rejected '{}' on box {}: status is {}",
            operation,
            b.id,
            b.status
        );
        return Err(ConsolidationError::invalid_state(operation, b.status));
    }
    Ok(())
}

fn free_period_end(received_at: DateTime<Utc>, free_period_days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(free_period_days)
        .and_then(|period| received_at.checked_add_signed(period))
        .ok_or_else(|| {
            ConsolidationError::invalid_argument(
                "free_period_days",
                free_period_days,
                "Free period runs past the supported date range",
            )
        })
}

fn item_from_event(id: String, event: ItemReceived) -> Result<ConsolidatedItem> {
    validate_non_negative("weight_kg", event.weight_kg)?;
    let dimensions = event.dimensions();
    if let Some(dims) = &dimensions {
        validate_non_negative("length_cm", dims.length_cm)?;
        validate_non_negative("width_cm", dims.width_cm)?;
        validate_non_negative("height_cm", dims.height_cm)?;
    }

    let volume_cbm = match (event.volume_cbm, &dimensions) {
        (Some(volume), _) => volume,
        (None, Some(dims)) => dims.volume_cbm(),
        (None, None) => {
            return Err(ConsolidationError::invalid_argument(
                "volume_cbm",
                "none",
                "Either a volume or all three dimensions are required",
            ))
        }
    };
    validate_non_negative("volume_cbm", volume_cbm)?;

    Ok(ConsolidatedItem {
        id,
        tracking_number: event.tracking_number.filter(|t| !t.trim().is_empty()),
        received_at: event.received_at,
        weight_kg: event.weight_kg,
        volume_cbm,
        dimensions,
    })
}
