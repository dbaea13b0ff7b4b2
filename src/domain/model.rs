use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a box. Declared in transition order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxStatus {
    Open,
    Closed,
    Shipped,
    Delivered,
}

impl fmt::Display for BoxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BoxStatus::Open => "open",
            BoxStatus::Closed => "closed",
            BoxStatus::Shipped => "shipped",
            BoxStatus::Delivered => "delivered",
        };
        f.write_str(s)
    }
}

/// Sharing arrangement chosen by the customer. Only affects the local fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxType {
    #[default]
    Solo,
    Shared,
}

impl fmt::Display for BoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxType::Solo => f.write_str("solo"),
            BoxType::Shared => f.write_str("shared"),
        }
    }
}

impl FromStr for BoxType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solo" => Ok(BoxType::Solo),
            "shared" => Ok(BoxType::Shared),
            other => Err(format!("unknown box type '{}', expected solo or shared", other)),
        }
    }
}

/// Outer dimensions of a parcel, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn volume_cbm(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / 1_000_000.0
    }
}

/// Item-received event as produced by the warehouse intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReceived {
    #[serde(default)]
    pub tracking_number: Option<String>,
    pub received_at: DateTime<Utc>,
    pub weight_kg: f64,
    #[serde(default)]
    pub volume_cbm: Option<f64>,
    #[serde(default)]
    pub length_cm: Option<f64>,
    #[serde(default)]
    pub width_cm: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
}

impl ItemReceived {
    pub fn new(received_at: DateTime<Utc>, weight_kg: f64, volume_cbm: f64) -> Self {
        Self {
            tracking_number: None,
            received_at,
            weight_kg,
            volume_cbm: Some(volume_cbm),
            length_cm: None,
            width_cm: None,
            height_cm: None,
        }
    }

    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        match (self.length_cm, self.width_cm, self.height_cm) {
            (Some(length_cm), Some(width_cm), Some(height_cm)) => Some(Dimensions {
                length_cm,
                width_cm,
                height_cm,
            }),
            _ => None,
        }
    }
}

/// One physical item inside a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedItem {
    pub id: String,
    pub tracking_number: Option<String>,
    pub received_at: DateTime<Utc>,
    pub weight_kg: f64,
    pub volume_cbm: f64,
    pub dimensions: Option<Dimensions>,
}

/// Rate constants for the two-part shipping fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeRates {
    /// PHP per cubic metre, international leg.
    pub isf_volume_rate: f64,
    /// PHP per kg, international leg.
    pub isf_weight_rate: f64,
    pub lsf_volume_rate: f64,
    pub lsf_weight_rate: f64,
    /// Fraction of the solo local fee charged for a shared box.
    pub shared_multiplier: f64,
}

impl Default for FeeRates {
    fn default() -> Self {
        Self {
            isf_volume_rate: 6000.0,
            isf_weight_rate: 80.0,
            lsf_volume_rate: 2000.0,
            lsf_weight_rate: 20.0,
            shared_multiplier: 0.4,
        }
    }
}

/// Free storage window and the penalty charged after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoragePolicy {
    pub free_period_days: i64,
    /// Whole PHP per started day past the free period.
    pub daily_penalty: i64,
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self {
            free_period_days: 30,
            daily_penalty: 50,
        }
    }
}

/// Priced breakdown for one (weight, volume) pair. All amounts in whole PHP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub box_type: BoxType,
    pub isf: i64,
    pub lsf: i64,
    pub total: i64,
    pub solo_lsf: i64,
    pub solo_total: i64,
    pub shared_lsf: i64,
    pub shared_total: i64,
}

impl FeeBreakdown {
    pub fn savings(&self) -> i64 {
        self.solo_total - self.shared_total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub box_type: BoxType,
    pub fees: FeeBreakdown,
    pub storage_penalty: i64,
    pub surcharges: i64,
    pub total_due: i64,
    pub issued_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

/// What a reminder or dashboard needs to know about storage charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StorageStatus {
    Empty,
    FreePeriod { days_remaining: i64 },
    Overdue { days: i64, penalty: i64 },
    Settled { penalty: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxConsolidation {
    pub id: String,
    pub customer_id: String,
    pub box_number: u32,
    pub status: BoxStatus,
    pub box_type: BoxType,
    pub items: Vec<ConsolidatedItem>,
    pub total_weight_kg: f64,
    pub total_volume_cbm: f64,
    pub free_period_days: i64,
    pub first_item_received_at: Option<DateTime<Utc>>,
    pub free_period_end: Option<DateTime<Utc>>,
    pub penalty_start_date: Option<DateTime<Utc>>,
    pub daily_penalty: i64,
    pub final_quote: Option<ShippingQuote>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    /// Next item sequence number; ids stay unique across corrections.
    pub(crate) next_item_seq: u32,
}

impl BoxConsolidation {
    pub fn item(&self, item_id: &str) -> Option<&ConsolidatedItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn is_open(&self) -> bool {
        self.status == BoxStatus::Open
    }

    pub(crate) fn recompute_totals(&mut self) {
        self.total_weight_kg = self.items.iter().map(|item| item.weight_kg).sum();
        self.total_volume_cbm = self.items.iter().map(|item| item.volume_cbm).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_type_parsing() {
        assert_eq!("solo".parse::<BoxType>().unwrap(), BoxType::Solo);
        assert_eq!(" Shared ".parse::<BoxType>().unwrap(), BoxType::Shared);
        assert!("group".parse::<BoxType>().is_err());
    }

    #[test]
    fn test_status_order_follows_lifecycle() {
        assert!(BoxStatus::Open < BoxStatus::Closed);
        assert!(BoxStatus::Closed < BoxStatus::Shipped);
        assert!(BoxStatus::Shipped < BoxStatus::Delivered);
    }

    #[test]
    fn test_dimensions_volume() {
        let dims = Dimensions {
            length_cm: 50.0,
            width_cm: 40.0,
            height_cm: 50.0,
        };
        assert!((dims.volume_cbm() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_storage_status_serializes_with_tag() {
        let json = serde_json::to_value(StorageStatus::Overdue { days: 2, penalty: 100 }).unwrap();
        assert_eq!(json["state"], "overdue");
        assert_eq!(json["penalty"], 100);
    }
}
