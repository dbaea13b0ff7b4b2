use crate::domain::model::{FeeRates, StoragePolicy};
use chrono::{DateTime, Duration, Utc};

/// Externally owned tuning knobs. The engine reads them, never stores them globally.
pub trait ConfigProvider: Send + Sync {
    fn fee_rates(&self) -> FeeRates;
    fn storage_policy(&self) -> StoragePolicy;
    fn quote_validity(&self) -> Duration;
}

/// Source of "now" for callers. The engine itself only takes explicit timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
