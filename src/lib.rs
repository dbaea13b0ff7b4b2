pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::ShippingConfig;
pub use crate::core::{currency, fee::FeeCalculator, lifecycle::ConsolidationLifecycle};
pub use domain::model::{
    BoxConsolidation, BoxStatus, BoxType, ConsolidatedItem, FeeBreakdown, FeeRates,
    ItemReceived, ShippingQuote, StoragePolicy, StorageStatus,
};
pub use utils::error::{ConsolidationError, Result};
