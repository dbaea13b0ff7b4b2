pub mod currency;
pub mod fee;
pub mod lifecycle;
pub mod penalty;

pub use crate::domain::model::{
    BoxConsolidation, BoxStatus, BoxType, ConsolidatedItem, FeeBreakdown, ItemReceived,
    ShippingQuote, StorageStatus,
};
pub use crate::domain::ports::{Clock, ConfigProvider};
pub use crate::utils::error::Result;
