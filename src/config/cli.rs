use crate::core::currency::Currency;
use crate::domain::model::BoxType;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Price a shipment from its weight and volume
    Quote {
        #[arg(long)]
        weight: f64,

        /// Volume in cubic metres
        #[arg(long)]
        volume: f64,

        #[arg(long, default_value = "solo")]
        box_type: BoxType,

        #[arg(long)]
        json: bool,
    },

    /// Convert an amount between KRW and PHP
    Convert {
        #[arg(long)]
        amount: f64,

        #[arg(long)]
        from: Currency,

        /// PHP per KRW; falls back to currency.krw_to_php_rate from the config file
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Rebuild a box from a CSV of received items and report its charges
    Replay {
        #[arg(long)]
        events: PathBuf,

        #[arg(long, default_value = "BOX-REPLAY")]
        box_id: String,

        #[arg(long, default_value = "customer")]
        customer_id: String,

        #[arg(long, default_value = "solo")]
        box_type: BoxType,

        /// Evaluation time (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Close the box at the evaluation time and print the final quote
        #[arg(long)]
        close: bool,

        #[arg(long)]
        json: bool,
    },
}
