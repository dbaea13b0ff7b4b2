use anyhow::Context;
use box_consolidation::adapters::clock::{FixedClock, SystemClock};
use box_consolidation::adapters::csv_ingest::read_item_events_from_path;
use box_consolidation::config::cli::Command;
use box_consolidation::core::currency::{self, Currency};
use box_consolidation::domain::ports::{Clock, ConfigProvider};
use box_consolidation::utils::error::ErrorSeverity;
use box_consolidation::utils::{logger, validation::Validate};
use box_consolidation::{
    BoxType, CliConfig, ConsolidationError, ConsolidationLifecycle, FeeCalculator,
    ShippingConfig,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli) {
        let exit_code = match e.downcast_ref::<ConsolidationError>() {
            Some(err) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    e,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
                match err.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: CliConfig) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Quote {
            weight,
            volume,
            box_type,
            json,
        } => {
            let calculator = FeeCalculator::new(config.fee_rates());
            let fee = calculator.calculate_shipping_fee(box_type, weight, volume)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fee)?);
            } else {
                println!("Box type:   {}", fee.box_type);
                println!("ISF:        ₱{}", fee.isf);
                println!("LSF:        ₱{}", fee.lsf);
                println!("Total:      ₱{}", fee.total);
                println!(
                    "Solo ₱{} vs shared ₱{}: sharing saves ₱{}",
                    fee.solo_total,
                    fee.shared_total,
                    fee.savings()
                );
            }
        }
        Command::Convert { amount, from, rate } => {
            let krw_to_php = rate
                .or(config.currency.krw_to_php_rate)
                .context("No exchange rate: pass --rate or set currency.krw_to_php_rate")?;
            match from {
                Currency::Krw => {
                    let php = currency::convert_krw_to_php(amount, krw_to_php)?;
                    println!("₩{} = ₱{:.2}", amount, php);
                }
                Currency::Php => {
                    let krw = currency::convert_php_to_krw(amount, 1.0 / krw_to_php)?;
                    println!("₱{:.2} = ₩{}", amount, krw);
                }
            }
        }
        Command::Replay {
            events,
            box_id,
            customer_id,
            box_type,
            now,
            close,
            json,
        } => {
            let clock: Box<dyn Clock> = match now {
                Some(t) => Box::new(FixedClock(t)),
                None => Box::new(SystemClock),
            };
            let now = clock.now();
            replay(&config, &events, &box_id, &customer_id, box_type, now, close, json)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ShippingConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            ShippingConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path.display()))?
        }
        None => ShippingConfig::default(),
    };
    config.validate()?;
    tracing::debug!("Configuration: {:?}", config);
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn replay(
    config: &ShippingConfig,
    events_path: &Path,
    box_id: &str,
    customer_id: &str,
    box_type: BoxType,
    now: DateTime<Utc>,
    close: bool,
    json: bool,
) -> anyhow::Result<()> {
    let events = read_item_events_from_path(events_path)
        .with_context(|| format!("Failed to read events from '{}'", events_path.display()))?;

    let lifecycle = ConsolidationLifecycle::from_config(config);
    let created_at = events.first().map(|e| e.received_at).unwrap_or(now);
    let mut b = lifecycle.create_box(box_id, customer_id, 1, created_at);
    for event in events {
        lifecycle.receive_item(&mut b, event)?;
    }
    lifecycle.record_penalty_start(&mut b, now);

    let quote = if close {
        Some(lifecycle.close_box(&mut b, box_type, now)?)
    } else {
        None
    };
    let status = b.storage_status(now)?;

    if json {
        let report = serde_json::json!({
            "box": b,
            "storage_status": status,
            "quote": quote,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Box {} ({}): {} items", b.id, b.status, b.items.len());
    println!("Weight: {:.2} kg, volume: {:.4} cbm", b.total_weight_kg, b.total_volume_cbm);
    if let Some(end) = b.free_period_end {
        println!("Free storage until: {}", end.to_rfc3339());
    }
    println!("Storage: {:?}", status);
    if let Some(quote) = quote {
        println!(
            "Quote ({}): fees ₱{} + penalty ₱{} = ₱{}, valid until {}",
            quote.box_type,
            quote.fees.total,
            quote.storage_penalty,
            quote.total_due,
            quote.valid_until.to_rfc3339()
        );
    }
    Ok(())
}
