use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use drophub::application::commission::{MonthWindow, aggregate_profit};
use drophub::application::reaper::{StaleOrderReaper, SweepReport};
use drophub::config::{CommissionRates, ReaperConfig};
use drophub::domain::filter::OrderFilter;
use drophub::domain::food_order::FoodOrder;
use drophub::domain::ports::{FoodOrderStore, FoodOrderStoreBox};
use drophub::infrastructure::in_memory::InMemoryStore;
use drophub::interfaces::json::seed_reader::SeedReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one stale-order sweep over a food-order seed file
    Sweep {
        /// Input food-order collection snapshot (JSON array)
        input: PathBuf,

        /// Pending orders older than this many minutes are cancelled
        #[arg(long, default_value_t = 20)]
        stale_minutes: i64,

        /// Sweep as of this instant (RFC 3339) instead of the wall clock
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Compute the monthly commission report from a food-order seed file
    ProfitReport {
        /// Input food-order collection snapshot (JSON array)
        input: PathBuf,

        #[arg(long)]
        year: i32,

        /// Calendar month, 1-12
        #[arg(long)]
        month: u32,

        /// Override the delivery-charge commission rate
        #[arg(long)]
        delivery_rate: Option<Decimal>,

        /// Override the food-subtotal commission rate
        #[arg(long)]
        food_rate: Option<Decimal>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepOutput {
    report: SweepReport,
    orders: Vec<FoodOrder>,
}

async fn seed_store(input: PathBuf) -> Result<InMemoryStore> {
    let file = File::open(input).into_diagnostic()?;
    let orders = SeedReader::new(file).food_orders().into_diagnostic()?;
    let store = InMemoryStore::new();
    for order in orders {
        FoodOrderStore::create(&store, order).await.into_diagnostic()?;
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sweep {
            input,
            stale_minutes,
            now,
        } => {
            let store = seed_store(input).await?;
            let config = ReaperConfig {
                stale_after: chrono::Duration::minutes(stale_minutes),
                ..ReaperConfig::default()
            };
            let orders: FoodOrderStoreBox = Box::new(store.clone());
            let reaper = StaleOrderReaper::new(orders, config);
            let report = reaper
                .sweep(now.unwrap_or_else(Utc::now))
                .await
                .into_diagnostic()?;

            let mut orders = store.list(&OrderFilter::new()).await.into_diagnostic()?;
            orders.sort_by_key(|o| o.created_at);
            let output = SweepOutput { report, orders };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).into_diagnostic()?
            );
        }
        Command::ProfitReport {
            input,
            year,
            month,
            delivery_rate,
            food_rate,
        } => {
            let store = seed_store(input).await?;
            let window = MonthWindow::new(year, month).into_diagnostic()?;
            let mut rates = CommissionRates::default();
            if let Some(rate) = delivery_rate {
                rates.delivery_rate = rate;
            }
            if let Some(rate) = food_rate {
                rates.food_rate = rate;
            }

            let orders = store.list(&OrderFilter::new()).await.into_diagnostic()?;
            let report = aggregate_profit(&orders, &window, &rates);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).into_diagnostic()?
            );
        }
    }

    Ok(())
}
