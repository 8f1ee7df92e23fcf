//! CLI entry point for the delivery metrics tool.
//!
//! Provides subcommands for sanitizing the raw marketplace export and for
//! computing each dashboard view's metric tables over the cleaned set.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use delivery_metrics::aggregates::{company, couriers, restaurants};
use delivery_metrics::filters::SessionFilters;
use delivery_metrics::record::{CleanRecord, Festival, TimeStat, Traffic, parse_order_date};
use delivery_metrics::{loader, output, sanitize};
use serde_json::json;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "delivery_metrics")]
#[command(about = "Cleans the delivery export and computes dashboard metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Session filters shared by every report subcommand.
#[derive(Args)]
struct FilterArgs {
    /// Exclusive order-date cutoff (DD-MM-YYYY, the export's date format)
    #[arg(long)]
    until: Option<String>,

    /// Allowed traffic densities (repeatable); all allowed when omitted
    #[arg(long = "traffic")]
    traffic: Vec<String>,

    /// Allowed weather conditions (repeatable); all allowed when omitted
    #[arg(long = "weather")]
    weather: Vec<String>,
}

impl FilterArgs {
    fn to_session_filters(&self) -> Result<SessionFilters> {
        let until = self.until.as_deref().map(parse_order_date).transpose()?;
        let traffic = self
            .traffic
            .iter()
            .map(|s| s.parse::<Traffic>())
            .collect::<Result<Vec<_>>>()?;
        Ok(SessionFilters {
            until,
            traffic,
            weather: self.weather.clone(),
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize a raw export and write the clean set as CSV
    Clean {
        /// Path to the raw export
        #[arg(value_name = "INPUT")]
        input: String,

        /// CSV file to write the clean set to
        #[arg(short, long, default_value = "clean.csv")]
        output: String,
    },
    /// Order-volume metrics: daily/weekly counts, traffic mix, hotspots
    Company {
        /// Path to the raw export
        #[arg(value_name = "INPUT")]
        input: String,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Courier metrics: ratings, speed ranking, overview scalars
    Couriers {
        /// Path to the raw export
        #[arg(value_name = "INPUT")]
        input: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Rank the slowest couriers first instead of the fastest
        #[arg(long, default_value_t = false)]
        slowest: bool,
    },
    /// Restaurant metrics: delivery distance and delivery-time statistics
    Restaurants {
        /// Path to the raw export
        #[arg(value_name = "INPUT")]
        input: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Festival flag for the delivery-time lookup (Yes or No)
        #[arg(long, default_value = "Yes")]
        festival: String,

        /// Statistic for the festival lookup: avg_time or std_time
        #[arg(long, default_value = "avg_time")]
        stat: String,

        /// Report the overall scalar distance instead of the per-city table
        #[arg(long, default_value_t = false)]
        overall_distance: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/delivery_metrics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("delivery_metrics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { input, output } => {
            let raw = loader::load_records(&input)?;
            let clean = sanitize::sanitize(&raw)?;
            info!(
                raw = raw.len(),
                clean = clean.len(),
                dropped = raw.len() - clean.len(),
                "Sanitization finished"
            );
            output::write_clean_csv(&output, &clean)?;
            info!(path = %output, "Clean set written");
        }
        Commands::Company { input, filters } => {
            let records = load_filtered(&input, &filters)?;
            let report = json!({
                "daily_orders": company::daily_order_count(&records),
                "traffic_share": company::traffic_share(&records),
                "orders_by_city_and_traffic": company::orders_by_city_and_traffic(&records),
                "weekly_orders": company::weekly_order_count(&records),
                "weekly_orders_per_courier": company::weekly_orders_per_courier(&records),
                "delivery_hotspots": company::median_delivery_location(&records),
            });
            output::print_json(&report)?;
        }
        Commands::Couriers {
            input,
            filters,
            slowest,
        } => {
            let records = load_filtered(&input, &filters)?;
            let age = couriers::age_extremes(&records);
            let vehicle = couriers::vehicle_condition_extremes(&records);
            let report = json!({
                "youngest_courier": age.map(|(min, _)| min),
                "oldest_courier": age.map(|(_, max)| max),
                "worst_vehicle_condition": vehicle.map(|(min, _)| min),
                "best_vehicle_condition": vehicle.map(|(_, max)| max),
                "avg_rating_by_courier": couriers::avg_rating_by_courier(&records),
                "rating_stats_by_courier": couriers::rating_stats_by_courier(&records),
                "rating_stats_by_traffic": couriers::rating_stats_by_traffic(&records),
                "rating_stats_by_weather": couriers::rating_stats_by_weather(&records),
                "ranked_couriers": couriers::rank_couriers_by_time(&records, !slowest),
            });
            output::print_json(&report)?;
        }
        Commands::Restaurants {
            input,
            filters,
            festival,
            stat,
            overall_distance,
        } => {
            let records = load_filtered(&input, &filters)?;
            let festival = festival.parse::<Festival>()?;
            let stat = stat.parse::<TimeStat>()?;

            let distance = if overall_distance {
                json!(restaurants::average_distance(&records))
            } else {
                json!(restaurants::average_distance_by_city(&records))
            };
            let report = json!({
                "unique_couriers": couriers::unique_couriers(&records),
                "distance": distance,
                "festival_time_stat": restaurants::festival_time_stat(&records, festival, stat),
                "time_stats_by_city": restaurants::time_stats_by_city(&records),
                "time_stats_by_city_and_traffic": restaurants::time_stats_by_city_and_traffic(&records),
                "time_stats_by_city_and_order_type": restaurants::time_stats_by_city_and_order_type(&records),
            });
            output::print_json(&report)?;
        }
    }

    Ok(())
}

/// Loads the export, sanitizes it, and applies the session filters.
fn load_filtered(input: &str, args: &FilterArgs) -> Result<Vec<CleanRecord>> {
    let raw = loader::load_records(input)?;
    let clean = sanitize::sanitize(&raw)?;
    let filters = args.to_session_filters()?;
    let filtered = filters.apply(&clean);
    info!(
        raw = raw.len(),
        clean = clean.len(),
        filtered = filtered.len(),
        "Record set ready"
    );
    Ok(filtered)
}
