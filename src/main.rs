use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use trendcast::analysis::{analyze_series, TrendReport};
use trendcast::data::{load_history, require_history, save_history};
use trendcast::settings::AppConfig;
use trendcast::synthetic::{MarketScenario, SyntheticSeriesGenerator};
use trendcast::{PriceHistory, TimeHorizon, TrendDirection, TrendPredictor};

#[derive(Parser)]
#[command(name = "trendcast", version, about = "Price trend analysis and short-horizon forecasts")]
struct Cli {
    /// Config file (defaults to ./trendcast.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a price series stored as JSON
    Predict {
        /// Series file: market-chart body, point array or price history
        #[arg(short, long)]
        input: PathBuf,

        /// Symbol to report under (defaults to the file's symbol or name)
        #[arg(short, long)]
        symbol: Option<String>,

        /// Forecast horizon label: 1h, 24h or 7d
        #[arg(long)]
        horizon: Option<TimeHorizon>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a synthetic series and analyze it
    Synthetic {
        #[command(flatten)]
        series: SeriesArgs,

        #[arg(long)]
        horizon: Option<TimeHorizon>,

        #[arg(long)]
        json: bool,
    },
    /// Generate a synthetic series and write it as JSON
    Generate {
        #[command(flatten)]
        series: SeriesArgs,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(clap::Args)]
struct SeriesArgs {
    /// up, down, sideways or volatile
    #[arg(long, default_value = "up")]
    scenario: MarketScenario,

    #[arg(long, default_value_t = 30)]
    points: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 3600)]
    interval_secs: i64,

    #[arg(long, default_value_t = 150.0)]
    base_price: f64,

    #[arg(long, default_value = "synthetic")]
    symbol: String,
}

impl SeriesArgs {
    fn generate(&self) -> PriceHistory {
        SyntheticSeriesGenerator::new(self.seed)
            .with_base_price(self.base_price)
            .generate(&self.symbol, self.scenario, self.points, self.interval_secs)
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    setup_logging(&config.log_filter);

    let predictor = TrendPredictor::new(config.prediction.clone());

    match cli.command {
        Command::Predict {
            input,
            symbol,
            horizon,
            json,
        } => {
            let history = load_history(&input, symbol.as_deref())
                .with_context(|| format!("Failed to load series from {}", input.display()))?;
            require_history(&history)?;

            let horizon = horizon.unwrap_or(config.analysis.default_horizon);
            let report = analyze_series(&history, horizon, &predictor, &config.analysis);
            print_report(&history, &report, json)?;
        }
        Command::Synthetic {
            series,
            horizon,
            json,
        } => {
            let history = series.generate();
            let horizon = horizon.unwrap_or(config.analysis.default_horizon);
            let report = analyze_series(&history, horizon, &predictor, &config.analysis);
            print_report(&history, &report, json)?;
        }
        Command::Generate { series, output } => {
            let history = series.generate();
            save_history(&output, &history)
                .with_context(|| format!("Failed to write series to {}", output.display()))?;
            println!(
                "✓ Wrote {} {:?} points for {} to {}",
                history.len(),
                series.scenario,
                history.symbol,
                output.display()
            );
        }
    }

    Ok(())
}

fn setup_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(history: &PriceHistory, report: &TrendReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let prediction = &report.prediction;
    let arrow = match prediction.trend_direction {
        TrendDirection::Bullish => "↗",
        TrendDirection::Bearish => "↘",
        TrendDirection::Neutral => "→",
    };

    println!("\n═══════════════════════════════════════════════════════");
    println!("  {} | {} forecast", prediction.symbol, prediction.time_horizon);
    println!("═══════════════════════════════════════════════════════");

    if let (Some(first), Some(last)) = (history.prices.first(), history.prices.last()) {
        println!(
            "  Window:          {} → {} ({} points)",
            format_timestamp(first.timestamp),
            format_timestamp(last.timestamp),
            report.points
        );
    }
    println!("  Current Price:   ${:.2}", prediction.current_price);
    println!("  Predicted Price: ${:.2}", prediction.predicted_price);
    println!(
        "  Trend:           {} {} ({:.0}% confidence)",
        arrow,
        prediction.trend_direction,
        prediction.confidence * 100.0
    );
    println!("───────────────────────────────────────────────────────");
    println!(
        "  Regression:      slope {:.4}, intercept {:.2}, R² {:.3}",
        report.regression.slope, report.regression.intercept, report.regression.r_squared
    );
    println!("  RSI:             {:.2} ({:?})", report.rsi, report.rsi_zone);
    println!("  Volatility (σ):  {:.2}", report.volatility);
    println!("  Window Change:   {:+.2}%", report.change_pct);

    match report.moving_average.last() {
        Some(ma) => println!(
            "  SMA({}):          ${:.2}",
            report.moving_average_period, ma.price
        ),
        None => println!("  SMA:             not enough points"),
    }
    println!();

    Ok(())
}

/// Render epoch milliseconds or seconds as UTC; anything smaller is shown raw
fn format_timestamp(timestamp: i64) -> String {
    let datetime: Option<DateTime<Utc>> = if timestamp >= 100_000_000_000 {
        DateTime::from_timestamp_millis(timestamp)
    } else if timestamp >= 1_000_000_000 {
        DateTime::from_timestamp(timestamp, 0)
    } else {
        None
    };

    match datetime {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}
