// Price series input/output
// Reads the JSON shapes produced by the historical-data collaborator

use serde::Deserialize;
use std::path::Path;

use crate::error::Error;
use crate::models::{PriceHistory, PricePoint};
use crate::Result;

/// Response body of the upstream `/market_chart/range` endpoint
#[derive(Debug, Deserialize)]
pub struct MarketChartData {
    pub prices: Vec<[f64; 2]>, // [timestamp_ms, price]
}

/// Any of the accepted series documents
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeriesDocument {
    History(PriceHistory),
    Points(Vec<PricePoint>),
    MarketChart(MarketChartData),
}

/// Parse a price series from JSON
///
/// Accepts a `PriceHistory` object, a bare array of `{timestamp, price}`
/// points, or a market-chart body with `prices: [[timestamp_ms, price], ...]`.
/// `symbol` overrides any symbol in the document; documents without one fall
/// back to `"unknown"`.
pub fn parse_history(json: &str, symbol: Option<&str>) -> Result<PriceHistory> {
    let document: SeriesDocument = serde_json::from_str(json)?;

    let (doc_symbol, prices) = match document {
        SeriesDocument::History(history) => (Some(history.symbol), history.prices),
        SeriesDocument::Points(points) => (None, points),
        SeriesDocument::MarketChart(chart) => (None, convert_market_chart(&chart)),
    };

    validate_prices(&prices)?;

    let symbol = symbol
        .map(str::to_string)
        .or(doc_symbol)
        .unwrap_or_else(|| "unknown".to_string());

    Ok(PriceHistory::new(symbol, prices))
}

/// Read and parse a price series file
///
/// Without an explicit `symbol`, the document's symbol is used, then the
/// file stem.
pub fn load_history(path: &Path, symbol: Option<&str>) -> Result<PriceHistory> {
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut history = parse_history(&json, symbol)?;
    if symbol.is_none() && history.symbol == "unknown" {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            history.symbol = stem.to_string();
        }
    }

    tracing::info!(
        "Loaded {} price points for {} from {}",
        history.len(),
        history.symbol,
        path.display()
    );
    Ok(history)
}

/// Write a history as pretty JSON in the `PriceHistory` shape
pub fn save_history(path: &Path, history: &PriceHistory) -> Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Wrote {} price points for {} to {}",
        history.len(),
        history.symbol,
        path.display()
    );
    Ok(())
}

/// Fail when there is no history to predict from
pub fn require_history(history: &PriceHistory) -> Result<()> {
    if history.is_empty() {
        return Err(Error::EmptySeries {
            symbol: history.symbol.clone(),
        });
    }
    Ok(())
}

fn convert_market_chart(chart: &MarketChartData) -> Vec<PricePoint> {
    chart
        .prices
        .iter()
        .map(|[timestamp, price]| PricePoint::new(*timestamp as i64, *price))
        .collect()
}

fn validate_prices(prices: &[PricePoint]) -> Result<()> {
    match prices.iter().position(|p| !p.price.is_finite()) {
        Some(index) => Err(Error::InvalidPrice {
            index,
            price: prices[index].price,
        }),
        None => Ok(()),
    }
}
