use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Single historical price sample
///
/// The timestamp is carried through untouched; ordering is by position in the
/// series (oldest first), not by timestamp value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price history for one asset, oldest point first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceHistory {
    pub symbol: String,
    pub prices: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn new(symbol: impl Into<String>, prices: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            prices,
        }
    }

    /// Build a history from bare prices, using the position as timestamp
    pub fn from_prices(symbol: impl Into<String>, prices: &[f64]) -> Self {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(i as i64, price))
            .collect();
        Self::new(symbol, points)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Just the price component, in series order
    pub fn price_values(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.price).collect()
    }
}

/// Ordinary least squares fit of price against position index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl RegressionResult {
    /// Evaluate the fitted line at `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Classified direction of a forecast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Bullish => "bullish",
            TrendDirection::Bearish => "bearish",
            TrendDirection::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Stated applicability window of a forecast (label only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TimeHorizon {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
}

impl TimeHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeHorizon::OneHour => "1h",
            TimeHorizon::OneDay => "24h",
            TimeHorizon::SevenDays => "7d",
        }
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeHorizon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1h" => Ok(TimeHorizon::OneHour),
            "24h" | "1d" => Ok(TimeHorizon::OneDay),
            "7d" | "1w" => Ok(TimeHorizon::SevenDays),
            other => Err(Error::UnknownHorizon(other.to_string())),
        }
    }
}

/// Trend forecast for one symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub symbol: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub confidence: f64,
    pub trend_direction: TrendDirection,
    pub time_horizon: TimeHorizon,
}
