// Trend prediction module
// Fuses the regression projection and RSI into a classified forecast

use serde::{Deserialize, Serialize};

use crate::indicators::statistics::{finite_or_zero, round_to_cents};
use crate::indicators::{calculate_linear_regression, calculate_rsi, RsiZone};
use crate::models::{PricePoint, Prediction, RegressionResult, TimeHorizon, TrendDirection};

/// Where the fitted line is evaluated to get the next price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// `x = last.timestamp + 1`
    ///
    /// The line is fit on position indices, so this only lands one step
    /// ahead when timestamps equal indices. Kept as the default for
    /// compatibility with existing dashboards.
    #[default]
    LastTimestamp,
    /// `x = n`, one index past the last fitted point
    NextIndex,
}

impl ProjectionMode {
    /// The x value to evaluate the regression line at
    pub fn projection_x(&self, series: &[PricePoint]) -> f64 {
        match self {
            ProjectionMode::LastTimestamp => series
                .last()
                .map(|p| p.timestamp as f64 + 1.0)
                .unwrap_or(0.0),
            ProjectionMode::NextIndex => series.len() as f64,
        }
    }
}

/// Configuration for trend prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictionConfig {
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub neutral_band_pct: f64,    // |change %| below this is sideways
    pub extreme_rsi_penalty: f64, // Confidence multiplier when RSI is overbought/oversold
    pub neutral_penalty: f64,     // Confidence multiplier for neutral forecasts
    pub projection: ProjectionMode,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            neutral_band_pct: 2.0,
            extreme_rsi_penalty: 0.8,
            neutral_penalty: 0.5,
            projection: ProjectionMode::LastTimestamp,
        }
    }
}

/// Classify a projected percent move
///
/// # Example
/// ```
/// use trendcast::prediction::classify_direction;
/// use trendcast::TrendDirection;
///
/// assert_eq!(classify_direction(8.3, 2.0), TrendDirection::Bullish);
/// assert_eq!(classify_direction(-1.9, 2.0), TrendDirection::Neutral);
/// assert_eq!(classify_direction(-2.0, 2.0), TrendDirection::Bearish);
/// ```
pub fn classify_direction(change_pct: f64, neutral_band_pct: f64) -> TrendDirection {
    if change_pct.abs() < neutral_band_pct {
        TrendDirection::Neutral
    } else if change_pct > 0.0 {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    }
}

/// Confidence in a forecast, in [0, 1] rounded to 2 decimals
///
/// Starts from the fit's R-squared, then discounts extreme momentum and
/// sideways forecasts.
pub fn score_confidence(
    regression: &RegressionResult,
    rsi: f64,
    direction: TrendDirection,
    config: &PredictionConfig,
) -> f64 {
    let mut confidence = regression.r_squared;

    if RsiZone::classify_with(rsi, config.rsi_overbought, config.rsi_oversold).is_extreme() {
        confidence *= config.extreme_rsi_penalty;
    }

    if direction == TrendDirection::Neutral {
        confidence *= config.neutral_penalty;
    }

    round_to_cents(finite_or_zero(confidence).clamp(0.0, 1.0))
}

/// Stateless trend forecaster
///
/// Holds only its configuration; safe to share across threads and call
/// concurrently for different symbols.
#[derive(Debug, Clone, Default)]
pub struct TrendPredictor {
    config: PredictionConfig,
}

/// A prediction with the indicator values it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionParts {
    pub prediction: Prediction,
    pub regression: RegressionResult,
    /// Rounded RSI, `NEUTRAL_RSI` when the series is too short
    pub rsi: f64,
}

impl TrendPredictor {
    pub fn new(config: PredictionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Forecast the next price of `series` and classify the trend
    ///
    /// Series with fewer than 2 points yield a neutral, zero-confidence
    /// prediction at the only known price (or 0 when empty). A zero current
    /// price also yields `Neutral`: the percent change is undefined and is
    /// taken as 0.
    pub fn predict(&self, symbol: &str, series: &[PricePoint], horizon: TimeHorizon) -> Prediction {
        self.predict_with_parts(symbol, series, horizon).prediction
    }

    /// Same as [`predict`](Self::predict), also returning the regression and
    /// RSI the forecast was derived from
    pub fn predict_with_parts(
        &self,
        symbol: &str,
        series: &[PricePoint],
        horizon: TimeHorizon,
    ) -> PredictionParts {
        let regression = calculate_linear_regression(series);
        let rsi = calculate_rsi(series, self.config.rsi_period);

        if series.len() < 2 {
            let price = series.first().map(|p| finite_or_zero(p.price)).unwrap_or(0.0);
            tracing::debug!(
                "{}: {} point(s), not enough history for a trend",
                symbol,
                series.len()
            );
            let prediction = Prediction {
                symbol: symbol.to_string(),
                current_price: price,
                predicted_price: price,
                confidence: 0.0,
                trend_direction: TrendDirection::Neutral,
                time_horizon: horizon,
            };
            return PredictionParts {
                prediction,
                regression,
                rsi,
            };
        }

        let current_price = series[series.len() - 1].price;
        let next_x = self.config.projection.projection_x(series);
        let predicted_price = finite_or_zero(regression.value_at(next_x));

        let change_pct = finite_or_zero((predicted_price - current_price) / current_price * 100.0);
        let trend_direction = classify_direction(change_pct, self.config.neutral_band_pct);
        let confidence = score_confidence(&regression, rsi, trend_direction, &self.config);

        tracing::debug!(
            "{}: slope={:.4} r2={:.4} rsi={:.2} change={:+.2}% -> {} ({:.2})",
            symbol,
            regression.slope,
            regression.r_squared,
            rsi,
            change_pct,
            trend_direction,
            confidence
        );

        let prediction = Prediction {
            symbol: symbol.to_string(),
            current_price,
            predicted_price: round_to_cents(predicted_price),
            confidence,
            trend_direction,
            time_horizon: horizon,
        };

        PredictionParts {
            prediction,
            regression,
            rsi,
        }
    }
}

/// Forecast with the default configuration
pub fn predict_trend(symbol: &str, series: &[PricePoint], horizon: TimeHorizon) -> Prediction {
    TrendPredictor::default().predict(symbol, series, horizon)
}
