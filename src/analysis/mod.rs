// Market report module
// Bundles the forecast with the moving-average overlay, momentum zone,
// volatility and the window's overall price change

use serde::Serialize;

use crate::indicators::statistics::{finite_or_zero, round_to_cents};
use crate::indicators::{calculate_moving_average, standard_deviation, RsiZone};
use crate::models::{PriceHistory, PricePoint, Prediction, RegressionResult, TimeHorizon};
use crate::prediction::{PredictionParts, TrendPredictor};
use crate::settings::AnalysisConfig;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendReport {
    pub prediction: Prediction,
    pub regression: RegressionResult,
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    pub volatility: f64,
    pub change_pct: f64,
    pub points: usize,
    pub moving_average_period: usize,
    pub moving_average: Vec<PricePoint>,
}

/// Percent change from the first to the last price of the window
///
/// 0.0 with fewer than 2 points or a zero starting price.
pub fn window_change_pct(series: &[PricePoint]) -> f64 {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 && first.price != 0.0 => {
            round_to_cents(finite_or_zero((last.price - first.price) / first.price * 100.0))
        }
        _ => 0.0,
    }
}

/// Overlay window for a series of `len` points, or `None` when the series is
/// too short to draw one
pub fn overlay_period(len: usize, config: &AnalysisConfig) -> Option<usize> {
    if len < config.min_chart_points || config.moving_average_period == 0 {
        return None;
    }
    Some(config.moving_average_period.min(len))
}

/// Run every indicator over `history` and assemble the report
pub fn analyze_series(
    history: &PriceHistory,
    horizon: TimeHorizon,
    predictor: &TrendPredictor,
    config: &AnalysisConfig,
) -> TrendReport {
    let series = history.prices.as_slice();

    let PredictionParts {
        prediction,
        regression,
        rsi,
    } = predictor.predict_with_parts(&history.symbol, series, horizon);

    let prediction_config = predictor.config();
    let rsi_zone = RsiZone::classify_with(
        rsi,
        prediction_config.rsi_overbought,
        prediction_config.rsi_oversold,
    );

    let volatility = round_to_cents(standard_deviation(series));
    let change_pct = window_change_pct(series);

    let (moving_average_period, moving_average) = match overlay_period(series.len(), config) {
        Some(period) => (period, calculate_moving_average(series, period)),
        None => (0, Vec::new()),
    };

    tracing::debug!(
        "{}: {} points, rsi={:.2} ({:?}), volatility={:.2}, overlay={} points",
        history.symbol,
        series.len(),
        rsi,
        rsi_zone,
        volatility,
        moving_average.len()
    );

    TrendReport {
        prediction,
        regression,
        rsi,
        rsi_zone,
        volatility,
        change_pct,
        points: series.len(),
        moving_average_period,
        moving_average,
    }
}
