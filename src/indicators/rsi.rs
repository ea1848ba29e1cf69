use serde::{Deserialize, Serialize};

use crate::indicators::statistics::round_to_cents;
use crate::models::PricePoint;

/// Standard Wilder look-back
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Value reported when there is not enough history to form an opinion
pub const NEUTRAL_RSI: f64 = 50.0;

pub const OVERBOUGHT_THRESHOLD: f64 = 70.0;
pub const OVERSOLD_THRESHOLD: f64 = 30.0;

/// Momentum zone of an RSI reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    /// Classify against the conventional 70/30 bands
    pub fn classify(rsi: f64) -> Self {
        Self::classify_with(rsi, OVERBOUGHT_THRESHOLD, OVERSOLD_THRESHOLD)
    }

    pub fn classify_with(rsi: f64, overbought: f64, oversold: f64) -> Self {
        if rsi > overbought {
            RsiZone::Overbought
        } else if rsi < oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn is_extreme(&self) -> bool {
        !matches!(self, RsiZone::Neutral)
    }
}

/// Calculate Relative Strength Index (RSI) with Wilder smoothing
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
/// - 50: not enough data (`len <= period`) or a non-finite price in the series
/// - 100: no losses over the whole series
///
/// The result is rounded to 2 decimal places.
pub fn calculate_rsi(series: &[PricePoint], period: usize) -> f64 {
    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();

    match calculate_rsi_series(&prices, period).last() {
        Some(&rsi) if rsi.is_finite() => round_to_cents(rsi),
        _ => NEUTRAL_RSI,
    }
}

/// RSI after the seed window and after every smoothing step
///
/// The first value covers changes `0..period`; each later value folds in one
/// more change. Empty when `prices.len() <= period` or `period == 0`.
/// Values are not rounded; a NaN or infinite price poisons the averages and
/// every value from that point on is NaN.
pub fn calculate_rsi_series(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() <= period {
        return Vec::new();
    }

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;

    // Seed with the simple average of the first window
    let (gains, losses) = changes[..period]
        .iter()
        .fold((0.0, 0.0), |(g, l), &change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l + change.abs())
            }
        });

    let mut avg_gain = gains / period_f;
    let mut avg_loss = losses / period_f;

    let mut values = Vec::with_capacity(changes.len() - period + 1);
    values.push(rsi_from_averages(avg_gain, avg_loss));

    for &change in &changes[period..] {
        avg_gain = (avg_gain * (period_f - 1.0) + change.max(0.0)) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + (-change).max(0.0)) / period_f;
        values.push(rsi_from_averages(avg_gain, avg_loss));
    }

    values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(i as i64 + 1, p))
            .collect()
    }

    #[test]
    fn test_rsi_calculation() {
        // Test with known values
        let prices = series(&[
            44.0, 44.25, 44.5, 43.75, 44.0, 44.5, 45.0, 45.5, 45.25, 45.5, 46.0, 46.5, 46.25,
            46.0, 46.5,
        ]);

        let rsi = calculate_rsi(&prices, 14);
        assert!(rsi > 0.0 && rsi < 100.0);
        // Seed window only: gains 4.0, losses 1.5
        assert_eq!(rsi, 72.73);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let prices = series(&[100.0, 102.0, 101.0]);
        assert_eq!(calculate_rsi(&prices, 14), NEUTRAL_RSI);
        assert_eq!(calculate_rsi(&[], 14), NEUTRAL_RSI);
        assert_eq!(calculate_rsi(&prices, 0), NEUTRAL_RSI);
    }

    #[test]
    fn test_rsi_period_larger_than_any_series() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();

        assert!(calculate_rsi_series(&prices, usize::MAX).is_empty());
        assert!(calculate_rsi_series(&[], usize::MAX).is_empty());
        assert_eq!(calculate_rsi(&series(&prices), usize::MAX), NEUTRAL_RSI);
    }

    #[test]
    fn test_rsi_non_finite_price_is_neutral() {
        let mut prices: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64).collect();
        prices[5] = f64::NAN;
        assert_eq!(calculate_rsi(&series(&prices), DEFAULT_RSI_PERIOD), NEUTRAL_RSI);

        prices[5] = f64::INFINITY;
        assert_eq!(calculate_rsi(&series(&prices), DEFAULT_RSI_PERIOD), NEUTRAL_RSI);
    }

    #[test]
    fn test_rsi_is_repeatable() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 11) as f64 * 0.37).collect();
        let points = series(&prices);

        let first = calculate_rsi(&points, DEFAULT_RSI_PERIOD);
        let second = calculate_rsi(&points, DEFAULT_RSI_PERIOD);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_rsi_all_gains() {
        let prices = series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        assert_eq!(calculate_rsi(&prices, 5), 100.0); // All gains = RSI 100
    }

    #[test]
    fn test_rsi_monotonic_uptrend_is_overbought() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + 5.0 * i as f64).collect();
        let rsi = calculate_rsi(&series(&prices), DEFAULT_RSI_PERIOD);

        assert!(rsi > 70.0);
        assert!(rsi <= 100.0);
    }

    #[test]
    fn test_rsi_all_losses() {
        let prices: Vec<f64> = (0..20).map(|i| 200.0 - 2.0 * i as f64).collect();
        assert_eq!(calculate_rsi(&series(&prices), DEFAULT_RSI_PERIOD), 0.0);
    }

    #[test]
    fn test_wilder_smoothing_decays_gain() {
        // Seed: one gain of 4 over period 2 -> avg_gain 2, avg_loss 0
        // Next change -2: avg_gain 1, avg_loss 1 -> RSI 50
        let prices = series(&[10.0, 14.0, 14.0, 12.0]);
        assert_eq!(calculate_rsi(&prices, 2), 50.0);
    }

    #[test]
    fn test_rsi_series_length() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i % 4) as f64).collect();
        let values = calculate_rsi_series(&prices, 14);

        assert_eq!(values.len(), 30 - 14);
        assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(
            round_to_cents(*values.last().unwrap()),
            calculate_rsi(&series(&prices), 14)
        );
    }

    #[test]
    fn test_zone_classification() {
        assert_eq!(RsiZone::classify(75.0), RsiZone::Overbought);
        assert_eq!(RsiZone::classify(25.0), RsiZone::Oversold);
        assert_eq!(RsiZone::classify(70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(30.0), RsiZone::Neutral);
        assert!(RsiZone::Oversold.is_extreme());
        assert!(!RsiZone::Neutral.is_extreme());
    }
}
