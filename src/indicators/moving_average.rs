use crate::indicators::statistics::{mean, round_to_cents};
use crate::models::PricePoint;

/// Calculate Simple Moving Average (SMA) of the most recent `period` prices
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    Some(mean(&prices[prices.len() - period..]))
}

/// Trailing simple moving average over a whole series
///
/// Emits one point per full window, carrying the timestamp of the window's
/// last point and the window mean rounded to cents. Returns an empty vec when
/// `period` is 0 or longer than the series.
pub fn calculate_moving_average(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }

    series
        .windows(period)
        .map(|window| {
            let prices: Vec<f64> = window.iter().map(|p| p.price).collect();
            let last = window[window.len() - 1];
            PricePoint::new(last.timestamp, round_to_cents(mean(&prices)))
        })
        .collect()
}
