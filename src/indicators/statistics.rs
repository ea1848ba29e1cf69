// Descriptive statistics over price data

use crate::models::PricePoint;

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance, 0.0 when fewer than two values
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let avg = mean(values);
    let squared_diffs: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&squared_diffs)
}

/// Population standard deviation of the prices in a series
///
/// Used as the volatility figure for a price window. Returns 0.0 for series
/// with 0 or 1 points.
pub fn standard_deviation(series: &[PricePoint]) -> f64 {
    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
    variance(&prices).sqrt()
}

/// Round to 2 decimal places (cents)
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Replace NaN/infinite results with 0.0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[100.0, 102.0, 104.0, 106.0, 108.0]), 104.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_standard_deviation() {
        // Classic population example: mean 5, variance 4
        let series: Vec<PricePoint> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(i as i64, p))
            .collect();

        assert!((standard_deviation(&series) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_deviation_degenerate() {
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[PricePoint::new(1, 50_000.0)]), 0.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(101.256), 101.26);
        assert_eq!(round_to_cents(101.254), 101.25);
        assert_eq!(round_to_cents(-3.333), -3.33);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(1.5), 1.5);
    }
}
