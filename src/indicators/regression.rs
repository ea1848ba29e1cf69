use crate::indicators::statistics::finite_or_zero;
use crate::models::{PricePoint, RegressionResult};

/// Fit an ordinary least squares line of price against position index
///
/// The independent variable is the zero-based index of each point, not its
/// timestamp. Conventions:
/// - fewer than 2 points: all fields 0
/// - flat series (zero total variance): `r_squared` is 0, not 1
/// - non-finite intermediate results are reported as 0
/// - `r_squared` is floored at 0
pub fn calculate_linear_regression(series: &[PricePoint]) -> RegressionResult {
    if series.len() < 2 {
        return RegressionResult::default();
    }

    let n = series.len() as f64;

    let (sum_x, sum_y, sum_xy, sum_xx) = series.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), (i, point)| {
            let x = i as f64;
            let y = point.price;
            (sx + x, sy + y, sxy + x * y, sxx + x * x)
        },
    );

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let y_mean = sum_y / n;
    let (ss_res, ss_tot) = series
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(res, tot), (i, point)| {
            let fitted = slope * i as f64 + intercept;
            (
                res + (point.price - fitted).powi(2),
                tot + (point.price - y_mean).powi(2),
            )
        });

    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    RegressionResult {
        slope: finite_or_zero(slope),
        intercept: finite_or_zero(intercept),
        r_squared: finite_or_zero(r_squared).max(0.0),
    }
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
    fn test_perfect_linear_fit() {
        let result = calculate_linear_regression(&series(&[100.0, 110.0, 120.0, 130.0, 140.0]));

        assert!((result.slope - 10.0).abs() < 1e-9);
        assert!((result.intercept - 100.0).abs() < 1e-9);
        assert!((result.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_decreasing_fit() {
        let result = calculate_linear_regression(&series(&[50.0, 47.5, 45.0, 42.5]));

        assert!((result.slope + 2.5).abs() < 1e-9);
        assert!((result.intercept - 50.0).abs() < 1e-9);
        assert!((result.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_prices() {
        let result = calculate_linear_regression(&series(&[100.0, 100.0, 100.0, 100.0]));

        assert!(result.slope.abs() < 1e-9);
        assert!((result.intercept - 100.0).abs() < 1e-9);
        assert_eq!(result.r_squared, 0.0);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(calculate_linear_regression(&[]), RegressionResult::default());
        assert_eq!(
            calculate_linear_regression(&series(&[42.0])),
            RegressionResult::default()
        );
    }

    #[test]
    fn test_noisy_fit_is_bounded() {
        let result = calculate_linear_regression(&series(&[100.0, 101.0, 99.0, 100.5, 99.5]));

        assert!((result.slope + 0.15).abs() < 1e-9);
        assert!((result.intercept - 100.3).abs() < 1e-9);
        assert!(result.r_squared >= 0.0 && result.r_squared < 0.2);
    }

    #[test]
    fn test_non_finite_input_is_normalized() {
        let result = calculate_linear_regression(&series(&[1.0, f64::NAN, 3.0]));

        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 0.0);
        assert_eq!(result.r_squared, 0.0);
    }

    #[test]
    fn test_timestamps_do_not_affect_fit() {
        let prices = [10.0, 12.0, 15.0, 13.0];
        let spaced: Vec<PricePoint> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(1_700_000_000_000 + i as i64 * 86_400_000, p))
            .collect();

        assert_eq!(
            calculate_linear_regression(&spaced),
            calculate_linear_regression(&series(&prices))
        );
    }

    #[test]
    fn test_regression_is_repeatable() {
        let prices: Vec<f64> = (0..30)
            .map(|i| 200.0 + i as f64 * 0.7 + ((i * 5) % 9) as f64)
            .collect();
        let points = series(&prices);

        let first = calculate_linear_regression(&points);
        let second = calculate_linear_regression(&points);

        assert_eq!(first.slope.to_bits(), second.slope.to_bits());
        assert_eq!(first.intercept.to_bits(), second.intercept.to_bits());
        assert_eq!(first.r_squared.to_bits(), second.r_squared.to_bits());
    }
}
