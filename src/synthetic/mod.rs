use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

use crate::error::Error;
use crate::models::{PriceHistory, PricePoint};

/// 2024-01-01T00:00:00Z in milliseconds; fixed so seeded output is reproducible
pub const SERIES_ORIGIN_MS: i64 = 1_704_067_200_000;

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+1% per step on average)
    Uptrend,
    /// Steady downtrend with noise (-1% per step on average)
    Downtrend,
    /// Sideways/choppy market (±1% around mean)
    Sideways,
    /// High volatility (±5% large swings)
    Volatile,
}

impl FromStr for MarketScenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "uptrend" | "bull" => Ok(MarketScenario::Uptrend),
            "down" | "downtrend" | "bear" => Ok(MarketScenario::Downtrend),
            "sideways" | "flat" => Ok(MarketScenario::Sideways),
            "volatile" => Ok(MarketScenario::Volatile),
            other => Err(Error::UnknownScenario(other.to_string())),
        }
    }
}

/// Generates synthetic price series for demos and tests
pub struct SyntheticSeriesGenerator {
    rng: StdRng,
    base_price: f64,
}

impl SyntheticSeriesGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 150.0,
        }
    }

    pub fn with_base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    /// Generate a series for a specific market scenario
    ///
    /// # Arguments
    /// * `scenario` - The market scenario to simulate
    /// * `num_points` - Number of points to generate
    /// * `interval_secs` - Seconds between points (timestamps are in ms)
    pub fn generate(
        &mut self,
        symbol: &str,
        scenario: MarketScenario,
        num_points: usize,
        interval_secs: i64,
    ) -> PriceHistory {
        let mut points = Vec::with_capacity(num_points);
        let mut current_price = self.base_price;
        let floor = self.base_price * 0.5;

        for i in 0..num_points {
            let timestamp = SERIES_ORIGIN_MS + i as i64 * interval_secs * 1_000;

            let change = match scenario {
                // Drift dominates the ±0.2% noise
                MarketScenario::Uptrend => {
                    current_price * (0.01 + self.rng.gen_range(-0.002..0.002))
                }
                MarketScenario::Downtrend => {
                    current_price * (-0.01 + self.rng.gen_range(-0.002..0.002))
                }
                // Mean reversion force + noise
                MarketScenario::Sideways => {
                    (self.base_price - current_price) * 0.1
                        + current_price * self.rng.gen_range(-0.01..0.01)
                }
                MarketScenario::Volatile => current_price * self.rng.gen_range(-0.05..0.05),
            };

            if i > 0 {
                current_price += change;
            }

            // Prevent price from going too low
            if matches!(scenario, MarketScenario::Volatile) && current_price < floor {
                current_price = floor;
            }

            points.push(PricePoint::new(timestamp, current_price));
        }

        tracing::debug!(
            "Generated {} {:?} points for {}",
            points.len(),
            scenario,
            symbol
        );

        PriceHistory::new(symbol, points)
    }
}
