// Technical indicators module
// Statistics primitives, SMA, OLS regression and Wilder RSI

pub mod moving_average;
pub mod regression;
pub mod rsi;
pub mod statistics;

pub use moving_average::{calculate_moving_average, calculate_sma};
pub use regression::calculate_linear_regression;
pub use rsi::{calculate_rsi, calculate_rsi_series, RsiZone, DEFAULT_RSI_PERIOD, NEUTRAL_RSI};
pub use statistics::{mean, standard_deviation, variance};
