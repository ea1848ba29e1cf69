// Core modules
pub mod analysis;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod prediction;
pub mod settings;
pub mod synthetic;

// Re-export commonly used types
pub use analysis::{analyze_series, TrendReport};
pub use error::Error;
pub use indicators::{calculate_linear_regression, calculate_moving_average, calculate_rsi};
pub use models::*;
pub use prediction::{
    predict_trend, PredictionConfig, PredictionParts, ProjectionMode, TrendPredictor,
};

// Error handling
pub type Result<T> = std::result::Result<T, Error>;
