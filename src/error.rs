use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the edges of the engine (input, configuration, parsing)
///
/// The indicator and prediction functions never fail; they fall back to
/// sentinel values instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid price series JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("historical data required for prediction of {symbol}")]
    EmptySeries { symbol: String },

    #[error("invalid price {price} at index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("unknown time horizon '{0}' (expected 1h, 24h or 7d)")]
    UnknownHorizon(String),

    #[error("unknown market scenario '{0}' (expected up, down, sideways or volatile)")]
    UnknownScenario(String),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}
