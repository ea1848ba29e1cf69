// Runtime configuration
// Layered: built-in defaults -> optional TOML file -> TRENDCAST__* environment

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::TimeHorizon;
use crate::prediction::PredictionConfig;
use crate::Result;

const DEFAULT_CONFIG_NAME: &str = "trendcast";
const ENV_PREFIX: &str = "TRENDCAST";
const ENV_SEPARATOR: &str = "__";

/// Settings for the market report built around a prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub moving_average_period: usize, // Chart overlay window
    pub min_chart_points: usize,      // Below this, no overlay is drawn
    pub default_horizon: TimeHorizon,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            moving_average_period: 5,
            min_chart_points: 5,
            default_horizon: TimeHorizon::OneDay,
        }
    }
}

/// Top-level application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_filter: String,
    pub prediction: PredictionConfig,
    pub analysis: AnalysisConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "trendcast=info".to_string(),
            prediction: PredictionConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from `path` (required) or `./trendcast.{toml,json,...}`
    /// (optional), then apply `TRENDCAST__SECTION__KEY` overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Self::from_sources(file)
    }

    fn from_sources<S>(file: S) -> Result<Self>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}
