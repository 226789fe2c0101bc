//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while forecasting
//! - exported to CSV/JSON
//! - reloaded later for plotting

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sentiment lag weights (lags 0..8, most recent first), exponentially decaying.
pub const DEFAULT_SENTIMENT_WEIGHTS: [f64; 9] = [1.00, 0.70, 0.49, 0.34, 0.24, 0.17, 0.12, 0.08, 0.06];

/// Inflation lag weights (lags 0..3, most recent first).
pub const DEFAULT_INFLATION_WEIGHTS: [f64; 4] = [0.60, 0.25, 0.10, 0.05];

pub const DEFAULT_SCALE_FACTOR: f64 = 0.03;
pub const DEFAULT_INTERCEPT: f64 = 0.5;
pub const DEFAULT_UNCERTAINTY_BASE: f64 = 0.3;
pub const DEFAULT_Z_SCORE: f64 = 1.96;
pub const DEFAULT_FALLBACK_SENTIMENT: f64 = 5.0;
pub const DEFAULT_FALLBACK_INFLATION: f64 = 14.0;
pub const DEFAULT_HORIZON: usize = 6;

/// Whether an observation was measured or produced by the forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationKind {
    Actual,
    Forecast,
}

impl ObservationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObservationKind::Actual => "actual",
            ObservationKind::Forecast => "forecast",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "actual" => Some(ObservationKind::Actual),
            "forecast" => Some(ObservationKind::Forecast),
            _ => None,
        }
    }
}

/// One row of the inflation series (actual or forecast).
///
/// Forecast rows always carry both bounds and `horizon >= 1`; actual rows carry
/// no bounds and `horizon == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationObservation {
    /// First day of the period.
    pub date: NaiveDate,
    /// Inflation in percent.
    pub value: f64,
    pub kind: ObservationKind,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub horizon: u32,
}

impl InflationObservation {
    pub fn actual(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value,
            kind: ObservationKind::Actual,
            lower_bound: None,
            upper_bound: None,
            horizon: 0,
        }
    }

    pub fn is_forecast(&self) -> bool {
        self.kind == ObservationKind::Forecast
    }
}

/// Net sentiment for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentObservation {
    pub date: NaiveDate,
    pub score: f64,
}

/// Sampling period of the series being forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Annual,
}

impl Frequency {
    /// Number of calendar months between consecutive observations.
    pub fn months(self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Annual => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Monthly => "month",
            Frequency::Annual => "year",
        }
    }
}

/// How inflation lags evolve across forecast steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    /// Each step's forecast is fed back as the newest inflation lag.
    Recursive,
    /// Every step reuses the initial lag vectors (no feedback).
    Static,
}

/// Fixed (not fitted) model constants.
///
/// Loaded from JSON with `--params`; missing fields take the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub sentiment_weights: Vec<f64>,
    pub inflation_weights: Vec<f64>,
    /// Converts weighted sentiment units into inflation percentage points.
    pub scale_factor: f64,
    pub intercept: f64,
    /// Band half-width at horizon 1, before the z multiplier.
    pub uncertainty_base: f64,
    pub z_score: f64,
    /// Used to pad sentiment lags when no sentiment is available at all.
    pub fallback_sentiment: f64,
    /// Used to pad inflation lags when the inflation series is empty.
    pub fallback_inflation: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            sentiment_weights: DEFAULT_SENTIMENT_WEIGHTS.to_vec(),
            inflation_weights: DEFAULT_INFLATION_WEIGHTS.to_vec(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            intercept: DEFAULT_INTERCEPT,
            uncertainty_base: DEFAULT_UNCERTAINTY_BASE,
            z_score: DEFAULT_Z_SCORE,
            fallback_sentiment: DEFAULT_FALLBACK_SENTIMENT,
            fallback_inflation: DEFAULT_FALLBACK_INFLATION,
        }
    }
}

impl ModelParams {
    pub fn sentiment_lags(&self) -> usize {
        self.sentiment_weights.len()
    }

    pub fn inflation_lags(&self) -> usize {
        self.inflation_weights.len()
    }

    /// Reject parameter sets the forecaster cannot use.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.sentiment_weights.is_empty() || self.inflation_weights.is_empty() {
            return Err(AppError::input("Lag weight lists must not be empty."));
        }
        let scalars = [
            self.scale_factor,
            self.intercept,
            self.uncertainty_base,
            self.z_score,
            self.fallback_sentiment,
            self.fallback_inflation,
        ];
        let all_finite = self
            .sentiment_weights
            .iter()
            .chain(self.inflation_weights.iter())
            .chain(scalars.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(AppError::input("Model parameters must be finite numbers."));
        }
        if self.uncertainty_base < 0.0 || self.z_score < 0.0 {
            return Err(AppError::input("Uncertainty base and z-score must be non-negative."));
        }
        Ok(())
    }
}

/// A full forecast run's configuration as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub params: ModelParams,
    /// Number of periods to forecast.
    pub horizon: usize,
    pub mode: ForecastMode,
    pub frequency: Frequency,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            params: ModelParams::default(),
            horizon: DEFAULT_HORIZON,
            mode: ForecastMode::Recursive,
            frequency: Frequency::Monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = ModelParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.sentiment_lags(), 9);
        assert_eq!(params.inflation_lags(), 4);
        let sum: f64 = params.sentiment_weights.iter().sum();
        assert!((sum - 3.20).abs() < 1e-12);
    }

    #[test]
    fn partial_params_json_keeps_defaults() {
        let params: ModelParams = serde_json::from_str(r#"{"intercept": 1.25}"#).unwrap();
        assert_eq!(params.intercept, 1.25);
        assert_eq!(params.inflation_weights, DEFAULT_INFLATION_WEIGHTS.to_vec());
        assert_eq!(params.z_score, DEFAULT_Z_SCORE);
    }

    #[test]
    fn empty_weights_are_rejected() {
        let params = ModelParams {
            inflation_weights: Vec::new(),
            ..ModelParams::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn observation_kind_parses_case_insensitively() {
        assert_eq!(ObservationKind::parse(" Forecast "), Some(ObservationKind::Forecast));
        assert_eq!(ObservationKind::parse("actual"), Some(ObservationKind::Actual));
        assert_eq!(ObservationKind::parse("other"), None);
    }
}
