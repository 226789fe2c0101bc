//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series rows (`InflationObservation`, `SentimentObservation`)
//! - run configuration enums (`Frequency`, `ForecastMode`)
//! - model constants and run configuration (`ModelParams`, `ForecastConfig`)

pub mod types;

pub use types::*;
