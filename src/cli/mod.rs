//! Command-line parsing for the inflation forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the forecasting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::data::{DEFAULT_COUNTRY, DEFAULT_INDICATOR, DEFAULT_MIN_YEAR, DEFAULT_SENTIMENT_CSV};
use crate::domain::{DEFAULT_HORIZON, ForecastMode, Frequency};
use crate::sentiment::{DEFAULT_SMOOTHING_WINDOW, Lexicon};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "infl", version, about = "Sentiment-augmented lagged inflation forecaster")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load inflation + sentiment, forecast, print the breakdown and optionally plot/export.
    Forecast(ForecastArgs),
    /// Print the aggregated per-period sentiment series.
    Sentiment(SentimentArgs),
    /// Merge newly scraped articles into a deduplicated article store.
    Articles(ArticlesArgs),
    /// Plot a previously exported forecast CSV.
    Plot(PlotArgs),
}

/// Where the inflation and sentiment series come from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Local inflation CSV (`date,inflation`). When omitted, the IMF API is used.
    #[arg(long, value_name = "CSV")]
    pub inflation_csv: Option<PathBuf>,

    /// IMF DataMapper indicator code.
    #[arg(long, env = "IMF_INDICATOR", default_value = DEFAULT_INDICATOR)]
    pub indicator: String,

    /// IMF country code.
    #[arg(long, env = "IMF_COUNTRY", default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Drop IMF observations before this year.
    #[arg(long, default_value_t = DEFAULT_MIN_YEAR)]
    pub min_year: i32,

    /// Labelled article CSV (path or http(s) URL).
    #[arg(long, env = "SENTIMENT_CSV", default_value = DEFAULT_SENTIMENT_CSV)]
    pub sentiment_csv: String,

    /// Series frequency. Defaults to annual for IMF data and monthly for local CSVs.
    #[arg(long, value_enum)]
    pub frequency: Option<Frequency>,

    /// Trailing window (in days with articles) for smoothing daily net sentiment.
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
    pub smoothing_window: usize,

    /// Lexicon used to label articles that arrive without a sentiment label.
    #[arg(long, value_enum, default_value_t = Lexicon::Arabic)]
    pub lexicon: Lexicon,

    /// HTTP timeout in seconds for remote sources.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Use the built-in fallback series instead of fetching anything.
    #[arg(long)]
    pub offline: bool,

    /// Fall back to the built-in series (with a warning) when a source fails.
    #[arg(long)]
    pub allow_fallback: bool,

    /// Treat inflation rows after this date's period as not yet known (default: today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,
}

/// Options for `infl forecast`.
#[derive(Debug, Args, Clone)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of periods to forecast.
    #[arg(short = 'H', long, default_value_t = DEFAULT_HORIZON)]
    pub horizon: usize,

    /// Recursive feeds each forecast back as a lag; static reuses the initial lags.
    #[arg(long, value_enum, default_value_t = ForecastMode::Recursive)]
    pub mode: ForecastMode,

    /// Model params JSON (weights, scale, intercept, band constants, fallbacks).
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// Override the intercept.
    #[arg(long)]
    pub intercept: Option<f64>,

    /// Override the sentiment scale factor.
    #[arg(long)]
    pub scale_factor: Option<f64>,

    /// Override the band half-width at horizon 1 (before the z multiplier).
    #[arg(long)]
    pub uncertainty_base: Option<f64>,

    /// Override the band z-score.
    #[arg(long)]
    pub z_score: Option<f64>,

    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the combined actual + forecast table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write the effective model parameters (after overrides) as JSON.
    #[arg(long, value_name = "JSON")]
    pub dump_params: Option<PathBuf>,
}

/// Options for `infl sentiment`.
#[derive(Debug, Args, Clone)]
pub struct SentimentArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Options for `infl articles`.
#[derive(Debug, Args, Clone)]
pub struct ArticlesArgs {
    /// CSV of newly scraped articles.
    #[arg(long, value_name = "CSV")]
    pub input: String,

    /// Article store to merge into (created if missing).
    #[arg(long, value_name = "CSV")]
    pub store: PathBuf,

    /// Lexicon used to label unlabelled articles.
    #[arg(long, value_enum, default_value_t = Lexicon::English)]
    pub lexicon: Lexicon,

    /// HTTP timeout in seconds when `--input` is a URL.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Options for plotting a saved forecast table.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Forecast CSV produced by `infl forecast --export`.
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
