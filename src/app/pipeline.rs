//! Shared forecast pipeline used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load inflation -> load + aggregate sentiment -> merge -> lag state -> forecast -> append
//!
//! The commands can then focus on presentation (printing, plotting, exporting).

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::data::{ImfClient, fallback_inflation, fallback_sentiment, load_articles};
use crate::domain::{ForecastConfig, Frequency, InflationObservation};
use crate::error::AppError;
use crate::forecast::{ForecastBreakdown, ForecastSteps, LagState};
use crate::io::load_inflation_csv;
use crate::news::{Article, labelled_items};
use crate::sentiment::{SentimentAnalyzer, SentimentSummary, aggregate};
use crate::series::{MergedPoint, append_forecasts, drop_after, merge_series, normalize_actuals};

/// Resolved source settings for one run.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub inflation: InflationSource,
    pub sentiment_csv: String,
    pub smoothing_window: usize,
    pub timeout: Duration,
    pub offline: bool,
    pub allow_fallback: bool,
    /// Last day considered history; later inflation rows are dropped.
    pub as_of: NaiveDate,
}

#[derive(Debug, Clone)]
pub enum InflationSource {
    Imf {
        indicator: String,
        country: String,
        min_year: i32,
    },
    Csv(std::path::PathBuf),
}

impl InflationSource {
    /// Natural frequency of the source when none is configured.
    pub fn default_frequency(&self) -> Frequency {
        match self {
            InflationSource::Imf { .. } => Frequency::Annual,
            InflationSource::Csv(_) => Frequency::Monthly,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InflationSource::Imf {
                indicator, country, ..
            } => format!("IMF {indicator}/{country}"),
            InflationSource::Csv(path) => path.display().to_string(),
        }
    }
}

/// Inflation history plus a description of where it came from.
#[derive(Debug, Clone)]
pub struct LoadedInflation {
    pub observations: Vec<InflationObservation>,
    pub source: String,
}

/// Sentiment series plus aggregation diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LoadedSentiment {
    pub summary: SentimentSummary,
    pub undated: usize,
    pub used_fallback: bool,
}

/// All computed outputs of a single `infl forecast` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: String,
    pub history: Vec<InflationObservation>,
    pub merged: Vec<MergedPoint>,
    pub sentiment: LoadedSentiment,
    pub breakdown: ForecastBreakdown,
    pub forecasts: Vec<InflationObservation>,
    /// History and forecasts, sorted by date.
    pub combined: Vec<InflationObservation>,
}

pub fn load_inflation(sources: &SourceConfig, frequency: Frequency) -> Result<LoadedInflation, AppError> {
    let loaded = load_raw_inflation(sources, frequency)?;

    let (observations, dropped) = drop_after(&loaded.observations, sources.as_of, frequency);
    if dropped > 0 {
        warn!(dropped, as_of = %sources.as_of, "ignoring inflation rows dated after the as-of period");
    }
    if observations.is_empty() {
        return Err(AppError::data(format!(
            "No inflation observations on or before {} in {}.",
            sources.as_of, loaded.source
        )));
    }

    Ok(LoadedInflation {
        observations: normalize_actuals(&observations, frequency),
        source: loaded.source,
    })
}

fn load_raw_inflation(sources: &SourceConfig, frequency: Frequency) -> Result<LoadedInflation, AppError> {
    if sources.offline {
        info!("offline: using built-in inflation series");
        return Ok(LoadedInflation {
            observations: fallback_inflation(),
            source: "built-in fallback".to_string(),
        });
    }

    let loaded = match &sources.inflation {
        InflationSource::Imf {
            indicator,
            country,
            min_year,
        } => ImfClient::new(sources.timeout)
            .and_then(|client| client.fetch_series(indicator, country, *min_year, sources.as_of)),
        InflationSource::Csv(path) => load_inflation_csv(path, frequency).map(|ingested| {
            info!(
                rows = ingested.rows_read,
                used = ingested.observations.len(),
                skipped = ingested.row_errors.len(),
                forecast_rows = ingested.forecast_rows,
                "loaded inflation CSV"
            );
            ingested.observations
        }),
    };

    match loaded {
        Ok(observations) => Ok(LoadedInflation {
            observations,
            source: sources.inflation.describe(),
        }),
        Err(err) if sources.allow_fallback => {
            warn!(error = %err, "inflation source failed; using built-in fallback series");
            Ok(LoadedInflation {
                observations: fallback_inflation(),
                source: "built-in fallback".to_string(),
            })
        }
        Err(err) => Err(err),
    }
}

/// Fill in missing labels with `analyzer`. Returns how many were labelled.
pub fn label_missing(articles: &mut [Article], analyzer: &dyn SentimentAnalyzer) -> usize {
    let mut labelled = 0;
    for article in articles.iter_mut().filter(|a| a.label().is_none()) {
        let score = analyzer.analyze(&article.text);
        article.sentiment_label = score.label.as_str().to_string();
        article.sentiment_score = Some(score.confidence);
        labelled += 1;
    }
    labelled
}

pub fn load_sentiment(
    sources: &SourceConfig,
    frequency: Frequency,
    analyzer: &dyn SentimentAnalyzer,
    fallback_score: f64,
    anchor: Option<NaiveDate>,
) -> Result<LoadedSentiment, AppError> {
    let fallback = || LoadedSentiment {
        summary: SentimentSummary {
            daily: Vec::new(),
            periods: anchor
                .map(|date| fallback_sentiment(date, fallback_score))
                .unwrap_or_default(),
        },
        undated: 0,
        used_fallback: true,
    };

    if sources.offline {
        info!(score = fallback_score, "offline: using fallback sentiment");
        return Ok(fallback());
    }

    let mut articles = match load_articles(&sources.sentiment_csv, sources.timeout) {
        Ok(articles) => articles,
        Err(err) if sources.allow_fallback => {
            warn!(error = %err, score = fallback_score, "sentiment source failed; using fallback sentiment");
            return Ok(fallback());
        }
        Err(err) => return Err(err),
    };

    let labelled = label_missing(&mut articles, analyzer);
    if labelled > 0 {
        info!(labelled, "labelled articles without a stored sentiment");
    }

    let (items, undated) = labelled_items(&articles);
    if undated > 0 {
        warn!(undated, "skipped articles without a usable publication date");
    }
    let summary = aggregate(&items, frequency, sources.smoothing_window);
    info!(
        days = summary.daily.len(),
        periods = summary.periods.len(),
        "aggregated net sentiment"
    );

    Ok(LoadedSentiment {
        summary,
        undated,
        used_fallback: false,
    })
}

/// Execute the full forecast pipeline.
pub fn run_forecast(
    sources: &SourceConfig,
    config: &ForecastConfig,
    analyzer: &dyn SentimentAnalyzer,
) -> Result<RunOutput, AppError> {
    let inflation = load_inflation(sources, config.frequency)?;
    let anchor = inflation.observations.last().map(|o| o.date);
    let sentiment = load_sentiment(
        sources,
        config.frequency,
        analyzer,
        config.params.fallback_sentiment,
        anchor,
    )?;

    run_forecast_with_series(inflation, sentiment, config)
}

/// Forecast from already-loaded series (no I/O).
pub fn run_forecast_with_series(
    inflation: LoadedInflation,
    mut sentiment: LoadedSentiment,
    config: &ForecastConfig,
) -> Result<RunOutput, AppError> {
    config.params.validate()?;

    if sentiment.summary.periods.is_empty() && !sentiment.used_fallback {
        warn!(
            score = config.params.fallback_sentiment,
            "no dated positive/negative articles; using fallback sentiment"
        );
        sentiment.used_fallback = true;
    }

    let merged = merge_series(
        &inflation.observations,
        &sentiment.summary.periods,
        config.frequency,
        config.params.fallback_sentiment,
    );
    let state = LagState::from_history(&merged, &config.params)
        .ok_or_else(|| AppError::data("Inflation history is empty; nothing to forecast from."))?;

    let steps = ForecastSteps::new(state, config);
    let breakdown = steps.peek_breakdown();
    let forecasts: Vec<InflationObservation> = steps.collect();
    info!(
        horizon = forecasts.len(),
        mode = ?config.mode,
        first = breakdown.value,
        "generated forecasts"
    );

    let history = normalize_actuals(&inflation.observations, config.frequency);
    let combined = append_forecasts(&history, &forecasts);

    Ok(RunOutput {
        source: inflation.source,
        history,
        merged,
        sentiment,
        breakdown,
        forecasts,
        combined,
    })
}

/// Sentiment series only (for `infl sentiment`).
pub fn run_sentiment(
    sources: &SourceConfig,
    frequency: Frequency,
    analyzer: &dyn SentimentAnalyzer,
    fallback_score: f64,
) -> Result<LoadedSentiment, AppError> {
    load_sentiment(sources, frequency, analyzer, fallback_score, None)
}
