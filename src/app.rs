//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (plus `.env` overrides)
//! - loads inflation and news sentiment
//! - runs the lagged forecaster
//! - prints reports/plots
//! - writes optional exports

use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::cli::{ArticlesArgs, Command, ForecastArgs, PlotArgs, SentimentArgs, SourceArgs};
use crate::domain::{DEFAULT_FALLBACK_SENTIMENT, ForecastConfig, Frequency, ModelParams};
use crate::error::AppError;
use crate::sentiment::LexiconAnalyzer;

pub mod pipeline;

use pipeline::{InflationSource, SourceConfig};

/// Entry point for the `infl` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; real environment variables still apply.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Forecast(args) => handle_forecast(args),
        Command::Sentiment(args) => handle_sentiment(args),
        Command::Articles(args) => handle_articles(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let sources = source_config_from_args(&args.source);
    let config = forecast_config_from_args(&args, &sources)?;
    let analyzer = LexiconAnalyzer::for_lexicon(args.source.lexicon);

    if let Some(path) = &args.dump_params {
        crate::io::write_params_json(path, &config.params)?;
    }

    let run = pipeline::run_forecast(&sources, &config, &analyzer)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.source, &run.history, &run.breakdown, &config)
    );
    if run.sentiment.used_fallback {
        println!(
            "Note: no article sentiment available; used fallback sentiment {:.2}.\n",
            config.params.fallback_sentiment
        );
    }
    println!("{}", crate::report::format_forecast_table(&run.forecasts));

    if args.plot {
        let plot = crate::plot::render_forecast_plot(&run.combined, args.width, args.height);
        println!("{plot}");
    }

    if let Some(path) = &args.export {
        crate::io::write_forecast_csv(path, &run.combined)?;
    }

    Ok(())
}

fn handle_sentiment(args: SentimentArgs) -> Result<(), AppError> {
    let sources = source_config_from_args(&args.source);
    let frequency = resolve_frequency(&args.source, &sources);
    let analyzer = LexiconAnalyzer::for_lexicon(args.source.lexicon);

    let loaded = pipeline::run_sentiment(&sources, frequency, &analyzer, DEFAULT_FALLBACK_SENTIMENT)?;
    if loaded.used_fallback {
        println!("No article data loaded; forecasts would use sentiment {DEFAULT_FALLBACK_SENTIMENT:.1}.");
        return Ok(());
    }

    println!(
        "{}",
        crate::report::format_sentiment_summary(&loaded.summary, loaded.undated)
    );
    Ok(())
}

fn handle_articles(args: ArticlesArgs) -> Result<(), AppError> {
    let analyzer = LexiconAnalyzer::for_lexicon(args.lexicon);
    let incoming = crate::data::load_articles(&args.input, Duration::from_secs(args.timeout_secs))?;

    let mut store = crate::news::ArticleStore::open(&args.store)?;
    let summary = store.ingest(incoming, &analyzer, chrono::Utc::now());
    if summary.added > 0 {
        store.save()?;
    } else {
        info!(store = %args.store.display(), "no new articles; store left unchanged");
    }

    println!(
        "Read {} | added {} | duplicates {} | non-economic {} | newly labelled {} | store size {}",
        summary.read,
        summary.added,
        summary.duplicates,
        summary.filtered,
        summary.labelled,
        store.len()
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let rows = crate::io::read_forecast_csv(&args.input)?;
    if rows.is_empty() {
        return Err(AppError::input(format!(
            "'{}' contains no rows to plot.",
            args.input.display()
        )));
    }

    let plot = crate::plot::render_forecast_plot(&rows, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn source_config_from_args(args: &SourceArgs) -> SourceConfig {
    let inflation = match &args.inflation_csv {
        Some(path) => InflationSource::Csv(path.clone()),
        None => InflationSource::Imf {
            indicator: args.indicator.clone(),
            country: args.country.clone(),
            min_year: args.min_year,
        },
    };

    SourceConfig {
        inflation,
        sentiment_csv: args.sentiment_csv.clone(),
        smoothing_window: args.smoothing_window,
        timeout: Duration::from_secs(args.timeout_secs),
        offline: args.offline,
        allow_fallback: args.allow_fallback,
        as_of: args.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive()),
    }
}

/// The built-in fallback series is annual, so offline runs default to annual too.
fn resolve_frequency(args: &SourceArgs, sources: &SourceConfig) -> Frequency {
    args.frequency.unwrap_or_else(|| {
        if sources.offline {
            Frequency::Annual
        } else {
            sources.inflation.default_frequency()
        }
    })
}

pub fn forecast_config_from_args(args: &ForecastArgs, sources: &SourceConfig) -> Result<ForecastConfig, AppError> {
    let mut params = match &args.params {
        Some(path) => crate::io::read_params_json(path)?,
        None => ModelParams::default(),
    };

    if let Some(v) = args.intercept {
        params.intercept = v;
    }
    if let Some(v) = args.scale_factor {
        params.scale_factor = v;
    }
    if let Some(v) = args.uncertainty_base {
        params.uncertainty_base = v;
    }
    if let Some(v) = args.z_score {
        params.z_score = v;
    }
    params.validate()?;

    Ok(ForecastConfig {
        params,
        horizon: args.horizon,
        mode: args.mode,
        frequency: resolve_frequency(&args.source, sources),
    })
}
