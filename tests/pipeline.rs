//! End-to-end run over local files: CSV inflation + labelled articles -> export -> reload.

use std::fs;
use std::time::Duration;

use chrono::NaiveDate;
use inflation_forecast::app::pipeline::{InflationSource, SourceConfig, run_forecast};
use inflation_forecast::domain::{ForecastConfig, ForecastMode, Frequency, ObservationKind};
use inflation_forecast::io::{read_forecast_csv, write_forecast_csv};
use inflation_forecast::plot::render_forecast_plot;
use inflation_forecast::sentiment::LexiconAnalyzer;

const INFLATION_CSV: &str = "\
date,inflation
2025-01-01,24.0
2025-02-01,12.8
2025-03-01,13.6
2025-04-01,13.9
2025-05-01,16.8
2025-06-01,14.9
";

const ARTICLES_CSV: &str = "\
date_published,title,url,text,sentiment_label
2025-04-03,Growth,https://n.example/2025/04/03/a,growth,positive
2025-05-10,Prices,https://n.example/2025/05/10/b,inflation surge,negative
2025-06-12,Recovery,https://n.example/2025/06/12/c,recovery and growth,
,No date,https://n.example/about,stable,neutral
";

fn sources(dir: &std::path::Path) -> SourceConfig {
    let inflation = dir.join("cpi.csv");
    let articles = dir.join("articles.csv");
    fs::write(&inflation, INFLATION_CSV).unwrap();
    fs::write(&articles, ARTICLES_CSV).unwrap();

    SourceConfig {
        inflation: InflationSource::Csv(inflation),
        sentiment_csv: articles.display().to_string(),
        smoothing_window: 7,
        timeout: Duration::from_secs(1),
        offline: false,
        allow_fallback: false,
        as_of: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    }
}

#[test]
fn monthly_run_exports_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let sources = sources(dir.path());
    let config = ForecastConfig {
        frequency: Frequency::Monthly,
        ..ForecastConfig::default()
    };

    let run = run_forecast(&sources, &config, &LexiconAnalyzer::english()).unwrap();

    assert_eq!(run.history.len(), 6);
    assert_eq!(run.forecasts.len(), 6);
    assert!(!run.sentiment.used_fallback);
    assert_eq!(run.sentiment.undated, 1);
    assert_eq!(run.forecasts[0].date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    assert_eq!(run.forecasts[5].date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    assert!((run.forecasts[0].value - run.breakdown.value).abs() < 1e-12);

    let widths: Vec<f64> = run
        .forecasts
        .iter()
        .map(|f| f.upper_bound.unwrap() - f.lower_bound.unwrap())
        .collect();
    assert!(widths.windows(2).all(|w| w[1] > w[0]));

    let out = dir.path().join("out").join("forecast.csv");
    write_forecast_csv(&out, &run.combined).unwrap();
    let reloaded = read_forecast_csv(&out).unwrap();

    assert_eq!(reloaded.len(), 12);
    assert_eq!(reloaded.iter().filter(|r| r.kind == ObservationKind::Actual).count(), 6);
    let horizons: Vec<u32> = reloaded.iter().filter(|r| r.is_forecast()).map(|r| r.horizon).collect();
    assert_eq!(horizons, vec![1, 2, 3, 4, 5, 6]);
    for (a, b) in reloaded.iter().filter(|r| r.is_forecast()).zip(run.forecasts.iter()) {
        assert!((a.value - b.value).abs() < 1e-9);
        assert!(a.lower_bound.unwrap() <= a.value && a.value <= a.upper_bound.unwrap());
    }

    let plot = render_forecast_plot(&reloaded, 40, 10);
    assert!(plot.starts_with("Plot: date=[2025-01-01, 2025-12-01]"));
}

#[test]
fn history_stops_at_the_as_of_month() {
    let dir = tempfile::tempdir().unwrap();
    let mut sources = sources(dir.path());
    sources.as_of = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let config = ForecastConfig {
        frequency: Frequency::Monthly,
        ..ForecastConfig::default()
    };

    let run = run_forecast(&sources, &config, &LexiconAnalyzer::english()).unwrap();
    assert_eq!(run.history.len(), 4);
    assert_eq!(run.forecasts[0].date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    assert!(!run.sentiment.used_fallback);
}

#[test]
fn static_mode_holds_the_point_forecast() {
    let dir = tempfile::tempdir().unwrap();
    let sources = sources(dir.path());
    let config = ForecastConfig {
        frequency: Frequency::Monthly,
        mode: ForecastMode::Static,
        horizon: 4,
        ..ForecastConfig::default()
    };

    let run = run_forecast(&sources, &config, &LexiconAnalyzer::english()).unwrap();
    assert_eq!(run.forecasts.len(), 4);
    let first = run.forecasts[0].value;
    assert!(run.forecasts.iter().all(|f| (f.value - first).abs() < 1e-12));
}

#[test]
fn missing_article_file_fails_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let mut sources = sources(dir.path());
    sources.sentiment_csv = dir.path().join("nope.csv").display().to_string();

    let err = run_forecast(&sources, &ForecastConfig::default(), &LexiconAnalyzer::english()).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    sources.allow_fallback = true;
    let run = run_forecast(&sources, &ForecastConfig::default(), &LexiconAnalyzer::english()).unwrap();
    assert!(run.sentiment.used_fallback);
}
