//! Labelled article CSV from a local path or an HTTP(S) URL.

use std::fs::File;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::error::AppError;
use crate::news::{Article, read_articles};

/// Raw CSV of the Arabic news corpus published alongside the dashboard.
pub const DEFAULT_SENTIMENT_CSV: &str =
    "https://raw.githubusercontent.com/Its-Riad/Its-Riad.github.io/main/data/arabic_news.csv";

pub fn is_remote(source: &str) -> bool {
    let lower = source.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub fn load_articles(source: &str, timeout: Duration) -> Result<Vec<Article>, AppError> {
    let articles = if is_remote(source) {
        fetch_remote(source, timeout)?
    } else {
        let file = File::open(source)
            .map_err(|e| AppError::input(format!("Failed to open sentiment CSV '{source}': {e}")))?;
        read_articles(file)?
    };
    info!(source, articles = articles.len(), "loaded labelled articles");
    Ok(articles)
}

fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<Article>, AppError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::data(format!("Failed to build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| AppError::data(format!("Sentiment CSV request failed: {e}")))?;
    if !resp.status().is_success() {
        return Err(AppError::data(format!(
            "Sentiment CSV request failed with status {}.",
            resp.status()
        )));
    }
    let bytes = resp
        .bytes()
        .map_err(|e| AppError::data(format!("Failed to read sentiment CSV body: {e}")))?;
    read_articles(bytes.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_remote_sources() {
        assert!(is_remote(DEFAULT_SENTIMENT_CSV));
        assert!(is_remote(" HTTP://host/file.csv"));
        assert!(!is_remote("data/arabic_news.csv"));
    }

    #[test]
    fn missing_local_file_is_an_input_error() {
        let err = load_articles("/definitely/not/here.csv", Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
