//! Scraped article records and their CSV representation.

use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::sentiment::{LabelledItem, SentimentLabel};
use crate::series::parse_date_prefix;

pub const UNKNOWN_DATE: &str = "Unknown";

/// One news article row.
///
/// Only `url` is required when reading; older exports name the body column
/// `content` instead of `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub date_published: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, alias = "content")]
    pub text: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub word_count: Option<usize>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub sentiment_label: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sentiment_score: Option<f64>,
    #[serde(default, alias = "scraped_at")]
    pub scrape_time: String,
}

impl Article {
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.date_published)
    }

    pub fn label(&self) -> Option<SentimentLabel> {
        SentimentLabel::parse(&self.sentiment_label)
    }

    pub fn count_words(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Read article rows from any CSV source. Malformed rows are skipped and logged.
pub fn read_articles<R: Read>(reader: R) -> Result<Vec<Article>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::data(format!("Failed to read article CSV headers: {e}")))?;
    if !headers.iter().any(|h| h == "url") {
        return Err(AppError::data("Article CSV is missing the required 'url' column."));
    }

    let mut out = Vec::new();
    for (idx, row) in csv_reader.deserialize::<Article>().enumerate() {
        match row {
            Ok(article) => out.push(article),
            // +2: header line plus 1-based numbering.
            Err(e) => debug!(line = idx + 2, error = %e, "skipping malformed article row"),
        }
    }
    Ok(out)
}

/// Dated labels usable for aggregation, plus the count of rows without a usable date.
pub fn labelled_items(articles: &[Article]) -> (Vec<LabelledItem>, usize) {
    let mut items = Vec::with_capacity(articles.len());
    let mut undated = 0usize;
    for article in articles {
        let Some(date) = article.published_on() else {
            undated += 1;
            continue;
        };
        let label = article.label().unwrap_or(SentimentLabel::Error);
        items.push(LabelledItem { date, label });
    }
    (items, undated)
}
