//! URL-deduplicated article store backed by a CSV file.
//!
//! The whole file is read on open and rewritten on save, so stores written by
//! other tools with a different column order are normalised on first save.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::AppError;
use crate::news::article::{Article, read_articles};
use crate::news::keywords::{is_economic_article, resolve_published_date};
use crate::sentiment::SentimentAnalyzer;

#[derive(Debug)]
pub struct ArticleStore {
    path: PathBuf,
    articles: Vec<Article>,
    urls: HashSet<String>,
}

/// Counts reported by [`ArticleStore::ingest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub read: usize,
    pub added: usize,
    pub duplicates: usize,
    pub filtered: usize,
    pub labelled: usize,
}

impl ArticleStore {
    /// Open a store; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let articles = if path.exists() {
            let file = File::open(path)
                .map_err(|e| AppError::input(format!("Failed to open article store '{}': {e}", path.display())))?;
            read_articles(file)?
        } else {
            debug!(path = %path.display(), "no existing article store; starting fresh");
            Vec::new()
        };

        let urls = articles.iter().map(|a| a.url.clone()).collect();
        Ok(Self {
            path: path.to_path_buf(),
            articles,
            urls,
        })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Add unseen, economically relevant articles.
    ///
    /// Missing dates are recovered from the URL, missing labels are filled by
    /// `analyzer`, and missing word counts and scrape times are filled in.
    pub fn ingest(
        &mut self,
        incoming: Vec<Article>,
        analyzer: &dyn SentimentAnalyzer,
        now: DateTime<Utc>,
    ) -> IngestSummary {
        let mut summary = IngestSummary {
            read: incoming.len(),
            ..IngestSummary::default()
        };

        for mut article in incoming {
            if article.url.trim().is_empty() || self.contains(&article.url) {
                summary.duplicates += 1;
                continue;
            }
            if !is_economic_article(&article.title, &article.text) {
                summary.filtered += 1;
                continue;
            }

            article.date_published = resolve_published_date(&article.date_published, &article.url);
            if article.word_count.is_none() {
                article.word_count = Some(article.count_words());
            }
            if article.label().is_none() {
                let score = analyzer.analyze(&article.text);
                article.sentiment_label = score.label.as_str().to_string();
                article.sentiment_score = Some(score.confidence);
                summary.labelled += 1;
            }
            if article.scrape_time.trim().is_empty() {
                article.scrape_time = now.to_rfc3339();
            }

            self.urls.insert(article.url.clone());
            self.articles.push(article);
            summary.added += 1;
        }

        info!(
            read = summary.read,
            added = summary.added,
            duplicates = summary.duplicates,
            filtered = summary.filtered,
            labelled = summary.labelled,
            "article ingest finished"
        );
        summary
    }

    /// Rewrite the backing CSV with every stored article.
    pub fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::input(format!("Failed to create '{}': {e}", parent.display())))?;
        }
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| AppError::input(format!("Failed to create article store '{}': {e}", self.path.display())))?;
        for article in &self.articles {
            writer
                .serialize(article)
                .map_err(|e| AppError::input(format!("Failed to write article row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| AppError::input(format!("Failed to flush article store: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconAnalyzer;

    fn article(url: &str, title: &str, text: &str) -> Article {
        Article {
            date_published: String::new(),
            title: title.to_string(),
            url: url.to_string(),
            text: text.to_string(),
            word_count: None,
            source: "test".to_string(),
            sentiment_label: String::new(),
            sentiment_score: None,
            scrape_time: String::new(),
        }
    }

    #[test]
    fn ingest_dedups_filters_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("news.csv");
        let mut store = ArticleStore::open(&path).unwrap();
        assert!(store.is_empty());

        let analyzer = LexiconAnalyzer::english();
        let now = Utc::now();
        let batch = vec![
            article("https://n.example/2025/12/08/a", "Inflation slows", "Strong recovery in growth"),
            article("https://n.example/2025/12/08/a", "Inflation slows", "duplicate"),
            article("https://n.example/2025/12/09/b", "Match report", "A late goal"),
        ];
        let summary = store.ingest(batch, &analyzer, now);
        assert_eq!(
            summary,
            IngestSummary {
                read: 3,
                added: 1,
                duplicates: 1,
                filtered: 1,
                labelled: 1
            }
        );

        let stored = &store.articles()[0];
        assert_eq!(stored.date_published, "2025-12-08");
        assert_eq!(stored.sentiment_label, "positive");
        assert_eq!(stored.word_count, Some(4));
        assert!(!stored.scrape_time.is_empty());

        store.save().unwrap();
        let reopened = ArticleStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.contains("https://n.example/2025/12/08/a"));
        assert_eq!(reopened.articles()[0], *stored);
    }

    #[test]
    fn existing_labels_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArticleStore::open(&dir.path().join("s.csv")).unwrap();
        let mut a = article("https://n.example/x", "Inflation", "recession crisis");
        a.sentiment_label = "positive".to_string();
        let summary = store.ingest(vec![a], &LexiconAnalyzer::english(), Utc::now());
        assert_eq!(summary.labelled, 0);
        assert_eq!(store.articles()[0].sentiment_label, "positive");
    }
}
