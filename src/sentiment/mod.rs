//! Sentiment scoring and aggregation.
//!
//! - `analyzer`: explicit analyzer values (`SentimentAnalyzer`, `LexiconAnalyzer`)
//! - `aggregate`: labelled articles → daily net → smoothed → per-period series

pub mod aggregate;
pub mod analyzer;

pub use aggregate::*;
pub use analyzer::*;
