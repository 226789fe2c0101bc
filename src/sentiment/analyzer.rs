//! Text sentiment scoring.
//!
//! Analyzers are ordinary values: construct one per run, pass it by reference to
//! whatever needs scoring, and drop it at the end. There is no global model.

use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Polarity label attached to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    /// Scoring failed upstream; treated like neutral when aggregating.
    Error,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Error => "error",
        }
    }

    /// Parse a stored label. Empty or unrecognised labels yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            "error" => Some(SentimentLabel::Error),
            _ => None,
        }
    }

    /// +1 / -1 / 0 contribution to net sentiment.
    pub fn polarity(self) -> i64 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => -1,
            SentimentLabel::Neutral | SentimentLabel::Error => 0,
        }
    }
}

/// Label plus confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

pub trait SentimentAnalyzer {
    fn analyze(&self, text: &str) -> SentimentScore;
}

/// Which built-in lexicon to score with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lexicon {
    English,
    Arabic,
}

const ENGLISH_POSITIVE: &[&str] = &[
    "growth", "grow", "grew", "gain", "gains", "improve", "improved", "improvement", "recovery", "rebound",
    "surplus", "stable", "stability", "strong", "stronger", "strengthen", "boost", "boosted", "expansion",
    "easing", "eased", "profit", "profits", "optimism", "optimistic", "upgrade", "upgraded", "inflows",
];

const ENGLISH_NEGATIVE: &[&str] = &[
    "decline", "declined", "drop", "dropped", "fell", "fall", "slowdown", "recession", "crisis", "deficit",
    "shortage", "shortages", "devaluation", "depreciation", "weak", "weaker", "loss", "losses", "default",
    "downgrade", "downgraded", "pressure", "pressures", "unemployment", "contraction", "volatility", "outflows",
];

const ARABIC_POSITIVE: &[&str] = &[
    "نمو", "تحسن", "انتعاش", "استقرار", "فائض", "مكاسب", "ارباح", "أرباح", "تعافي", "ازدهار", "استثمارات",
];

const ARABIC_NEGATIVE: &[&str] = &[
    "أزمة", "ازمة", "تراجع", "انخفاض", "عجز", "ركود", "غلاء", "بطالة", "ديون", "خسائر", "نقص", "تضخم",
];

/// Word-count analyzer over fixed positive/negative vocabularies.
///
/// Confidence is `|pos - neg| / (pos + neg)`; ties and texts without lexicon hits
/// are neutral.
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    positive: HashSet<String>,
    negative: HashSet<String>,
    max_chars: usize,
}

impl LexiconAnalyzer {
    pub fn new<I, J>(positive: I, negative: J, max_chars: usize) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            positive: positive.into_iter().map(|w| w.into().to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.into().to_lowercase()).collect(),
            max_chars,
        }
    }

    pub fn english() -> Self {
        Self::new(ENGLISH_POSITIVE.iter().copied(), ENGLISH_NEGATIVE.iter().copied(), 2048)
    }

    /// Arabic text is denser per character, so the truncation limit is lower.
    pub fn arabic() -> Self {
        Self::new(ARABIC_POSITIVE.iter().copied(), ARABIC_NEGATIVE.iter().copied(), 1500)
    }

    pub fn for_lexicon(lexicon: Lexicon) -> Self {
        match lexicon {
            Lexicon::English => Self::english(),
            Lexicon::Arabic => Self::arabic(),
        }
    }

    fn classify(&self, token: &str) -> i64 {
        // Arabic nouns usually carry the definite article.
        let bare = token.strip_prefix("ال").filter(|rest| rest.chars().count() >= 2);
        let hit = |set: &HashSet<String>| set.contains(token) || bare.is_some_and(|b| set.contains(b));
        if hit(&self.positive) {
            1
        } else if hit(&self.negative) {
            -1
        } else {
            0
        }
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return SentimentScore::neutral();
        }

        let truncated: String = text.chars().take(self.max_chars).collect::<String>().to_lowercase();

        let (mut pos, mut neg) = (0u32, 0u32);
        for token in truncated.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            match self.classify(token) {
                1 => pos += 1,
                -1 => neg += 1,
                _ => {}
            }
        }

        let total = pos + neg;
        if total == 0 || pos == neg {
            return SentimentScore::neutral();
        }
        let confidence = f64::from(pos.abs_diff(neg)) / f64::from(total);
        let label = if pos > neg {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        SentimentScore { label, confidence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        let analyzer = LexiconAnalyzer::english();
        assert_eq!(analyzer.analyze("   "), SentimentScore::neutral());
    }

    #[test]
    fn english_majority_decides_label() {
        let analyzer = LexiconAnalyzer::english();
        let score = analyzer.analyze("Strong growth and a steady recovery, despite one Decline.");
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!((score.confidence - 0.5).abs() < 1e-12);

        let score = analyzer.analyze("Recession fears deepen as the deficit widens.");
        assert_eq!(score.label, SentimentLabel::Negative);
        assert_eq!(score.confidence, 1.0);
    }

    #[test]
    fn arabic_matches_with_definite_article() {
        let analyzer = LexiconAnalyzer::arabic();
        let score = analyzer.analyze("الركود و الأزمة في الاقتصاد");
        assert_eq!(score.label, SentimentLabel::Negative);
    }

    #[test]
    fn truncation_limits_scored_text() {
        let analyzer = LexiconAnalyzer::new(["good"], ["bad"], 8);
        assert_eq!(analyzer.analyze("good bad bad bad").label, SentimentLabel::Neutral);
        assert_eq!(analyzer.analyze("good xx bad bad").label, SentimentLabel::Positive);
    }

    #[test]
    fn labels_round_trip_through_text() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
            SentimentLabel::Error,
        ] {
            assert_eq!(SentimentLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(SentimentLabel::parse(""), None);
    }
}
