//! Economic-relevance filtering and publication-date recovery.

use chrono::NaiveDate;

use crate::news::article::UNKNOWN_DATE;
use crate::series::parse_date_prefix;

pub const ENGLISH_KEYWORDS: &[&str] = &[
    "inflation", "deflation", "price increase", "price rise", "cost of living", "purchasing power",
    "consumer prices", "cpi", "core inflation", "headline inflation", "price pressure", "monetary policy",
    "interest rate", "central bank", "cbe", "price index", "economic growth", "gdp", "economic performance",
    "unemployment", "employment", "currency", "exchange rate", "dollar", "pound", "egp",
];

pub const ARABIC_KEYWORDS: &[&str] = &[
    // inflation and prices
    "التضخم", "الأسعار", "غلاء", "ارتفاع الأسعار", "أسعار المستهلك",
    // growth
    "النمو الاقتصادي", "الاقتصاد", "الناتج المحلي", "الأداء الاقتصادي",
    // currency
    "الدولار", "سعر الصرف", "الجنيه", "العملة",
    // monetary policy
    "البنك المركزي", "الفائدة", "السياسة النقدية",
    // employment
    "البطالة", "التوظيف",
];

/// True when title or body mentions any economic keyword.
///
/// English matching is case-insensitive substring matching; Arabic keywords are
/// matched as-is.
pub fn is_economic_article(title: &str, text: &str) -> bool {
    let combined = format!("{title} {text}");
    let lowered = combined.to_lowercase();
    ENGLISH_KEYWORDS.iter().any(|k| lowered.contains(k)) || ARABIC_KEYWORDS.iter().any(|k| combined.contains(k))
}

/// Extract a date from the first `/YYYY/M/D/` run of path segments.
pub fn date_from_url(url: &str) -> Option<NaiveDate> {
    let segments: Vec<&str> = url.split('/').collect();
    segments.windows(4).find_map(|w| {
        // The trailing segment must exist for the day to be delimited by '/'.
        let (y, m, d) = (w[0], w[1], w[2]);
        let digits = |s: &str, min: usize, max: usize| {
            (min..=max).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
        };
        if !(digits(y, 4, 4) && digits(m, 1, 2) && digits(d, 1, 2)) {
            return None;
        }
        NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
    })
}

/// Resolve a publication date: explicit value, then URL, then `Unknown`.
pub fn resolve_published_date(explicit: &str, url: &str) -> String {
    parse_date_prefix(explicit)
        .or_else(|| date_from_url(url))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}
