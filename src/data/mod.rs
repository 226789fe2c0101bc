//! External data sources: IMF statistics, labelled article CSVs, and opt-in fallbacks.

pub mod fallback;
pub mod imf;
pub mod sentiment_source;

pub use fallback::*;
pub use imf::*;
pub use sentiment_source::*;
