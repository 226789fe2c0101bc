//! News article records, relevance filtering and the deduplicated article store.

pub mod article;
pub mod keywords;
pub mod store;

pub use article::*;
pub use keywords::*;
pub use store::*;
