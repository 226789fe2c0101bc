//! Mathematical utilities: lag vectors and weighted linear combinations.

pub mod lags;
pub mod linear;

pub use lags::*;
pub use linear::*;
