//! Period calendar helpers and series alignment.

pub mod calendar;
pub mod merge;

pub use calendar::*;
pub use merge::*;
