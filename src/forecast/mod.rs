//! Lagged-regression forecasting.
//!
//! - `model`: the fixed-weight single-step formula and its breakdown
//! - `band`: horizon-dependent confidence band
//! - `steps`: lazy multi-step generation (recursive or static)

pub mod band;
pub mod model;
pub mod steps;

pub use band::*;
pub use model::*;
pub use steps::*;
