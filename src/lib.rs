//! `inflation-forecast` library crate.
//!
//! The binary (`infl`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the forecaster can be driven from other tools with already-loaded series
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod news;
pub mod plot;
pub mod report;
pub mod sentiment;
pub mod series;
