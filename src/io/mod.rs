//! Input/output helpers.
//!
//! - local inflation CSV ingest + validation (`ingest`)
//! - combined forecast table read/write (`export`)
//! - model params JSON read/write (`params`)

pub mod export;
pub mod ingest;
pub mod params;

pub use export::*;
pub use ingest::*;
pub use params::*;
