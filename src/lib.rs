//! Season Ladder - weekly Elo standings for a head-to-head game
//!
//! This crate replays a log of played matches, buckets them into season
//! weeks, and produces cumulative rating and win/loss snapshots per week,
//! ranked scoreboards and chart series. A small HTTP service records new
//! matches and serves the current standings.

pub mod config;
pub mod error;
pub mod metrics;
pub mod ranking;
pub mod rating;
pub mod season;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use rating::{EloCalculator, RatingCalculator};
pub use season::{partition, StatsAggregator, WeeklySnapshot};
pub use store::{CsvMatchStore, MatchStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
