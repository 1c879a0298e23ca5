//! Rating system built on the Elo algorithm
//!
//! This module provides the pairwise rating calculator and the running
//! standings that an aggregation run mutates match by match.

pub mod calculator;
pub mod elo;
pub mod standings;

// Re-export commonly used types
pub use calculator::{RatingCalculator, RatingUpdate};
pub use elo::{EloCalculator, DEFAULT_ELO, DEFAULT_K_FACTOR};
pub use standings::Standings;
