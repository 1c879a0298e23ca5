//! Rating calculator trait
//!
//! This module defines the interface for pairwise rating updates. Calculators
//! are plain values: an update depends only on its inputs.

use crate::types::Outcome;
use serde::{Deserialize, Serialize};

/// Ratings of both participants after a single match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player_one: f64,
    pub player_two: f64,
}

impl RatingUpdate {
    /// Sum of both rating changes relative to the given prior ratings
    pub fn net_change(&self, prior_one: f64, prior_two: f64) -> f64 {
        (self.player_one - prior_one) + (self.player_two - prior_two)
    }
}

/// Trait for calculating rating changes after a head-to-head match
pub trait RatingCalculator: Send + Sync {
    /// Calculate both new ratings
    ///
    /// # Arguments
    /// * `player_one` - Current rating of the first player
    /// * `player_two` - Current rating of the second player
    /// * `outcome` - Result from the first player's perspective
    fn update(&self, player_one: f64, player_two: f64, outcome: Outcome) -> RatingUpdate;

    /// Expected scores of both players; they always sum to 1
    fn expected_scores(&self, player_one: f64, player_two: f64) -> (f64, f64);

    /// Rating assumed for a player with no history
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
