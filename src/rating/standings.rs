//! Running rating and win/loss state
//!
//! [`Standings`] owns the mutable state of one aggregation run. Lookups return
//! `Option`; callers that need a value for an unseen player substitute the
//! calculator's initial rating (or an empty record) explicitly.

use crate::rating::calculator::RatingCalculator;
use crate::types::{Match, PlayerId, PlayerRatings, PlayerRecord, PlayerStats};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Ratings and records of every player seen so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    ratings: PlayerRatings,
    stats: PlayerStats,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rating, or `None` if the player has never played
    pub fn rating(&self, player_id: &str) -> Option<f64> {
        self.ratings.get(player_id).copied()
    }

    /// Current rating, substituting `default` for players without history
    pub fn rating_or(&self, player_id: &str, default: f64) -> f64 {
        self.rating(player_id).unwrap_or(default)
    }

    /// Current record, or `None` if the player has never played
    pub fn record(&self, player_id: &str) -> Option<PlayerRecord> {
        self.stats.get(player_id).copied()
    }

    pub fn ratings(&self) -> &PlayerRatings {
        &self.ratings
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn player_count(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Apply one match: update both ratings, then both records
    pub fn apply(&mut self, game: &Match, calculator: &dyn RatingCalculator) {
        let default = calculator.initial_rating();
        let rating_one = self.rating_or(game.player1(), default);
        let rating_two = self.rating_or(game.player2(), default);
        let outcome = game.outcome_for_player1();

        let update = calculator.update(rating_one, rating_two, outcome);
        trace!(
            "{} {:.2} -> {:.2}, {} {:.2} -> {:.2}",
            game.player1(),
            rating_one,
            update.player_one,
            game.player2(),
            rating_two,
            update.player_two
        );

        self.ratings.insert(game.player1().clone(), update.player_one);
        self.ratings.insert(game.player2().clone(), update.player_two);

        self.record_entry(game.player1()).record(outcome);
        self.record_entry(game.player2()).record(outcome.inverse());
    }

    fn record_entry(&mut self, player_id: &PlayerId) -> &mut PlayerRecord {
        self.stats.entry(player_id.clone()).or_default()
    }
}
