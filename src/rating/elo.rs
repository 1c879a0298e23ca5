//! Elo rating system implementation
//!
//! This module provides the concrete rating calculator using the Elo
//! algorithm from the skillratings crate. A single fixed K-factor applies to
//! every player and every match.

use crate::config::RatingConfig;
use crate::error::LadderError;
use crate::rating::calculator::{RatingCalculator, RatingUpdate};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Default K-factor
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Rating assigned to players without history
pub const DEFAULT_ELO: f64 = 1000.0;

/// Elo rating calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloCalculator {
    k_factor: f64,
    initial_rating: f64,
}

impl EloCalculator {
    /// Create a new Elo calculator
    pub fn new(k_factor: f64, initial_rating: f64) -> crate::error::Result<Self> {
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(LadderError::ConfigurationError {
                message: format!("K-factor must be positive and finite, got {}", k_factor),
            }
            .into());
        }
        if !initial_rating.is_finite() {
            return Err(LadderError::ConfigurationError {
                message: format!("Initial rating must be finite, got {}", initial_rating),
            }
            .into());
        }

        Ok(Self {
            k_factor,
            initial_rating,
        })
    }

    /// Build a calculator from the rating section of the configuration
    pub fn from_config(config: &RatingConfig) -> crate::error::Result<Self> {
        Self::new(config.k_factor, config.default_rating)
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: DEFAULT_ELO,
        }
    }
}

fn to_outcomes(outcome: Outcome) -> Outcomes {
    match outcome {
        Outcome::Win => Outcomes::WIN,
        Outcome::Loss => Outcomes::LOSS,
    }
}

impl RatingCalculator for EloCalculator {
    fn update(&self, player_one: f64, player_two: f64, outcome: Outcome) -> RatingUpdate {
        let (one, two) = elo(
            &EloRating { rating: player_one },
            &EloRating { rating: player_two },
            &to_outcomes(outcome),
            &EloConfig { k: self.k_factor },
        );

        RatingUpdate {
            player_one: one.rating,
            player_two: two.rating,
        }
    }

    fn expected_scores(&self, player_one: f64, player_two: f64) -> (f64, f64) {
        expected_score(
            &EloRating { rating: player_one },
            &EloRating { rating: player_two },
        )
    }

    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.k_factor,
            "initial_rating": self.initial_rating
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_calculator_creation() {
        let calculator = EloCalculator::new(32.0, 1000.0).unwrap();
        assert_eq!(calculator.k_factor(), 32.0);
        assert_eq!(calculator.initial_rating(), 1000.0);
    }

    #[test]
    fn test_invalid_k_factor() {
        assert!(EloCalculator::new(0.0, 1000.0).is_err());
        assert!(EloCalculator::new(-5.0, 1000.0).is_err());
        assert!(EloCalculator::new(f64::NAN, 1000.0).is_err());
        assert!(EloCalculator::new(32.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_equal_ratings_win() {
        let calculator = EloCalculator::default();
        let update = calculator.update(1000.0, 1000.0, Outcome::Win);

        // K/2 either way when both expect 0.5
        assert!((update.player_one - 1016.0).abs() < EPSILON);
        assert!((update.player_two - 984.0).abs() < EPSILON);
    }

    #[test]
    fn test_equal_ratings_loss() {
        let calculator = EloCalculator::default();
        let update = calculator.update(1000.0, 1000.0, Outcome::Loss);

        assert!((update.player_one - 984.0).abs() < EPSILON);
        assert!((update.player_two - 1016.0).abs() < EPSILON);
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let calculator = EloCalculator::default();
        let expected_win = calculator.update(1400.0, 1000.0, Outcome::Win);
        let upset = calculator.update(1400.0, 1000.0, Outcome::Loss);

        let expected_gain = expected_win.player_one - 1400.0;
        let upset_loss = 1400.0 - upset.player_one;
        assert!(upset_loss > expected_gain);
    }

    #[test]
    fn test_expected_scores_match_formula() {
        let calculator = EloCalculator::default();
        let (one, two) = calculator.expected_scores(1200.0, 1000.0);
        let formula = 1.0 / (1.0 + 10f64.powf((1000.0 - 1200.0) / 400.0));

        assert!((one - formula).abs() < EPSILON);
        assert!((two - (1.0 - formula)).abs() < EPSILON);
    }

    #[test]
    fn test_ratings_are_not_clamped() {
        let calculator = EloCalculator::new(400.0, 1000.0).unwrap();
        let update = calculator.update(10.0, 3000.0, Outcome::Loss);
        assert!(update.player_one < 10.0);
        assert!(update.player_one.is_finite());
    }

    #[test]
    fn test_calculator_config() {
        let calculator = EloCalculator::default();
        let config = calculator.config();
        assert_eq!(config["type"], "elo");
        assert_eq!(config["k_factor"], 32.0);
        assert_eq!(config["initial_rating"], 1000.0);
    }

    proptest! {
        #[test]
        fn prop_expected_scores_sum_to_one(a in -5000.0f64..5000.0, b in -5000.0f64..5000.0) {
            let calculator = EloCalculator::default();
            let (one, two) = calculator.expected_scores(a, b);
            prop_assert!((one + two - 1.0).abs() < EPSILON);
        }

        #[test]
        fn prop_update_is_zero_sum(
            a in -5000.0f64..5000.0,
            b in -5000.0f64..5000.0,
            k in 1.0f64..100.0,
            win in any::<bool>(),
        ) {
            let calculator = EloCalculator::new(k, 1000.0).unwrap();
            let outcome = if win { Outcome::Win } else { Outcome::Loss };
            let update = calculator.update(a, b, outcome);
            prop_assert!(update.net_change(a, b).abs() < 1e-6);
        }

        #[test]
        fn prop_winner_never_loses_rating(a in 0.0f64..3000.0, b in 0.0f64..3000.0) {
            let calculator = EloCalculator::default();
            let update = calculator.update(a, b, Outcome::Win);
            prop_assert!(update.player_one >= a);
            prop_assert!(update.player_two <= b);
        }
    }
}
