//! Rating system configuration

use crate::rating::{DEFAULT_ELO, DEFAULT_K_FACTOR};
use serde::{Deserialize, Serialize};

/// Parameters of the Elo calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating of a player without history
    pub default_rating: f64,
    /// Fixed K-factor applied to every match
    pub k_factor: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_ELO,
            k_factor: DEFAULT_K_FACTOR,
        }
    }
}
