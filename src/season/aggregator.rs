//! Weekly stats aggregation
//!
//! The aggregator folds week buckets into cumulative snapshots. Each snapshot
//! is an owned copy of the running standings at the end of its week, so later
//! weeks can never leak into it.

use crate::rating::{RatingCalculator, Standings};
use crate::season::partition::{partition, WeekBucket};
use crate::types::{Match, PlayerRatings, PlayerStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Cumulative ratings and records as of the end of a week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    pub week: u32,
    pub player_ratings: PlayerRatings,
    pub player_stats: PlayerStats,
}

impl WeeklySnapshot {
    fn capture(week: u32, standings: &Standings) -> Self {
        Self {
            week,
            player_ratings: standings.ratings().clone(),
            player_stats: standings.stats().clone(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.player_ratings.len()
    }
}

/// Turns a match history into one snapshot per week
#[derive(Clone)]
pub struct StatsAggregator {
    calculator: Arc<dyn RatingCalculator>,
}

impl StatsAggregator {
    pub fn new(calculator: Arc<dyn RatingCalculator>) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &dyn RatingCalculator {
        self.calculator.as_ref()
    }

    /// Lazily produce snapshots, one per bucket, in bucket order
    pub fn snapshots<'a>(&'a self, weeks: &'a [WeekBucket]) -> Snapshots<'a> {
        Snapshots {
            calculator: self.calculator.as_ref(),
            weeks: weeks.iter(),
            standings: Standings::new(),
        }
    }

    /// Produce every weekly snapshot
    pub fn aggregate(&self, weeks: &[WeekBucket]) -> Vec<WeeklySnapshot> {
        let snapshots: Vec<WeeklySnapshot> = self.snapshots(weeks).collect();
        debug!(
            "Aggregated {} weeks, {} players rated",
            snapshots.len(),
            snapshots.last().map(|s| s.player_count()).unwrap_or(0)
        );
        snapshots
    }

    /// Partition a chronological match list and aggregate it
    pub fn aggregate_matches(&self, matches: &[Match]) -> Vec<WeeklySnapshot> {
        self.aggregate(&partition(matches))
    }
}

impl std::fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsAggregator")
            .field("calculator", &self.calculator.config())
            .finish()
    }
}

/// Iterator over cumulative weekly snapshots
pub struct Snapshots<'a> {
    calculator: &'a dyn RatingCalculator,
    weeks: std::slice::Iter<'a, WeekBucket>,
    standings: Standings,
}

impl Snapshots<'_> {
    /// Running state after the last yielded week
    pub fn standings(&self) -> &Standings {
        &self.standings
    }
}

impl Iterator for Snapshots<'_> {
    type Item = WeeklySnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.weeks.next()?;
        for game in &bucket.matches {
            self.standings.apply(game, self.calculator);
        }
        Some(WeeklySnapshot::capture(bucket.week, &self.standings))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.weeks.size_hint()
    }
}
