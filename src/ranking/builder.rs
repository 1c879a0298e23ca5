//! Ranking builder: ordered view of a single snapshot

use crate::error::{LadderError, Result};
use crate::season::WeeklySnapshot;
use crate::types::{PlayerId, PlayerRatings};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based position
    pub position: usize,
    pub name: PlayerId,
    pub score: f64,
    pub won: u32,
    pub lost: u32,
    pub total: u32,
}

/// Ranking order: higher rating first, equal ratings alphabetical by name
pub fn compare_ranked(a: (&PlayerId, f64), b: (&PlayerId, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Players of a rating map in ranking order
pub fn ranked_players(ratings: &PlayerRatings) -> Vec<(&PlayerId, f64)> {
    let mut players: Vec<(&PlayerId, f64)> = ratings.iter().map(|(id, r)| (id, *r)).collect();
    players.sort_by(|a, b| compare_ranked(*a, *b));
    players
}

/// Rank every rated player of a snapshot
pub fn rank(snapshot: &WeeklySnapshot) -> Result<Vec<RankEntry>> {
    ranked_players(&snapshot.player_ratings)
        .into_iter()
        .enumerate()
        .map(|(index, (name, score))| {
            let record = snapshot.player_stats.get(name).ok_or_else(|| {
                LadderError::InconsistentSnapshot {
                    player_id: name.clone(),
                }
            })?;

            Ok(RankEntry {
                position: index + 1,
                name: name.clone(),
                score,
                won: record.won,
                lost: record.lost,
                total: record.total(),
            })
        })
        .collect()
}
