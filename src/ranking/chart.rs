//! Rating trajectory series for the charting collaborator
//!
//! For a prefix of weekly snapshots, the players currently rated highest get a
//! labeled series of `(week, rating)` points. Rendering the series into an
//! image happens outside this crate.

use crate::ranking::builder::ranked_players;
use crate::season::WeeklySnapshot;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Number of players plotted per chart
pub const DEFAULT_TOP_N: usize = 5;

/// Rating trajectory of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: PlayerId,
    /// `(week, rating)` pairs, only for weeks in which the player was rated
    pub points: Vec<(u32, f64)>,
}

/// Series for one week-so-far prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyChart {
    /// Last week included in the prefix
    pub week: u32,
    pub series: Vec<ChartSeries>,
}

/// Build the chart for a prefix of snapshots ending at its last element.
///
/// Returns `None` for an empty prefix.
pub fn chart_series(prefix: &[WeeklySnapshot], top_n: usize) -> Option<WeeklyChart> {
    let last = prefix.last()?;

    let series = ranked_players(&last.player_ratings)
        .into_iter()
        .take(top_n)
        .map(|(name, _)| ChartSeries {
            name: name.clone(),
            points: prefix
                .iter()
                .filter_map(|snapshot| {
                    snapshot
                        .player_ratings
                        .get(name)
                        .map(|rating| (snapshot.week, *rating))
                })
                .collect(),
        })
        .collect();

    Some(WeeklyChart {
        week: last.week,
        series,
    })
}

/// One chart per week, each covering every week up to and including it
pub fn chart_series_for_all_weeks(snapshots: &[WeeklySnapshot], top_n: usize) -> Vec<WeeklyChart> {
    (1..=snapshots.len())
        .filter_map(|end| chart_series(&snapshots[..end], top_n))
        .collect()
}
