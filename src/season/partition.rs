//! Week partitioning of a chronological match history

use crate::types::Match;
use serde::Serialize;

/// Number of days in a week bucket
pub const DAYS_PER_WEEK: u32 = 7;

/// Week index of a day offset
pub fn week_of(day: u32) -> u32 {
    day / DAYS_PER_WEEK
}

/// Matches that fall in one 7-day range counted from the season start
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekBucket {
    pub week: u32,
    pub matches: Vec<Match>,
}

impl WeekBucket {
    pub fn new(week: u32) -> Self {
        Self {
            week,
            matches: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Group matches into week buckets.
///
/// `matches` must be sorted by day. The last match decides how many buckets
/// exist, and every week from 0 up to it gets a bucket even if nobody played.
/// Within a bucket, matches keep their input order.
pub fn partition(matches: &[Match]) -> Vec<WeekBucket> {
    let Some(last) = matches.last() else {
        return Vec::new();
    };

    let latest_week = week_of(last.day());
    let mut weeks: Vec<WeekBucket> = (0..=latest_week).map(WeekBucket::new).collect();

    for game in matches {
        let week = week_of(game.day()) as usize;
        // Unsorted input can point past the last match's week.
        while weeks.len() <= week {
            let next = weeks.len() as u32;
            weeks.push(WeekBucket::new(next));
        }
        weeks[week].matches.push(game.clone());
    }

    weeks
}
