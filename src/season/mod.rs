//! Season engine: week partitioning and cumulative weekly snapshots
//!
//! Everything here is synchronous and free of I/O. A run takes the full match
//! history and recomputes every snapshot from scratch.

pub mod aggregator;
pub mod calendar;
pub mod partition;

pub use aggregator::{Snapshots, StatsAggregator, WeeklySnapshot};
pub use calendar::{parse_season_date, SeasonCalendar};
pub use partition::{partition, week_of, WeekBucket, DAYS_PER_WEEK};
