//! Rankings and the views built on them
//!
//! A ranking is derived from a single weekly snapshot. The scoreboard and
//! chart modules turn rankings and snapshot prefixes into report output.

pub mod builder;
pub mod chart;
pub mod scoreboard;

pub use builder::{rank, ranked_players, RankEntry};
pub use chart::{chart_series, chart_series_for_all_weeks, ChartSeries, WeeklyChart, DEFAULT_TOP_N};
pub use scoreboard::{entry_line, header_line, render_scoreboard};
