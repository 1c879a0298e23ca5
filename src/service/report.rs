//! Weekly report files
//!
//! Writes one scoreboard (`week-{i}-scoreboard.txt`) and one chart series file
//! (`week-{i}-plot.json`) per week of a [`SeasonReport`].

use crate::config::ReportSettings;
use crate::ranking::{chart_series_for_all_weeks, rank, render_scoreboard};
use crate::service::app::SeasonReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// What a report run produced
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub matches: usize,
    pub weeks: usize,
    pub players: usize,
    pub output_dir: PathBuf,
}

pub fn scoreboard_file_name(week: u32) -> String {
    format!("week-{}-scoreboard.txt", week)
}

pub fn chart_file_name(week: u32) -> String {
    format!("week-{}-plot.json", week)
}

async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write every weekly scoreboard and chart of `report` into the output directory
pub async fn write_reports(report: &SeasonReport, settings: &ReportSettings) -> Result<ReportSummary> {
    let output_dir = &settings.output_dir;
    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for snapshot in &report.snapshots {
        let ranking = rank(snapshot)?;
        let path = output_dir.join(scoreboard_file_name(snapshot.week));
        write_file(&path, render_scoreboard(&ranking)).await?;
        debug!("Wrote {}", path.display());
    }

    for chart in chart_series_for_all_weeks(&report.snapshots, settings.chart_top_n) {
        let path = output_dir.join(chart_file_name(chart.week));
        write_file(&path, serde_json::to_vec_pretty(&chart)?).await?;
        debug!("Wrote {}", path.display());
    }

    let summary = ReportSummary {
        matches: report.matches,
        weeks: report.weeks(),
        players: report.players(),
        output_dir: output_dir.clone(),
    };
    info!(
        "Reports for run {} written to {}: {} weeks, {} players, {} matches",
        report.run_id,
        output_dir.display(),
        summary.weeks,
        summary.players,
        summary.matches
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::EloCalculator;
    use crate::ranking::WeeklyChart;
    use crate::season::StatsAggregator;
    use crate::types::{Match, Winner};
    use std::sync::Arc;
    use uuid::Uuid;

    fn report(matches: &[Match]) -> SeasonReport {
        SeasonReport {
            run_id: Uuid::new_v4(),
            matches: matches.len(),
            snapshots: StatsAggregator::new(Arc::new(EloCalculator::default()))
                .aggregate_matches(matches),
        }
    }

    fn settings() -> ReportSettings {
        ReportSettings {
            output_dir: std::env::temp_dir().join(format!("season-ladder-reports-{}", Uuid::new_v4())),
            chart_top_n: 5,
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(scoreboard_file_name(3), "week-3-scoreboard.txt");
        assert_eq!(chart_file_name(0), "week-0-plot.json");
    }

    #[tokio::test]
    async fn test_writes_one_pair_of_files_per_week() {
        let settings = settings();
        let report = report(&[
            Match::new("alice", "bob", Winner::PlayerOne, 0).unwrap(),
            Match::new("bob", "carol", Winner::PlayerTwo, 15).unwrap(),
        ]);

        let summary = write_reports(&report, &settings).await.unwrap();
        assert_eq!(summary.weeks, 3);
        assert_eq!(summary.players, 3);

        for week in 0..3 {
            assert!(settings.output_dir.join(scoreboard_file_name(week)).exists());
            assert!(settings.output_dir.join(chart_file_name(week)).exists());
        }

        let week0 =
            std::fs::read_to_string(settings.output_dir.join(scoreboard_file_name(0))).unwrap();
        let lines: Vec<&str> = week0.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("alice"));

        let chart: WeeklyChart = serde_json::from_slice(
            &std::fs::read(settings.output_dir.join(chart_file_name(2))).unwrap(),
        )
        .unwrap();
        assert_eq!(chart.week, 2);
        assert_eq!(chart.series.len(), 3);

        let _ = std::fs::remove_dir_all(&settings.output_dir);
    }

    #[tokio::test]
    async fn test_empty_history_writes_nothing() {
        let settings = settings();
        let summary = write_reports(&report(&[]), &settings).await.unwrap();

        assert_eq!(summary.weeks, 0);
        assert_eq!(std::fs::read_dir(&settings.output_dir).unwrap().count(), 0);

        let _ = std::fs::remove_dir_all(&settings.output_dir);
    }
}
