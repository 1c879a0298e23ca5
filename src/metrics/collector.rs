//! Metrics collection using Prometheus
//!
//! Counters for match ingestion and gauges describing the latest report run.

use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the ladder service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Match ingestion metrics
    match_metrics: MatchMetrics,

    /// Report run metrics
    report_metrics: ReportMetrics,
}

/// Match ingestion metrics
#[derive(Clone)]
pub struct MatchMetrics {
    /// Matches accepted and appended to the log
    pub matches_recorded_total: IntCounter,

    /// Matches rejected at the ingestion boundary, by reason
    pub matches_rejected_total: IntCounterVec,
}

/// Report run metrics
#[derive(Clone)]
pub struct ReportMetrics {
    /// Completed recomputations
    pub report_runs_total: IntCounter,

    /// Players rated in the latest run
    pub rated_players: IntGauge,

    /// Weeks covered by the latest run
    pub season_weeks: IntGauge,

    /// Matches in the history of the latest run
    pub history_matches: IntGauge,

    /// Time spent recomputing ratings
    pub aggregation_duration: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let match_metrics = MatchMetrics::new(&registry)?;
        let report_metrics = ReportMetrics::new(&registry)?;

        Ok(Self {
            registry,
            match_metrics,
            report_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn matches(&self) -> &MatchMetrics {
        &self.match_metrics
    }

    pub fn reports(&self) -> &ReportMetrics {
        &self.report_metrics
    }

    pub fn record_match_recorded(&self) {
        self.match_metrics.matches_recorded_total.inc();
    }

    pub fn record_match_rejected(&self, reason: &str) {
        self.match_metrics
            .matches_rejected_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record the outcome of one recomputation
    pub fn record_report_run(&self, matches: usize, weeks: usize, players: usize, duration: Duration) {
        self.report_metrics.report_runs_total.inc();
        self.report_metrics.history_matches.set(matches as i64);
        self.report_metrics.season_weeks.set(weeks as i64);
        self.report_metrics.rated_players.set(players as i64);
        self.report_metrics
            .aggregation_duration
            .observe(duration.as_secs_f64());
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl MatchMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let matches_recorded_total = IntCounter::new(
            "season_ladder_matches_recorded_total",
            "Total matches appended to the log",
        )?;
        registry.register(Box::new(matches_recorded_total.clone()))?;

        let matches_rejected_total = IntCounterVec::new(
            Opts::new(
                "season_ladder_matches_rejected_total",
                "Total matches rejected at ingestion",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(matches_rejected_total.clone()))?;

        Ok(Self {
            matches_recorded_total,
            matches_rejected_total,
        })
    }
}

impl ReportMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let report_runs_total = IntCounter::new(
            "season_ladder_report_runs_total",
            "Total rating recomputations",
        )?;
        registry.register(Box::new(report_runs_total.clone()))?;

        let rated_players = IntGauge::new(
            "season_ladder_rated_players",
            "Players rated in the latest recomputation",
        )?;
        registry.register(Box::new(rated_players.clone()))?;

        let season_weeks = IntGauge::new(
            "season_ladder_season_weeks",
            "Weeks covered by the latest recomputation",
        )?;
        registry.register(Box::new(season_weeks.clone()))?;

        let history_matches = IntGauge::new(
            "season_ladder_history_matches",
            "Matches in the history of the latest recomputation",
        )?;
        registry.register(Box::new(history_matches.clone()))?;

        let aggregation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "season_ladder_aggregation_duration_seconds",
                "Time spent recomputing weekly snapshots",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(aggregation_duration.clone()))?;

        Ok(Self {
            report_runs_total,
            rated_players,
            season_weeks,
            history_matches,
            aggregation_duration,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_creation() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        assert_eq!(collector.matches().matches_recorded_total.get(), 0);
        assert_eq!(collector.reports().report_runs_total.get(), 0);
    }

    #[test]
    fn test_match_recording() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        collector.record_match_recorded();
        collector.record_match_recorded();
        collector.record_match_rejected("invalid_winner");

        assert_eq!(collector.matches().matches_recorded_total.get(), 2);
        assert_eq!(
            collector
                .matches()
                .matches_rejected_total
                .with_label_values(&["invalid_winner"])
                .get(),
            1
        );
    }

    #[test]
    fn test_report_run_recording() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");

        collector.record_report_run(12, 3, 5, Duration::from_micros(250));

        let reports = collector.reports();
        assert_eq!(reports.report_runs_total.get(), 1);
        assert_eq!(reports.history_matches.get(), 12);
        assert_eq!(reports.season_weeks.get(), 3);
        assert_eq!(reports.rated_players.get(), 5);
        assert_eq!(reports.aggregation_duration.get_sample_count(), 1);
    }

    #[test]
    fn test_registry_gathers_all_families() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        collector.record_match_rejected("same_player");
        assert_eq!(collector.registry().gather().len(), 7);
    }

    #[test]
    fn test_metrics_timer() {
        let collector = MetricsCollector::new().expect("Failed to create metrics collector");
        let timer = collector.start_timer();

        std::thread::sleep(Duration::from_millis(10));
        let duration = timer.elapsed();

        assert!(duration >= Duration::from_millis(10));

        let final_duration = timer.stop();
        assert!(final_duration >= Duration::from_millis(10));
    }
}
