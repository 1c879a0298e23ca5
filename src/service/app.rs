//! Main application state and service coordination
//!
//! [`AppState`] ties the match store, the rating engine, the season calendar
//! and the metrics collector together. Every read recomputes the season from
//! the full match history.

use crate::config::AppConfig;
use crate::error::LadderError;
use crate::metrics::MetricsCollector;
use crate::ranking::{rank, RankEntry};
use crate::rating::{EloCalculator, RatingCalculator};
use crate::season::{partition, SeasonCalendar, StatsAggregator, WeeklySnapshot};
use crate::service::report::{write_reports, ReportSummary};
use crate::store::{CsvMatchStore, MatchStore};
use crate::types::{Match, Winner};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Incoming request to record a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMatchRequest {
    pub player1: String,
    pub player2: String,
    pub winner: u8,
}

impl RecordMatchRequest {
    /// Validate the request and turn it into a match played on `day`
    pub fn into_match(self, day: u32) -> Result<Match, LadderError> {
        let winner = Winner::try_from(self.winner)?;
        Match::new(&self.player1, &self.player2, winner, day)
    }
}

/// Result of one full recomputation of the season
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub run_id: Uuid,
    /// Matches in the history that produced this report
    pub matches: usize,
    pub snapshots: Vec<WeeklySnapshot>,
}

impl SeasonReport {
    pub fn weeks(&self) -> usize {
        self.snapshots.len()
    }

    /// Snapshot of the most recent week, if any match was played
    pub fn latest(&self) -> Option<&WeeklySnapshot> {
        self.snapshots.last()
    }

    pub fn players(&self) -> usize {
        self.latest().map(|s| s.player_count()).unwrap_or(0)
    }

    /// Ranking as of the most recent week; empty before the first match
    pub fn latest_ranking(&self) -> crate::error::Result<Vec<RankEntry>> {
        match self.latest() {
            Some(snapshot) => rank(snapshot),
            None => Ok(Vec::new()),
        }
    }
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Match history
    store: Arc<dyn MatchStore>,

    /// Rating engine
    aggregator: StatsAggregator,

    /// Converts calendar dates into match days
    calendar: SeasonCalendar,

    /// Metrics collector
    metrics: Arc<MetricsCollector>,

    started_at: DateTime<Utc>,
}

impl AppState {
    /// Initialize the application with the CSV match log from the configuration
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        let store = Arc::new(CsvMatchStore::new(config.storage.matches_file.clone()));
        Self::with_store(config, store)
    }

    /// Initialize the application with an explicit match store
    pub fn with_store(config: AppConfig, store: Arc<dyn MatchStore>) -> Result<Self, ServiceError> {
        info!("Initializing {} service", config.service.name);

        let calculator = EloCalculator::from_config(&config.rating).map_err(|e| {
            ServiceError::Configuration {
                message: e.to_string(),
            }
        })?;
        info!(
            "Rating: K-factor {}, default rating {}",
            calculator.k_factor(),
            calculator.initial_rating()
        );

        let metrics = MetricsCollector::new().map_err(|e| ServiceError::Initialization {
            message: format!("Failed to create metrics collector: {}", e),
        })?;

        Ok(Self {
            calendar: config.calendar(),
            aggregator: StatsAggregator::new(Arc::new(calculator)),
            config,
            store,
            metrics: Arc::new(metrics),
            started_at: Utc::now(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    pub fn store(&self) -> Arc<dyn MatchStore> {
        self.store.clone()
    }

    pub fn calculator(&self) -> &dyn RatingCalculator {
        self.aggregator.calculator()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Recompute every weekly snapshot from the full match history
    pub async fn compute_season(&self) -> crate::error::Result<SeasonReport> {
        let run_id = Uuid::new_v4();
        let matches = self.store.load().await?;

        let timer = self.metrics.start_timer();
        let weeks = partition(&matches);
        let snapshots = self.aggregator.aggregate(&weeks);
        let elapsed = timer.stop();

        let report = SeasonReport {
            run_id,
            matches: matches.len(),
            snapshots,
        };
        self.metrics
            .record_report_run(report.matches, report.weeks(), report.players(), elapsed);

        debug!(
            "Season run {}: {} matches, {} weeks, {} players in {:.2}ms",
            run_id,
            report.matches,
            report.weeks(),
            report.players(),
            elapsed.as_secs_f64() * 1000.0
        );
        Ok(report)
    }

    /// Recompute the season and write every weekly report
    pub async fn generate_reports(&self) -> crate::error::Result<ReportSummary> {
        let report = self.compute_season().await?;
        write_reports(&report, &self.config.report).await
    }

    /// Validate and append a match played on `day`
    pub async fn record_match_on(
        &self,
        request: RecordMatchRequest,
        day: u32,
    ) -> crate::error::Result<Match> {
        let game = match request.into_match(day) {
            Ok(game) => game,
            Err(e) => {
                warn!("Rejected match: {}", e);
                self.metrics.record_match_rejected("invalid_match");
                return Err(e.into());
            }
        };

        self.store.append(&game).await?;
        self.metrics.record_match_recorded();

        info!(
            "Recorded match {} vs {}, winner {}, day {}",
            game.player1(),
            game.player2(),
            game.winner(),
            game.day()
        );
        Ok(game)
    }

    /// Validate and append a match played today
    pub async fn record_match(&self, request: RecordMatchRequest) -> crate::error::Result<Match> {
        let day = match self.calendar.today() {
            Ok(day) => day,
            Err(e) => {
                warn!("Rejected match: {}", e);
                self.metrics.record_match_rejected("before_season");
                return Err(e.into());
            }
        };
        self.record_match_on(request, day).await
    }
}
