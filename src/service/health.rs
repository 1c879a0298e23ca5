//! Health check reporting
//!
//! This module provides health check functionality for the season ladder
//! service: a cheap liveness probe and a full check that exercises the match
//! store and the rating engine.

use crate::service::app::AppState;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Detailed component checks
    pub checks: Vec<ComponentCheck>,
    /// Season statistics, when the season could be computed
    pub stats: Option<SeasonStats>,
}

/// Individual component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Optional error message if unhealthy
    pub message: Option<String>,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// Season statistics for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonStats {
    pub matches: usize,
    pub weeks: usize,
    pub players: usize,
    /// Seconds since the service started
    pub uptime_seconds: i64,
}

impl HealthCheck {
    /// Perform a full health check: load the history and recompute the season
    pub async fn check(app_state: Arc<AppState>) -> Result<Self> {
        let start = std::time::Instant::now();

        let (season_check, stats) = match app_state.compute_season().await {
            Ok(report) => (
                ComponentCheck {
                    name: "match_store".to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                    duration_ms: start.elapsed().as_millis() as u64,
                },
                Some(SeasonStats {
                    matches: report.matches,
                    weeks: report.weeks(),
                    players: report.players(),
                    uptime_seconds: (chrono::Utc::now() - app_state.started_at()).num_seconds(),
                }),
            ),
            Err(e) => {
                error!("Health check could not compute the season: {:#}", e);
                (
                    ComponentCheck {
                        name: "match_store".to_string(),
                        status: HealthStatus::Unhealthy,
                        message: Some(e.to_string()),
                        duration_ms: start.elapsed().as_millis() as u64,
                    },
                    None,
                )
            }
        };

        Ok(HealthCheck {
            status: season_check.status.clone(),
            service: app_state.config().service.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
            checks: vec![season_check],
            stats,
        })
    }

    /// Simple liveness check - the process answers, nothing else is touched
    pub fn liveness_check() -> HealthStatus {
        HealthStatus::Healthy
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize health check: {}", e))
    }
}
