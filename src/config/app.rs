//! Main application configuration
//!
//! This module defines the primary configuration structures for the season
//! ladder, including environment variable and TOML loading and validation.

use crate::config::rating::RatingConfig;
use crate::ranking::DEFAULT_TOP_N;
use crate::season::{parse_season_date, SeasonCalendar};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub season: SeasonSettings,
    pub rating: RatingConfig,
    pub storage: StorageSettings,
    pub report: ReportSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host the HTTP server binds to
    pub http_host: String,
    /// Port for the HTTP server
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Season settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSettings {
    /// First day of the season; match days count from here
    pub start_date: NaiveDate,
}

/// Match log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path of the append-only match log
    pub matches_file: PathBuf,
}

/// Weekly report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Directory receiving scoreboards and chart series
    pub output_dir: PathBuf,
    /// Number of players plotted per chart
    pub chart_top_n: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "season-ladder".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
            shutdown_timeout_seconds: 10,
        }
    }
}

impl Default for SeasonSettings {
    fn default() -> Self {
        Self {
            // Start of the 2018 autumn season
            start_date: NaiveDate::from_ymd_opt(2018, 9, 22).unwrap_or_default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            matches_file: PathBuf::from("matches.csv"),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            chart_top_n: DEFAULT_TOP_N,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", key, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validation
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HTTP_HOST") {
            self.service.http_host = host;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            self.service.http_port = parse_env("HTTP_PORT", &port)?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            self.service.shutdown_timeout_seconds = parse_env("SHUTDOWN_TIMEOUT_SECONDS", &timeout)?;
        }

        // Season and rating settings
        if let Ok(start) = env::var("SEASON_START") {
            self.season.start_date = parse_season_date(&start)?;
        }
        if let Ok(rating) = env::var("DEFAULT_RATING") {
            self.rating.default_rating = parse_env("DEFAULT_RATING", &rating)?;
        }
        if let Ok(k) = env::var("K_FACTOR") {
            self.rating.k_factor = parse_env("K_FACTOR", &k)?;
        }

        // Storage and report settings
        if let Ok(file) = env::var("MATCHES_FILE") {
            self.storage.matches_file = PathBuf::from(file);
        }
        if let Ok(dir) = env::var("REPORT_OUTPUT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
        }
        if let Ok(top_n) = env::var("CHART_TOP_N") {
            self.report.chart_top_n = parse_env("CHART_TOP_N", &top_n)?;
        }

        Ok(())
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Season calendar anchored at the configured start date
    pub fn calendar(&self) -> SeasonCalendar {
        SeasonCalendar::new(self.season.start_date)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }
    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate rating settings
    if !config.rating.k_factor.is_finite() || config.rating.k_factor <= 0.0 {
        return Err(anyhow!("K-factor must be positive"));
    }
    if !config.rating.default_rating.is_finite() {
        return Err(anyhow!("Default rating must be a finite number"));
    }

    // Validate storage and report settings
    if config.storage.matches_file.as_os_str().is_empty() {
        return Err(anyhow!("Matches file path cannot be empty"));
    }
    if config.report.output_dir.as_os_str().is_empty() {
        return Err(anyhow!("Report output directory cannot be empty"));
    }
    if config.report.chart_top_n == 0 {
        return Err(anyhow!("Chart top-N must be greater than 0"));
    }

    Ok(())
}
