//! Configuration management for the season ladder
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{
    validate_config, AppConfig, ReportSettings, SeasonSettings, ServiceSettings, StorageSettings,
};
pub use rating::RatingConfig;
