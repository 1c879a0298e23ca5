//! Error types for the season ladder
//!
//! Domain failures are described by [`LadderError`]; everything is propagated
//! through anyhow for consistent error handling across the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ladder scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Invalid match record on line {line}: {reason}")]
    InvalidMatchRecord { line: usize, reason: String },

    #[error("Snapshot is inconsistent: player {player_id} has a rating but no record")]
    InconsistentSnapshot { player_id: String },

    #[error("Date {date} is before the season start {season_start}")]
    DateBeforeSeason {
        date: chrono::NaiveDate,
        season_start: chrono::NaiveDate,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}
