//! Match storage interface and implementations
//!
//! The store is the ingestion boundary: every match it returns has already
//! been validated, and matches come back in the order they were appended.

pub mod csv;
pub mod memory;

use crate::types::Match;
use async_trait::async_trait;

pub use self::csv::{format_record, parse_record, CsvMatchStore};
pub use self::memory::InMemoryMatchStore;

/// Trait for match storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Load the full match history in append order
    async fn load(&self) -> crate::error::Result<Vec<Match>>;

    /// Append a match to the end of the history
    async fn append(&self, game: &Match) -> crate::error::Result<()>;
}
