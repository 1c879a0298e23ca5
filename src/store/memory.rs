//! In-memory match store

use crate::store::MatchStore;
use crate::types::Match;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Vector-backed store used for tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: RwLock<Vec<Match>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(matches: Vec<Match>) -> Self {
        Self {
            matches: RwLock::new(matches),
        }
    }

    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.matches.read().await.is_empty()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn load(&self) -> crate::error::Result<Vec<Match>> {
        Ok(self.matches.read().await.clone())
    }

    async fn append(&self, game: &Match) -> crate::error::Result<()> {
        self.matches.write().await.push(game.clone());
        Ok(())
    }
}
