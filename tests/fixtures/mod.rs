//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use season_ladder::config::AppConfig;
use season_ladder::service::AppState;
use season_ladder::store::MatchStore;
use season_ladder::types::{Match, Winner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Scratch directory under the system temp dir, removed on drop
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("season-ladder-{}-{}", label, Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("Failed to create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Shorthand for a validated match
pub fn game(player1: &str, player2: &str, winner: u8, day: u32) -> Match {
    let winner = Winner::try_from(winner).expect("winner must be 1 or 2");
    Match::new(player1, player2, winner, day).expect("valid match")
}

/// Four players over three weeks, with an idle week in the middle
pub fn sample_season() -> Vec<Match> {
    vec![
        game("alice", "bob", 1, 0),
        game("carol", "dave", 2, 1),
        game("alice", "carol", 1, 3),
        game("bob", "dave", 1, 6),
        game("dave", "alice", 1, 15),
        game("carol", "bob", 1, 16),
    ]
}

/// Same history in the log format
pub fn sample_log() -> String {
    [
        "alice,bob,1,0",
        "carol,dave,2,1",
        "alice,carol,1,3",
        "bob,dave,1,6",
        "dave,alice,1,15",
        "carol,bob,1,16",
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}

/// Configuration pointing every path into `scratch`
pub fn test_config(scratch: &ScratchDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.matches_file = scratch.join("matches.csv");
    config.report.output_dir = scratch.join("reports");
    config
}

pub fn app_state(config: AppConfig, store: Arc<dyn MatchStore>) -> Arc<AppState> {
    Arc::new(AppState::with_store(config, store).expect("Failed to build app state"))
}
