//! Line-oriented match log
//!
//! Each match is one line `player1,player2,winner,day` with no header. Blank
//! lines and lines with the wrong number of fields are skipped; a line with
//! four fields but bad values fails the whole load.

use crate::error::LadderError;
use crate::store::MatchStore;
use crate::types::{Match, Winner};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const FIELD_COUNT: usize = 4;

/// Unsigned integer written the way `format_record` writes it: ASCII digits only
fn parse_digits<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse one line of the log.
///
/// `line_number` is 1-based and only used for error messages. Returns
/// `Ok(None)` for lines that should be skipped.
pub fn parse_record(line_number: usize, line: &str) -> Result<Option<Match>, LadderError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        warn!(
            "Skipping malformed match line {}: expected {} fields, found {}",
            line_number,
            FIELD_COUNT,
            fields.len()
        );
        return Ok(None);
    }

    let invalid = |reason: String| LadderError::InvalidMatchRecord {
        line: line_number,
        reason,
    };

    let winner = parse_digits::<u8>(fields[2])
        .and_then(|value| Winner::try_from(value).ok())
        .ok_or_else(|| invalid(format!("winner must be 1 or 2, got '{}'", fields[2])))?;
    let day = parse_digits::<u32>(fields[3])
        .ok_or_else(|| invalid(format!("day must be a non-negative integer, got '{}'", fields[3])))?;

    Match::new(fields[0], fields[1], winner, day)
        .map(Some)
        .map_err(|e| invalid(e.to_string()))
}

/// Serialize a match as one log line, including the trailing newline
pub fn format_record(game: &Match) -> String {
    format!(
        "{},{},{},{}\n",
        game.player1(),
        game.player2(),
        game.winner(),
        game.day()
    )
}

/// Parse a whole log
pub fn parse_log(content: &str) -> Result<Vec<Match>, LadderError> {
    let mut matches = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if let Some(game) = parse_record(index + 1, line)? {
            matches.push(game);
        }
    }
    Ok(matches)
}

/// Match store backed by an append-only text file
#[derive(Debug)]
pub struct CsvMatchStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvMatchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MatchStore for CsvMatchStore {
    async fn load(&self) -> crate::error::Result<Vec<Match>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Match log {} does not exist yet, starting with an empty history",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read match log {}", self.path.display()))
            }
        };

        let matches = parse_log(&content)?;
        debug!(
            "Loaded {} matches from {}",
            matches.len(),
            self.path.display()
        );
        Ok(matches)
    }

    async fn append(&self, game: &Match) -> crate::error::Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| LadderError::StorageError {
                message: format!("Failed to create {}: {}", parent.display(), e),
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| LadderError::StorageError {
                message: format!("Failed to open {}: {}", self.path.display(), e),
            })?;

        file.write_all(format_record(game).as_bytes())
            .await
            .map_err(|e| LadderError::StorageError {
                message: format!("Failed to append to {}: {}", self.path.display(), e),
            })?;
        file.flush().await?;

        debug!(
            "Appended match {} vs {} (day {})",
            game.player1(),
            game.player2(),
            game.day()
        );
        Ok(())
    }
}
