//! High-score persistence.
//!
//! The table is one JSON array of `{score, date, playerName}` objects, kept
//! sorted by score descending and capped at `max_entries`. Loading is lenient:
//! a missing file or a file that is not an array reads as an empty table, and
//! malformed entries are dropped.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_HIGH_SCORES: usize = 10;
pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    /// ISO-8601 UTC timestamp.
    pub date: String,
    #[serde(rename = "playerName")]
    pub player_name: String,
}

impl HighScore {
    /// Entry stamped with the current UTC time.
    pub fn now(score: u32, player_name: impl Into<String>) -> Self {
        Self {
            score,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            player_name: player_name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("high score io: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score json: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait HighScoreStore {
    /// Insert `entry`, keeping the table sorted and capped.
    fn save(&mut self, entry: HighScore) -> Result<(), ScoreStoreError>;

    /// Table sorted by score descending, at most `max_entries` long.
    fn load(&self) -> Result<Vec<HighScore>, ScoreStoreError>;

    fn clear(&mut self) -> Result<(), ScoreStoreError>;
}

/// Top score of a loaded table.
pub fn best_score(scores: &[HighScore]) -> Option<u32> {
    scores.iter().map(|s| s.score).max()
}

fn insert_sorted(scores: &mut Vec<HighScore>, entry: HighScore, max_entries: usize) {
    scores.push(entry);
    // Stable: equal scores keep insertion order.
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(max_entries);
}

pub struct JsonFileStore {
    path: PathBuf,
    max_entries: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, MAX_HIGH_SCORES)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, scores: &[HighScore]) -> Result<(), ScoreStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(scores)?;
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Parse a stored table, dropping anything that is not a well-formed entry.
pub(crate) fn parse_lenient(bytes: &[u8]) -> Vec<HighScore> {
    let Ok(serde_json::Value::Array(items)) = serde_json::from_slice::<serde_json::Value>(bytes)
    else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<HighScore>(v).ok())
        .collect()
}

impl HighScoreStore for JsonFileStore {
    fn save(&mut self, entry: HighScore) -> Result<(), ScoreStoreError> {
        let mut scores = self.load()?;
        insert_sorted(&mut scores, entry, self.max_entries);
        self.write_atomic(&scores)
    }

    fn load(&self) -> Result<Vec<HighScore>, ScoreStoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut scores = parse_lenient(&bytes);
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(self.max_entries);
        Ok(scores)
    }

    fn clear(&mut self) -> Result<(), ScoreStoreError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process table for tests and throwaway sessions.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    scores: Vec<HighScore>,
    max_entries: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            scores: Vec::new(),
            max_entries: MAX_HIGH_SCORES,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for MemoryStore {
    fn save(&mut self, entry: HighScore) -> Result<(), ScoreStoreError> {
        insert_sorted(&mut self.scores, entry, self.max_entries);
        Ok(())
    }

    fn load(&self) -> Result<Vec<HighScore>, ScoreStoreError> {
        Ok(self.scores.clone())
    }

    fn clear(&mut self) -> Result<(), ScoreStoreError> {
        self.scores.clear();
        Ok(())
    }
}
