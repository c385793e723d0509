//! Configuration schema for the game and its shell.
//!
//! Every section and field has a default, so a partial (or empty) YAML file loads.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Dice and roll-animation settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Sound / haptics / theme.
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// High-score persistence.
    #[serde(default)]
    pub scores: ScoresConfig,
    /// NDJSON event log.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which dice stream a session uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceKind {
    #[default]
    Rng,
    Deterministic,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// How long a roll blocks further rolls and holds, in milliseconds.
    #[serde(default = "default_roll_animation_ms")]
    pub roll_animation_ms: u64,
    #[serde(default)]
    pub chance: ChanceKind,
    /// Fixed seed for the dice stream. Required for `deterministic`; `rng`
    /// draws one from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_roll_animation_ms() -> u64 {
    400
}

impl SessionConfig {
    pub fn roll_animation(&self) -> Duration {
        Duration::from_millis(self.roll_animation_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            roll_animation_ms: default_roll_animation_ms(),
            chance: ChanceKind::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackConfig {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub haptic_enabled: bool,
    #[serde(default)]
    pub theme: Theme,
}

fn default_true() -> bool {
    true
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            haptic_enabled: true,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoresConfig {
    /// JSON file holding the high-score table.
    #[serde(default = "default_scores_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Name recorded with each saved score.
    #[serde(default = "default_player_name")]
    pub player_name: String,
}

fn default_scores_path() -> PathBuf {
    PathBuf::from("yahtzee_high_scores.json")
}

fn default_max_entries() -> usize {
    10
}

fn default_player_name() -> String {
    "Player".to_string()
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            path: default_scores_path(),
            max_entries: default_max_entries(),
            player_name: default_player_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Append game events here as NDJSON. Disabled when absent.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
    /// Flush after this many lines (0 = only on drop / explicit flush).
    #[serde(default = "default_flush_every_lines")]
    pub flush_every_lines: u64,
}

fn default_flush_every_lines() -> u64 {
    1
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            events_path: None,
            flush_every_lines: default_flush_every_lines(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scores.max_entries == 0 {
            return Err(ConfigError::Invalid("scores.max_entries must be > 0"));
        }
        if self.scores.player_name.trim().is_empty() {
            return Err(ConfigError::Invalid("scores.player_name must not be empty"));
        }
        if self.session.chance == ChanceKind::Deterministic && self.session.seed.is_none() {
            return Err(ConfigError::Invalid(
                "session.seed is required when session.chance is deterministic",
            ));
        }
        Ok(())
    }
}
