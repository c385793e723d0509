//! yh-logging: append-only NDJSON game event log.
//!
//! One JSON object per line. Every event carries `event`, `ts_ms` and a
//! `VersionInfoV1` block so old logs stay readable after schema changes.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Schema versioning fields attached to every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub event_schema_version: u32,
    pub ruleset_id: &'static str,
}

impl VersionInfoV1 {
    pub fn new(ruleset_id: &'static str) -> Self {
        Self {
            event_schema_version: EVENT_SCHEMA_VERSION,
            ruleset_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RollEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub round: u8,
    pub rolls_left: u8,
    pub dice: [u8; 5],
    pub held: [bool; 5],
}

#[derive(Debug, Clone, Serialize)]
pub struct HoldEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub round: u8,
    pub die: u8,
    pub held: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub round: u8,
    pub category: &'static str,
    pub points: u32,
    /// Joker bonus added by this score (0 or 100).
    pub yahtzee_bonus_awarded: u32,
    pub dice: [u8; 5],
    pub rolls_used: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameOverEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub total_score: u32,
    pub upper_total: u32,
    pub upper_bonus: u32,
    pub lower_total: u32,
    pub yahtzee_bonus: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    /// Id of the game that starts with this reset.
    pub game_id: u64,
    /// Round the previous game was in (13 if it had finished).
    pub previous_round: u8,
    pub previous_game_over: bool,
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_written: u64,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_written: 0,
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_written += 1;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

/// Read every parseable line of an NDJSON file, skipping blank and corrupt lines
/// (e.g. a partial last line left by a crash).
pub fn read_events_lenient(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    let mut out = Vec::new();
    for line in s.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(line) {
            out.push(v);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        #[derive(Serialize)]
        struct E {
            event: &'static str,
            x: u32,
        }

        w.write_event(&E { event: "e", x: 1 }).unwrap();
        w.write_event(&E { event: "e", x: 2 }).unwrap();
        w.flush().unwrap();
        assert_eq!(w.lines_written(), 2);

        let vals = read_events_lenient(&path).unwrap();
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["x"], 1);
        assert_eq!(vals[1]["x"], 2);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            let ev = HoldEventV1 {
                event: "hold",
                ts_ms: now_ms(),
                v: VersionInfoV1::new("test"),
                game_id: 1,
                round: 2,
                die: 3,
                held: true,
            };
            w.write_event(&ev).unwrap();
            w.flush().unwrap();
        }

        // Simulate crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"hold","die":"#).unwrap();
        f.flush().unwrap();

        let vals = read_events_lenient(&path).unwrap();
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["event"], "hold");
        assert_eq!(vals[0]["die"], 3);
        assert_eq!(vals[0]["v"]["event_schema_version"], EVENT_SCHEMA_VERSION);
    }

    #[test]
    fn periodic_flush_makes_lines_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 1).unwrap();
        let ev = GameOverEventV1 {
            event: "game_over",
            ts_ms: 0,
            v: VersionInfoV1::new("test"),
            game_id: 9,
            total_score: 250,
            upper_total: 70,
            upper_bonus: 35,
            lower_total: 145,
            yahtzee_bonus: 0,
        };
        w.write_event(&ev).unwrap();

        // No explicit flush: flush_every_lines=1 already pushed it to disk.
        let vals = read_events_lenient(&path).unwrap();
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["total_score"], 250);
    }

    #[test]
    fn append_keeps_earlier_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        for i in 0..3u64 {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            let ev = ResetEventV1 {
                event: "reset",
                ts_ms: 0,
                v: VersionInfoV1::new("test"),
                game_id: i,
                previous_round: 1,
                previous_game_over: false,
            };
            w.write_event(&ev).unwrap();
            w.flush().unwrap();
        }
        let vals = read_events_lenient(&path).unwrap();
        let ids: Vec<u64> = vals.iter().map(|v| v["game_id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn missing_log_reports_io_error_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_events_lenient(dir.path().join("absent.ndjson")).unwrap_err();
        assert!(matches!(err, NdjsonError::Io(_)));
        assert!(err.to_string().starts_with("io: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unserializable_event_reports_json_error() {
        use std::collections::HashMap;

        let dir = tempfile::tempdir().unwrap();
        let mut w = NdjsonWriter::open_append(dir.path().join("e.ndjson")).unwrap();
        // Non-string map keys cannot be written as JSON.
        let bad: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        let err = w.write_event(&bad).unwrap_err();
        assert!(matches!(err, NdjsonError::Json(_)));
        assert!(err.to_string().starts_with("json: "));
    }
}
