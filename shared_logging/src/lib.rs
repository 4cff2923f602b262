#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Structured JSON-lines logging shared by the pricing core and its wrappers.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Log severity level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Debug information.
    Debug,
    /// Informational events.
    Info,
    /// Warning indicator.
    Warn,
    /// Error indicator.
    Error,
}

/// One structured log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Timestamp in ISO8601.
    pub timestamp: DateTime<Utc>,
    /// Component emitting the record (e.g., `pricing`, `valuate`).
    pub component: String,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// Valuation request this record belongs to, when request-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Uuid>,
    /// Arbitrary JSON payload for metrics/fields.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Creates a record with the provided info.
    #[must_use]
    pub fn new(component: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            component: component.into(),
            level,
            message: message.into(),
            request: None,
            fields: serde_json::Map::new(),
        }
    }

    /// Tags the record with the request it belongs to.
    #[must_use]
    pub fn with_request(mut self, request: Uuid) -> Self {
        self.request = Some(request);
        self
    }

    /// Merges a JSON object into the record's fields (non-objects are ignored).
    #[must_use]
    pub fn with_fields(mut self, payload: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = payload {
            self.fields.extend(map);
        }
        self
    }
}

/// Thread-safe append-only JSON-lines logger.
#[derive(Debug)]
pub struct JsonLinesLogger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl JsonLinesLogger {
    /// Creates or opens a logger at the desired path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Appends a record as one JSON line.
    pub fn append(&self, record: &LogRecord) -> Result<()> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Returns the underlying file path (useful for tests and operators).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads the last `limit` records from a JSON-lines log file.
pub fn read_tail(path: impl AsRef<Path>, limit: usize) -> Result<Vec<LogRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path).with_context(|| format!("opening log {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: LogRecord = serde_json::from_str(&line)
            .with_context(|| format!("parsing log line in {}", path.display()))?;
        records.push(record);
    }
    if records.len() > limit {
        records.drain(0..records.len() - limit);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn appends_json_lines() {
        let dir = tempdir().unwrap();
        let logger = JsonLinesLogger::open(dir.path().join("pricing.log")).unwrap();
        logger
            .append(&LogRecord::new("pricing", LogLevel::Info, "hello"))
            .unwrap();
        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("\"message\":\"hello\""));
    }

    #[test]
    fn records_carry_request_and_fields() {
        let request = Uuid::new_v4();
        let record = LogRecord::new("pricing", LogLevel::Warn, "degraded")
            .with_request(request)
            .with_fields(json!({ "warnings": 2 }));
        assert_eq!(record.request, Some(request));
        assert_eq!(record.fields.get("warnings"), Some(&json!(2)));
    }

    #[test]
    fn tail_returns_latest_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("valuate.log");
        let logger = JsonLinesLogger::open(&path).unwrap();
        for idx in 0..4 {
            logger
                .append(
                    &LogRecord::new("valuate", LogLevel::Debug, format!("line-{idx}"))
                        .with_fields(json!({ "idx": idx })),
                )
                .unwrap();
        }
        let tail = read_tail(&path, 2).unwrap();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].message, "line-2");
        assert_eq!(tail[1].message, "line-3");
    }

    #[test]
    fn tail_of_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let tail = read_tail(dir.path().join("absent.log"), 5).unwrap();
        assert!(tail.is_empty());
    }
}
