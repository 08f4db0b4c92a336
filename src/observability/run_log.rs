// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Durable, append-only record of a graph run.
//!
//! [`RunLogger`] keeps the completed log entries plus at most one in-progress
//! entry, and rewrites `process_log.json` after every state change. The file
//! is written to a sibling temp file and renamed into place, so a crash at any
//! point leaves either the previous or the new state on disk, never a torn
//! document.
//!
//! ```text
//! start(source, target) -> record_artifact(path, kind)* -> complete(ms, status)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::consts::{PROCESS_LOG_FILE, SUMMARY_JSON_FILE, SUMMARY_MARKDOWN_FILE};
use crate::errors::PersistenceError;
use crate::observability::messages::run_log::{ArtifactRecorded, LogPersisted, SummaryWritten};
use crate::observability::messages::StructuredLog;
use crate::observability::summary::{render_markdown, RunSummary};
use crate::traits::{RunEvent, RunObserver};

/// Status of one log entry.
///
/// Serialized as `processing`, `complete`, or `error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntryStatus {
    Processing,
    Complete,
    Error(String),
}

const ERROR_PREFIX: &str = "error: ";

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Processing => write!(f, "processing"),
            EntryStatus::Complete => write!(f, "complete"),
            EntryStatus::Error(message) => write!(f, "{ERROR_PREFIX}{message}"),
        }
    }
}

impl From<EntryStatus> for String {
    fn from(status: EntryStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for EntryStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        match value.as_str() {
            "processing" => Ok(EntryStatus::Processing),
            "complete" => Ok(EntryStatus::Complete),
            other => other
                .strip_prefix(ERROR_PREFIX)
                .map(|message| EntryStatus::Error(message.to_string()))
                .ok_or_else(|| format!("unknown log entry status '{other}'")),
        }
    }
}

/// An artifact produced while a log entry was open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// One executed step of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub source: String,
    pub target: String,
    pub status: EntryStatus,
    pub start_time: DateTime<Utc>,
    pub artifacts: Vec<ArtifactRecord>,
    pub execution_time_ms: u64,
}

/// The persisted run log as read back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogSnapshot {
    pub log_entries: Vec<LogEntry>,
    pub current_edge: Option<LogEntry>,
    pub last_updated: DateTime<Utc>,
}

impl RunLogSnapshot {
    /// The completed entry for `target`, if any
    pub fn entry_for(&self, target: &str) -> Option<&LogEntry> {
        self.log_entries.iter().find(|entry| entry.target == target)
    }
}

#[derive(Serialize)]
struct PersistedLog<'a> {
    log_entries: &'a [LogEntry],
    current_edge: Option<&'a LogEntry>,
    last_updated: DateTime<Utc>,
}

/// Read a persisted run log.
pub fn read_log<P: AsRef<Path>>(path: P) -> Result<RunLogSnapshot, PersistenceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| PersistenceError::json(path, e))
}

/// Replace `path` with `contents` via a temp file in the same directory.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), PersistenceError> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, contents).map_err(|e| PersistenceError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| PersistenceError::io(path, e))
}

/// Crash-resilient audit trail for one run.
#[derive(Debug)]
pub struct RunLogger {
    logs_dir: PathBuf,
    log_path: PathBuf,
    entries: Vec<LogEntry>,
    current: Option<LogEntry>,
    started: Instant,
}

impl RunLogger {
    /// Create the logs directory and persist an empty log.
    pub fn create<P: AsRef<Path>>(logs_dir: P) -> Result<Self, PersistenceError> {
        let logs_dir = logs_dir.as_ref().to_path_buf();
        fs::create_dir_all(&logs_dir).map_err(|e| PersistenceError::io(&logs_dir, e))?;

        let logger = Self {
            log_path: logs_dir.join(PROCESS_LOG_FILE),
            logs_dir,
            entries: Vec::new(),
            current: None,
            started: Instant::now(),
        };
        logger.persist()?;
        Ok(logger)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Completed entries in completion order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The open entry, if a step is in progress
    pub fn current(&self) -> Option<&LogEntry> {
        self.current.as_ref()
    }

    /// Open a new in-progress entry.
    ///
    /// An entry that is still open is replaced; callers are expected to
    /// `complete` every entry they start.
    pub fn start(&mut self, source: &str, target: &str) -> Result<(), PersistenceError> {
        self.current = Some(LogEntry {
            source: source.to_string(),
            target: target.to_string(),
            status: EntryStatus::Processing,
            start_time: Utc::now(),
            artifacts: Vec::new(),
            execution_time_ms: 0,
        });
        self.persist()
    }

    /// Append an artifact to the open entry. No-op when nothing is open.
    pub fn record_artifact(&mut self, path: &str, kind: &str) -> Result<(), PersistenceError> {
        let Some(current) = self.current.as_mut() else {
            return Ok(());
        };

        current.artifacts.push(ArtifactRecord {
            path: path.to_string(),
            kind: kind.to_string(),
            created_at: Utc::now(),
        });
        ArtifactRecorded { kind, path }.log();
        self.persist()
    }

    /// Close the open entry with its final status. No-op when nothing is open.
    pub fn complete(&mut self, duration_ms: u64, status: EntryStatus) -> Result<(), PersistenceError> {
        let Some(mut entry) = self.current.take() else {
            return Ok(());
        };

        entry.status = status;
        entry.execution_time_ms = duration_ms;
        self.entries.push(entry);
        self.persist()
    }

    /// Write `summary.json` and `summary.md` and return the summary.
    pub fn summarize(&self) -> Result<RunSummary, PersistenceError> {
        let summary = RunSummary {
            total_edges: self.entries.len(),
            total_artifacts: self.entries.iter().map(|entry| entry.artifacts.len()).sum(),
            total_time_ms: self.started.elapsed().as_millis() as u64,
            completed_at: Utc::now(),
        };

        let summary_path = self.logs_dir.join(SUMMARY_JSON_FILE);
        let json = serde_json::to_vec_pretty(&summary)
            .map_err(|e| PersistenceError::json(&summary_path, e))?;
        write_atomically(&summary_path, &json)?;

        let markdown_path = self.logs_dir.join(SUMMARY_MARKDOWN_FILE);
        write_atomically(&markdown_path, render_markdown(&summary, &self.entries).as_bytes())?;

        SummaryWritten {
            logs_dir: &self.logs_dir,
            total_edges: summary.total_edges,
            total_artifacts: summary.total_artifacts,
            total_time_ms: summary.total_time_ms,
        }
        .log();

        Ok(summary)
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        let log = PersistedLog {
            log_entries: &self.entries,
            current_edge: self.current.as_ref(),
            last_updated: Utc::now(),
        };
        let json =
            serde_json::to_vec_pretty(&log).map_err(|e| PersistenceError::json(&self.log_path, e))?;
        write_atomically(&self.log_path, &json)?;

        LogPersisted {
            path: &self.log_path,
            entry_count: self.entries.len(),
            in_progress: self.current.is_some(),
        }
        .log();
        Ok(())
    }
}

impl RunObserver for RunLogger {
    fn on_event(&mut self, event: &RunEvent<'_>) -> Result<(), PersistenceError> {
        match event {
            RunEvent::NodeStarted { source, target } => self.start(source, target),
            RunEvent::ArtifactProduced { path, kind } => self.record_artifact(path, kind),
            RunEvent::NodeCompleted { duration_ms } => {
                self.complete(*duration_ms, EntryStatus::Complete)
            }
            RunEvent::NodeFailed {
                duration_ms,
                message,
            } => self.complete(*duration_ms, EntryStatus::Error(message.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_persists_empty_log() {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");

        let logger = RunLogger::create(&logs_dir).unwrap();
        let snapshot = read_log(logger.log_path()).unwrap();

        assert!(snapshot.log_entries.is_empty());
        assert!(snapshot.current_edge.is_none());
        assert_eq!(logger.logs_dir(), logs_dir.as_path());
    }

    #[test]
    fn test_every_mutation_is_flushed() {
        let dir = TempDir::new().unwrap();
        let mut logger = RunLogger::create(dir.path()).unwrap();

        logger.start("input", "a").unwrap();
        let snapshot = read_log(logger.log_path()).unwrap();
        let current = snapshot.current_edge.expect("open entry persisted");
        assert_eq!(current.target, "a");
        assert_eq!(current.status, EntryStatus::Processing);

        logger.record_artifact("run/artifacts/metadata.json", "metadata_path").unwrap();
        let snapshot = read_log(logger.log_path()).unwrap();
        assert_eq!(snapshot.current_edge.unwrap().artifacts.len(), 1);

        logger.complete(17, EntryStatus::Complete).unwrap();
        // Simulates a crash right after completing: nothing else is written.
        let snapshot = read_log(logger.log_path()).unwrap();
        assert!(snapshot.current_edge.is_none());
        let entry = snapshot.entry_for("a").expect("completed entry persisted");
        assert_eq!(entry.status, EntryStatus::Complete);
        assert_eq!(entry.execution_time_ms, 17);
        assert_eq!(entry.artifacts[0].kind, "metadata_path");
    }

    #[test]
    fn test_artifact_and_complete_without_open_entry_are_noops() {
        let dir = TempDir::new().unwrap();
        let mut logger = RunLogger::create(dir.path()).unwrap();

        logger.record_artifact("x.json", "x").unwrap();
        logger.complete(5, EntryStatus::Complete).unwrap();

        assert!(logger.entries().is_empty());
        assert!(logger.current().is_none());
    }

    #[test]
    fn test_status_serialization() {
        let cases = vec![
            (EntryStatus::Processing, "\"processing\""),
            (EntryStatus::Complete, "\"complete\""),
            (EntryStatus::Error("boom".to_string()), "\"error: boom\""),
        ];

        for (status, expected) in cases {
            assert_eq!(serde_json::to_string(&status).unwrap(), expected);
            let parsed: EntryStatus = serde_json::from_str(expected).unwrap();
            assert_eq!(parsed, status);
        }

        assert!(serde_json::from_str::<EntryStatus>("\"skipped\"").is_err());
    }

    #[test]
    fn test_status_try_from_string() {
        assert_eq!(
            EntryStatus::try_from("error: disk full".to_string()),
            Ok(EntryStatus::Error("disk full".to_string()))
        );
        assert_eq!(
            EntryStatus::try_from("skipped".to_string()),
            Err("unknown log entry status 'skipped'".to_string())
        );
    }

    #[test]
    fn test_persisted_field_names() {
        let dir = TempDir::new().unwrap();
        let mut logger = RunLogger::create(dir.path()).unwrap();
        logger.start("input", "a").unwrap();
        logger.record_artifact("out.md", "aida_content_path").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(logger.log_path()).unwrap()).unwrap();

        assert!(raw["log_entries"].as_array().unwrap().is_empty());
        assert!(raw["last_updated"].is_string());
        assert_eq!(raw["current_edge"]["source"], "input");
        assert_eq!(raw["current_edge"]["status"], "processing");
        assert_eq!(raw["current_edge"]["execution_time_ms"], 0);
        assert_eq!(raw["current_edge"]["artifacts"][0]["type"], "aida_content_path");
        assert!(raw["current_edge"]["artifacts"][0]["created_at"].is_string());
        assert!(!dir.path().join("process_log.json.tmp").exists());
    }

    #[test]
    fn test_summarize_writes_both_documents() {
        let dir = TempDir::new().unwrap();
        let mut logger = RunLogger::create(dir.path()).unwrap();

        logger.start("input", "a").unwrap();
        logger.record_artifact("a1.json", "a_out").unwrap();
        logger.record_artifact("a2.json", "a_out").unwrap();
        logger.complete(3, EntryStatus::Complete).unwrap();
        logger.start("a", "b").unwrap();
        logger.record_artifact("b.json", "b_out").unwrap();
        logger.complete(4, EntryStatus::Complete).unwrap();

        let summary = logger.summarize().unwrap();
        assert_eq!(summary.total_edges, 2);
        assert_eq!(summary.total_artifacts, 3);

        let on_disk: RunSummary =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(on_disk, summary);

        let markdown = fs::read_to_string(dir.path().join("summary.md")).unwrap();
        assert!(markdown.contains("### 2. a → b"));
    }

    #[test]
    fn test_observer_maps_events() {
        let dir = TempDir::new().unwrap();
        let mut logger = RunLogger::create(dir.path()).unwrap();

        logger
            .on_event(&RunEvent::NodeStarted {
                source: "input",
                target: "a",
            })
            .unwrap();
        logger
            .on_event(&RunEvent::NodeFailed {
                duration_ms: 9,
                message: "boom",
            })
            .unwrap();

        assert_eq!(
            logger.entries()[0].status,
            EntryStatus::Error("boom".to_string())
        );
    }
}
