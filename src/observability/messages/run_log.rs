// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run log persistence.

use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::observability::messages::StructuredLog;
use tracing::Span;

/// Artifact recorded against the open log entry.
///
/// # Log Level
/// `info!` - Shown to the operator as run progress
pub struct ArtifactRecorded<'a> {
    pub kind: &'a str,
    pub path: &'a str,
}

impl Display for ArtifactRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let file_name = Path::new(self.path)
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.path.into());
        write!(f, "  Output: {} → {}", self.kind, file_name)
    }
}

impl StructuredLog for ArtifactRecorded<'_> {
    fn log(&self) {
        tracing::info!(kind = self.kind, path = self.path, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("artifact", span_name = name, kind = self.kind)
    }
}

/// Run log written to disk.
///
/// # Log Level
/// `trace!` - Fires on every event
pub struct LogPersisted<'a> {
    pub path: &'a Path,
    pub entry_count: usize,
    pub in_progress: bool,
}

impl Display for LogPersisted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run log persisted to {} ({} entries, in_progress={})",
            self.path.display(),
            self.entry_count,
            self.in_progress
        )
    }
}

impl StructuredLog for LogPersisted<'_> {
    fn log(&self) {
        tracing::trace!(
            path = %self.path.display(),
            entry_count = self.entry_count,
            in_progress = self.in_progress,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("log_persisted", span_name = name)
    }
}

/// Run summary written.
///
/// # Log Level
/// `info!`
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::run_log::SummaryWritten;
/// use std::path::Path;
///
/// let msg = SummaryWritten {
///     logs_dir: Path::new("meeting_q3/logs"),
///     total_edges: 5,
///     total_artifacts: 7,
///     total_time_ms: 5400,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SummaryWritten<'a> {
    pub logs_dir: &'a Path,
    pub total_edges: usize,
    pub total_artifacts: usize,
    pub total_time_ms: u64,
}

impl Display for SummaryWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run summary written to {}: {} steps, {} artifacts, {}ms",
            self.logs_dir.display(),
            self.total_edges,
            self.total_artifacts,
            self.total_time_ms
        )
    }
}

impl StructuredLog for SummaryWritten<'_> {
    fn log(&self) {
        tracing::info!(
            logs_dir = %self.logs_dir.display(),
            total_edges = self.total_edges,
            total_artifacts = self.total_artifacts,
            total_time_ms = self.total_time_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("summary", span_name = name)
    }
}

/// A node failure could not be recorded in the run log.
///
/// # Log Level
/// `warn!` - The node failure itself is still returned to the caller
pub struct FailureNotRecorded<'a> {
    pub node_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for FailureNotRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failure of node '{}' could not be recorded in the run log: {}",
            self.node_id, self.error
        )
    }
}

impl StructuredLog for FailureNotRecorded<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("failure_not_recorded", span_name = name, node_id = self.node_id)
    }
}
