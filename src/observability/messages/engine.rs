// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph run lifecycle and node execution events.
//!
//! This module contains message types for logging events related to:
//! * Run start and completion
//! * Node start, completion and failure
//! * Argument binding
//! * Scheduling deadlocks (cycles)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Graph run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     graph_name: "Content Flywheel",
///     node_count: 5,
///     edge_count: 4,
///     entry_points: &["extract_metadata"],
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub graph_name: &'a str,
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes with no prerequisites, in declared order
    pub entry_points: &'a [&'a str],
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting graph '{}': {} nodes, {} edges, entry points [{}]",
            self.graph_name,
            self.node_count,
            self.edge_count,
            self.entry_points.join(", ")
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            graph_name = self.graph_name,
            node_count = self.node_count,
            edge_count = self.edge_count,
            entry_points = %self.entry_points.join(", "),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_run",
            span_name = name,
            graph_name = self.graph_name,
            node_count = self.node_count,
        )
    }
}

/// Graph run completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::engine::RunCompleted;
/// use std::time::Duration;
///
/// let msg = RunCompleted {
///     graph_name: "Content Flywheel",
///     node_count: 5,
///     rounds: 5,
///     duration: Duration::from_millis(1250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunCompleted<'a> {
    pub graph_name: &'a str,
    pub node_count: usize,
    pub rounds: usize,
    pub duration: Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph '{}' completed: {} nodes in {} rounds, {:?}",
            self.graph_name, self.node_count, self.rounds, self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            graph_name = self.graph_name,
            node_count = self.node_count,
            rounds = self.rounds,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_run_completed",
            span_name = name,
            graph_name = self.graph_name,
            duration = ?self.duration,
        )
    }
}

/// Node execution started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NodeStarted<'a> {
    pub node_id: &'a str,
    pub processor_ref: &'a str,
    pub source: &'a str,
}

impl Display for NodeStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processing: {} → {} (processor '{}')",
            self.source, self.node_id, self.processor_ref
        )
    }
}

impl StructuredLog for NodeStarted<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            processor_ref = self.processor_ref,
            source = self.source,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_execution",
            span_name = name,
            node_id = self.node_id,
            processor_ref = self.processor_ref,
        )
    }
}

/// Node execution completed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NodeCompleted<'a> {
    pub node_id: &'a str,
    pub output_count: usize,
    pub duration_ms: u64,
}

impl Display for NodeCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "✓ Completed: {} ({} outputs, {}ms)",
            self.node_id, self.output_count, self.duration_ms
        )
    }
}

impl StructuredLog for NodeCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            output_count = self.output_count,
            duration_ms = self.duration_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_completed",
            span_name = name,
            node_id = self.node_id,
            duration_ms = self.duration_ms,
        )
    }
}

/// Node execution failed; the run aborts after this.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::engine::NodeFailed;
///
/// let msg = NodeFailed {
///     node_id: "rank_topics",
///     duration_ms: 42,
///     error: "model returned no topics",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct NodeFailed<'a> {
    pub node_id: &'a str,
    pub duration_ms: u64,
    pub error: &'a str,
}

impl Display for NodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' failed after {}ms: {}",
            self.node_id, self.duration_ms, self.error
        )
    }
}

impl StructuredLog for NodeFailed<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            duration_ms = self.duration_ms,
            error = self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "node_failed",
            span_name = name,
            node_id = self.node_id,
            error = self.error,
        )
    }
}

/// Arguments bound for a node call.
///
/// # Log Level
/// `debug!` - Argument names only, values may be large
pub struct ArgumentsBound<'a> {
    pub node_id: &'a str,
    pub argument_names: &'a [&'a str],
}

impl Display for ArgumentsBound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' invoked with arguments [{}]",
            self.node_id,
            self.argument_names.join(", ")
        )
    }
}

impl StructuredLog for ArgumentsBound<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            argument_count = self.argument_names.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("arguments_bound", span_name = name, node_id = self.node_id)
    }
}

/// A scheduling round made no progress.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::engine::CycleDetected;
///
/// let stuck = vec!["a".to_string(), "b".to_string()];
/// let msg = CycleDetected { stuck: &stuck };
///
/// assert_eq!(msg.to_string(), "Dependency cycle detected; unexecuted nodes: [a, b]");
/// ```
pub struct CycleDetected<'a> {
    pub stuck: &'a [String],
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dependency cycle detected; unexecuted nodes: [{}]",
            self.stuck.join(", ")
        )
    }
}

impl StructuredLog for CycleDetected<'_> {
    fn log(&self) {
        tracing::error!(
            stuck = %self.stuck.join(", "),
            stuck_count = self.stuck.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "cycle_detected",
            span_name = name,
            stuck_count = self.stuck.len(),
        )
    }
}
