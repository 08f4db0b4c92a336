// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Duplicate node ID detection
//! * Edges referencing unknown nodes
//! * Nodes referencing unregistered processors
//! * Validation results

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Duplicate node ID detected in a graph.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::validation::DuplicateNodeId;
///
/// let msg = DuplicateNodeId {
///     node_id: "rank_topics",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct DuplicateNodeId<'a> {
    pub node_id: &'a str,
}

impl Display for DuplicateNodeId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate node ID: '{}'", self.node_id)
    }
}

impl StructuredLog for DuplicateNodeId<'_> {
    fn log(&self) {
        tracing::error!(node_id = self.node_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            node_id = self.node_id,
        )
    }
}

/// Edge endpoint references a node that does not exist.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnknownEdgeEndpoint<'a> {
    pub source_id: &'a str,
    pub target_id: &'a str,
    pub missing_id: &'a str,
}

impl Display for UnknownEdgeEndpoint<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Edge '{}' -> '{}' references missing node '{}'",
            self.source_id, self.target_id, self.missing_id
        )
    }
}

impl StructuredLog for UnknownEdgeEndpoint<'_> {
    fn log(&self) {
        tracing::error!(
            source_id = self.source_id,
            target_id = self.target_id,
            missing_id = self.missing_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            source_id = self.source_id,
            target_id = self.target_id,
        )
    }
}

/// Node references a processor that is not registered.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnknownProcessor<'a> {
    pub node_id: &'a str,
    pub processor_ref: &'a str,
}

impl Display for UnknownProcessor<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' references unregistered processor '{}'",
            self.node_id, self.processor_ref
        )
    }
}

impl StructuredLog for UnknownProcessor<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            processor_ref = self.processor_ref,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            node_id = self.node_id,
            processor_ref = self.processor_ref,
        )
    }
}

/// Validation passed.
///
/// # Log Level
/// `debug!` - Routine
pub struct ValidationCompleted {
    pub node_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validation passed for {} nodes", self.node_count)
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::debug!(node_count = self.node_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("validation", span_name = name, node_count = self.node_count)
    }
}

/// Validation failed with one or more errors.
///
/// # Log Level
/// `warn!` - The caller decides whether this is fatal
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validation failed with {} error(s)", self.error_count)
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::warn!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "validation_failed",
            span_name = name,
            error_count = self.error_count,
        )
    }
}
