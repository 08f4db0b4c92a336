// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor registration and command backend events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::observability::messages::StructuredLog;
use tracing::Span;

/// Processor registered in the registry.
///
/// # Log Level
/// `debug!` - Startup detail
///
/// # Example
/// ```
/// use the_flywheel::observability::messages::processor::ProcessorRegistered;
///
/// let msg = ProcessorRegistered {
///     processor_id: "extract_metadata",
///     backend: "command",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ProcessorRegistered<'a> {
    pub processor_id: &'a str,
    pub backend: &'a str,
}

impl Display for ProcessorRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered {} processor '{}'",
            self.backend, self.processor_id
        )
    }
}

impl StructuredLog for ProcessorRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            backend = self.backend,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor_registered",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}

/// External command spawned for a processor call.
///
/// # Log Level
/// `debug!`
pub struct CommandSpawned<'a> {
    pub processor_id: &'a str,
    pub command: &'a str,
    pub argument_count: usize,
}

impl Display for CommandSpawned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' spawning '{}' with {} arguments",
            self.processor_id, self.command, self.argument_count
        )
    }
}

impl StructuredLog for CommandSpawned<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            command = self.command,
            argument_count = self.argument_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "command",
            span_name = name,
            processor_id = self.processor_id,
            command = self.command,
        )
    }
}

/// Processor call finished and its outputs were collected.
///
/// # Log Level
/// `debug!`
pub struct ProcessorCompleted<'a> {
    pub processor_id: &'a str,
    pub output_count: usize,
    pub duration: Duration,
}

impl Display for ProcessorCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' returned {} outputs in {:?}",
            self.processor_id, self.output_count, self.duration
        )
    }
}

impl StructuredLog for ProcessorCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            processor_id = self.processor_id,
            output_count = self.output_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor_completed",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}

/// Processor failed.
///
/// # Log Level
/// `warn!` - The executor logs the run-level failure separately
pub struct ProcessorFailed<'a> {
    pub processor_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Processor '{}' failed: {}", self.processor_id, self.error)
    }
}

impl StructuredLog for ProcessorFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            processor_id = self.processor_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "processor_failed",
            span_name = name,
            processor_id = self.processor_id,
        )
    }
}
