// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same event with typed fields at the right
//! level.
//!
//! # Organization
//!
//! * `engine` - graph run lifecycle and per-node execution events
//! * `processor` - processor registration and command backend events
//! * `run_log` - run log persistence events
//! * `validation` - graph and configuration validation results
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_flywheel::observability::messages::engine::RunStarted;
//!
//! let msg = RunStarted {
//!     graph_name: "Content Flywheel",
//!     node_count: 5,
//!     edge_count: 4,
//!     entry_points: &["extract_metadata"],
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod engine;
pub mod processor;
pub mod run_log;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
