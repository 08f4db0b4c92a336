// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability: structured `tracing` messages and the durable run log.
//!
//! Two separate concerns live here:
//!
//! * `messages` - struct-based log messages with a `Display` impl and a
//!   [`messages::StructuredLog`] impl, so log text and fields are defined in
//!   one place instead of as strings scattered through the engine
//! * `run_log` / `summary` - the append-only, crash-resilient record of a run
//!   that is written to disk after every state change
//!
//! # Usage
//!
//! ```rust
//! use the_flywheel::observability::messages::engine::NodeFailed;
//! use the_flywheel::observability::messages::StructuredLog;
//!
//! let msg = NodeFailed {
//!     node_id: "rank_topics",
//!     duration_ms: 42,
//!     error: "model returned no topics",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
pub mod run_log;
pub mod summary;

pub use run_log::{
    read_log, ArtifactRecord, EntryStatus, LogEntry, RunLogSnapshot, RunLogger,
};
pub use summary::RunSummary;
