// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{PersistenceError, ProcessorError, ValidationErrors};

/// Errors that abort a graph run.
///
/// Nothing here is recovered from locally: the executor logs the failure and
/// hands it back to the caller unchanged. Context mutations made by nodes that
/// already completed are not rolled back.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The graph or its processor references failed validation
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A scheduling round made no progress while nodes remained
    #[error("Dependency cycle detected in graph. Unexecuted nodes: [{}]", .stuck.join(", "))]
    Cycle {
        /// Nodes that never became eligible, in declared order
        stuck: Vec<String>,
    },

    /// A processor failed while running a node
    #[error("Node '{node_id}' failed after {elapsed_ms}ms: {source}")]
    NodeExecution {
        node_id: String,
        elapsed_ms: u64,
        #[source]
        source: ProcessorError,
    },

    /// The run log or another backing file could not be written
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ExecutionError {
    /// Id of the node whose processor failed, if this is a node failure.
    pub fn failed_node(&self) -> Option<&str> {
        match self {
            ExecutionError::NodeExecution { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}
