// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure reported by a processor while handling one invocation.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("{message}")]
    Failed { message: String },

    #[error("missing required argument '{name}'")]
    MissingArgument { name: String },

    #[error("argument '{name}' must be {expected}")]
    InvalidArgument { name: String, expected: &'static str },

    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("'{command}' produced invalid output: {reason}")]
    InvalidOutput { command: String, reason: String },
}

impl ProcessorError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}
