// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for processor registry creation and processor instantiation.

use crate::config::BackendType;
use thiserror::Error;

/// Errors that can occur while building the processor registry
#[derive(Debug, Error)]
pub enum ProcessorMapError {
    /// A required configuration field for the backend is missing
    #[error("{backend:?} processor '{processor_id}' is missing the '{field}' field")]
    MissingField {
        processor_id: String,
        backend: BackendType,
        field: &'static str,
    },

    /// Failed to create a processor from configuration
    #[error("Failed to create {backend:?} processor '{processor_id}': {reason}")]
    ProcessorCreationFailed {
        processor_id: String,
        backend: BackendType,
        reason: String,
    },

    /// Two processors were registered under the same id
    #[error("Duplicate processor ID: '{processor_id}'")]
    DuplicateProcessorId { processor_id: String },
}
