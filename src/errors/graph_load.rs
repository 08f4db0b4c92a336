// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{ExecutionError, PersistenceError, ValidationErrors};

/// Errors from reading a graph file.
///
/// A file that cannot be read or is not valid JSON is a persistence failure.
/// A well-formed document describing an invalid graph keeps every structural
/// problem as [`ValidationErrors`].
#[derive(Debug, Error)]
pub enum GraphLoadError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl From<GraphLoadError> for ExecutionError {
    fn from(error: GraphLoadError) -> Self {
        match error {
            GraphLoadError::Persistence(error) => ExecutionError::Persistence(error),
            GraphLoadError::Validation(errors) => ExecutionError::Validation(errors),
        }
    }
}
