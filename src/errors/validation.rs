// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a processing graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two nodes in the same graph share an id
    #[error("Duplicate node ID: '{node_id}'")]
    DuplicateNodeId {
        /// The duplicate node ID
        node_id: String,
    },
    /// An edge names a node that is not part of the graph
    #[error("Edge '{source_id}' -> '{target_id}' references node '{missing_id}' which does not exist")]
    UnknownEdgeEndpoint {
        source_id: String,
        target_id: String,
        /// The endpoint that couldn't be resolved
        missing_id: String,
    },
    /// A node references a processor that is not registered
    #[error("Node '{node_id}' references processor '{processor_ref}' which is not registered")]
    UnknownProcessor {
        node_id: String,
        processor_ref: String,
    },
}

/// Every validation problem found in one pass.
///
/// Validation accumulates errors so a malformed graph file can be fixed in one
/// edit instead of one error at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was collected, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph validation failed:")?;
        for error in &self.0 {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
