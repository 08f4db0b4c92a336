// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use super::{PersistenceError, ProcessorMapError};

/// Errors from loading and validating a run configuration file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or parsed
    Persistence(PersistenceError),
    /// The file parsed but describes processors that cannot be built
    Invalid(Vec<ProcessorMapError>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Persistence(error) => write!(f, "{}", error),
            ConfigError::Invalid(errors) => {
                write!(f, "Configuration validation failed:")?;
                for error in errors {
                    write!(f, "\n{}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Persistence(error) => Some(error),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<PersistenceError> for ConfigError {
    fn from(error: PersistenceError) -> Self {
        ConfigError::Persistence(error)
    }
}
