// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod graph_load;
mod persistence;
mod processor;
mod processor_map;
mod validation;

pub use config::ConfigError;
pub use execution::ExecutionError;
pub use graph_load::GraphLoadError;
pub use persistence::PersistenceError;
pub use processor::ProcessorError;
pub use processor_map::ProcessorMapError;
pub use validation::{ValidationError, ValidationErrors};
