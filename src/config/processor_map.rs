// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::command::CommandProcessor;
use crate::backends::local::{FnProcessor, LocalProcessorFactory};
use crate::config::{BackendType, RunConfig};
use crate::errors::{ProcessorError, ProcessorMapError};
use crate::observability::messages::processor::ProcessorRegistered;
use crate::observability::messages::StructuredLog;
use crate::traits::{Arguments, Outputs, Processor};

/// A registry mapping processor identifiers to their implementations.
///
/// Graph nodes name their implementation through `processor_ref`; the
/// executor resolves that name here. The registry is populated once at
/// startup, either from a [`RunConfig`] or programmatically, and every
/// reference in a graph is checked against it before a run begins.
///
/// # Examples
///
/// ```
/// use the_flywheel::config::ProcessorRegistry;
/// use the_flywheel::traits::Outputs;
///
/// let mut registry = ProcessorRegistry::new();
/// registry.register_fn("count_words", |args| {
///     let text = args.require_str("text")?;
///     let mut out = Outputs::new();
///     out.insert("word_count".into(), text.split_whitespace().count().into());
///     Ok(out)
/// });
///
/// assert!(registry.contains_key("count_words"));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ProcessorRegistry(pub HashMap<String, Arc<dyn Processor>>);

impl ProcessorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Create a registry from configuration, building every processor
    pub fn from_config(cfg: &RunConfig) -> Result<Self, ProcessorMapError> {
        let mut registry = Self::new();

        for p in &cfg.processors {
            if registry.contains_key(&p.id) {
                return Err(ProcessorMapError::DuplicateProcessorId {
                    processor_id: p.id.clone(),
                });
            }

            let processor: Arc<dyn Processor> = match p.backend {
                BackendType::Local => LocalProcessorFactory::create_processor(p)?,
                BackendType::Command => Arc::new(CommandProcessor::from_config(p)?),
            };

            ProcessorRegistered {
                processor_id: &p.id,
                backend: p.backend.as_str(),
            }
            .log();
            registry.insert(p.id.clone(), processor);
        }

        Ok(registry)
    }

    /// Insert a processor, replacing any previous one with the same id
    pub fn insert(&mut self, id: String, processor: Arc<dyn Processor>) {
        self.0.insert(id, processor);
    }

    /// Register a closure as a processor
    pub fn register_fn<F>(&mut self, id: impl Into<String>, f: F)
    where
        F: Fn(Arguments) -> Result<Outputs, ProcessorError> + Send + Sync + 'static,
    {
        let id = id.into();
        let processor = FnProcessor::new(id.clone(), f);
        self.0.insert(id, Arc::new(processor));
    }

    /// Get a processor by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Processor>> {
        self.0.get(id)
    }

    /// Check if a processor exists
    pub fn contains_key(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Get all processor IDs
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&String> = self.0.keys().collect();
        ids.sort();
        f.debug_struct("ProcessorRegistry")
            .field("processor_count", &self.0.len())
            .field("processor_ids", &ids)
            .finish()
    }
}

impl From<HashMap<String, Arc<dyn Processor>>> for ProcessorRegistry {
    fn from(map: HashMap<String, Arc<dyn Processor>>) -> Self {
        Self(map)
    }
}
