// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;

use crate::config::consts::SUMMARY_KEY;
use crate::config::{ProcessorRegistry, RunConfig};
use crate::context::ArtifactContext;
use crate::engine::{AmbientKeys, GraphExecutor, StepInvoker};
use crate::errors::{ExecutionError, PersistenceError, ProcessorMapError};
use crate::graph::Graph;
use crate::observability::run_log::RunLogger;
use crate::observability::summary::RunSummary;
use crate::traits::{NoopObserver, Observers, RunObserver};

/// Flywheel runtime - wires the processor registry and executor from configuration.
///
/// `Runtime` is the entry point for running a graph with full bookkeeping: it
/// owns a configured [`GraphExecutor`], and each call to [`Runtime::run`]
/// records progress to a fresh run log, writes the run summary and folds that
/// summary into the returned context under `run_summary`.
///
/// # Examples
///
/// ```
/// use the_flywheel::config::{Runtime, RunConfig};
///
/// let runtime = Runtime::from_config(&RunConfig::default()).unwrap();
///
/// // No processors configured, default ambient keys
/// assert!(runtime.executor().registry().is_empty());
/// assert_eq!(runtime.executor().invoker().ambient().outputs_dir, "outputs_dir");
/// ```
#[derive(Debug, Clone)]
pub struct Runtime {
    executor: GraphExecutor,
}

impl Runtime {
    pub fn new(executor: GraphExecutor) -> Self {
        Self { executor }
    }

    /// Build the registry and invoker described by `cfg`.
    pub fn from_config(cfg: &RunConfig) -> Result<Self, ProcessorMapError> {
        let registry = ProcessorRegistry::from_config(cfg)?;
        let invoker = StepInvoker::new(AmbientKeys::from(&cfg.ambient));
        Ok(Self::new(GraphExecutor::new(registry, invoker)))
    }

    pub fn executor(&self) -> &GraphExecutor {
        &self.executor
    }

    /// Execute `graph`, logging to `logs_dir`, and return the final context.
    ///
    /// On failure the run log already holds every completed node and the
    /// failing one; no summary is written.
    pub async fn run(
        &self,
        graph: &Graph,
        seed: ArtifactContext,
        logs_dir: &Path,
    ) -> Result<ArtifactContext, ExecutionError> {
        self.run_observed(graph, seed, logs_dir, &mut NoopObserver).await
    }

    /// Like [`Runtime::run`], also reporting every event to `observer`.
    ///
    /// The run log sees each event first, so `observer` never sees progress
    /// that was not recorded.
    pub async fn run_observed(
        &self,
        graph: &Graph,
        seed: ArtifactContext,
        logs_dir: &Path,
        observer: &mut dyn RunObserver,
    ) -> Result<ArtifactContext, ExecutionError> {
        let mut logger = RunLogger::create(logs_dir)?;
        let mut context = {
            let mut observers = Observers::new().with(&mut logger).with(observer);
            self.executor.execute(graph, seed, &mut observers).await?
        };

        let summary: RunSummary = logger.summarize()?;
        let value = serde_json::to_value(&summary)
            .map_err(|e| PersistenceError::json(logger.logs_dir(), e))?;
        context.set(SUMMARY_KEY, value);

        Ok(context)
    }
}
