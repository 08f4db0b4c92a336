// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;

use crate::config::consts::ROOT_SOURCE;
use crate::config::ProcessorRegistry;
use crate::context::ArtifactContext;
use crate::engine::invoker::StepInvoker;
use crate::errors::{ExecutionError, ProcessorError};
use crate::graph::{validate_processor_refs, DependencyGraph, Graph, Node};
use crate::observability::messages::engine::{
    CycleDetected, NodeCompleted, NodeFailed, NodeStarted, RunCompleted, RunStarted,
};
use crate::observability::messages::run_log::FailureNotRecorded;
use crate::observability::messages::StructuredLog;
use crate::traits::{Outputs, RunEvent, RunObserver};

/// Executes a graph one node at a time in dependency order.
///
/// Execution proceeds in rounds. Each round scans the nodes in declared order
/// and runs every node whose prerequisites have all run, merging its outputs
/// into the context before the next node is considered. A node made ready
/// earlier in a round can therefore run later in that same round. A round in
/// which nothing runs while nodes remain means the graph contains a cycle.
///
/// Every processor reference is checked against the registry before the first
/// node runs, so a graph naming an unregistered processor fails without side
/// effects.
///
/// The first processor failure aborts the run. There is no retry and no
/// skipping of downstream nodes; the failing node is recorded in the run log
/// with an `error:` status before the error is returned. If that record cannot
/// be written, a warning is logged and the node failure is still returned.
#[derive(Debug, Clone, Default)]
pub struct GraphExecutor {
    registry: ProcessorRegistry,
    invoker: StepInvoker,
}

impl GraphExecutor {
    pub fn new(registry: ProcessorRegistry, invoker: StepInvoker) -> Self {
        Self { registry, invoker }
    }

    /// Create an executor with default ambient keys
    pub fn with_registry(registry: ProcessorRegistry) -> Self {
        Self::new(registry, StepInvoker::default())
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    pub fn invoker(&self) -> &StepInvoker {
        &self.invoker
    }

    /// Run every node of `graph` against `context`, reporting progress to `observer`.
    ///
    /// Returns the final context on success. On failure the context is
    /// dropped; the observer has already seen every completed node.
    pub async fn execute(
        &self,
        graph: &Graph,
        mut context: ArtifactContext,
        observer: &mut dyn RunObserver,
    ) -> Result<ArtifactContext, ExecutionError> {
        validate_processor_refs(graph, &self.registry)?;

        let dependencies = DependencyGraph::from_graph(graph);
        RunStarted {
            graph_name: graph.name(),
            node_count: graph.len(),
            edge_count: graph.edges().len(),
            entry_points: &dependencies.entry_points(graph),
        }
        .log();

        let run_start = Instant::now();
        let mut executed: HashSet<String> = HashSet::with_capacity(graph.len());
        let mut rounds = 0;

        while executed.len() < graph.len() {
            rounds += 1;
            let mut progressed = false;

            for node in graph.nodes() {
                if executed.contains(&node.id) || !dependencies.is_ready(&node.id, &executed) {
                    continue;
                }

                let source = source_label(dependencies.dependencies_of(&node.id));
                let outputs = self.run_node(node, &source, &context, observer).await?;
                context.extend(outputs);
                executed.insert(node.id.clone());
                progressed = true;
            }

            if !progressed {
                let stuck: Vec<String> = graph
                    .nodes()
                    .iter()
                    .filter(|node| !executed.contains(&node.id))
                    .map(|node| node.id.clone())
                    .collect();
                CycleDetected { stuck: &stuck }.log();
                return Err(ExecutionError::Cycle { stuck });
            }
        }

        RunCompleted {
            graph_name: graph.name(),
            node_count: graph.len(),
            rounds,
            duration: run_start.elapsed(),
        }
        .log();

        Ok(context)
    }

    async fn run_node(
        &self,
        node: &Node,
        source: &str,
        context: &ArtifactContext,
        observer: &mut dyn RunObserver,
    ) -> Result<Outputs, ExecutionError> {
        let processor = self.registry.get(&node.processor_ref).ok_or_else(|| {
            ExecutionError::NodeExecution {
                node_id: node.id.clone(),
                elapsed_ms: 0,
                source: ProcessorError::failed(format!(
                    "processor '{}' is not registered",
                    node.processor_ref
                )),
            }
        })?;

        NodeStarted {
            node_id: &node.id,
            processor_ref: &node.processor_ref,
            source,
        }
        .log();
        observer.on_event(&RunEvent::NodeStarted {
            source,
            target: &node.id,
        })?;

        let start_time = Instant::now();
        let result = self.invoker.invoke(node, processor.as_ref(), context).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match result {
            Ok(outputs) => {
                for (kind, path) in declared_artifacts(node, &outputs) {
                    observer.on_event(&RunEvent::ArtifactProduced {
                        path: &path,
                        kind,
                    })?;
                }
                observer.on_event(&RunEvent::NodeCompleted { duration_ms })?;

                NodeCompleted {
                    node_id: &node.id,
                    output_count: outputs.len(),
                    duration_ms,
                }
                .log();
                Ok(outputs)
            }
            Err(error) => {
                let message = error.to_string();
                NodeFailed {
                    node_id: &node.id,
                    duration_ms,
                    error: &message,
                }
                .log();
                // The processor failure outranks a log write failure.
                if let Err(log_error) = observer.on_event(&RunEvent::NodeFailed {
                    duration_ms,
                    message: &message,
                }) {
                    FailureNotRecorded {
                        node_id: &node.id,
                        error: &log_error,
                    }
                    .log();
                }

                Err(ExecutionError::NodeExecution {
                    node_id: node.id.clone(),
                    elapsed_ms: duration_ms,
                    source: error,
                })
            }
        }
    }
}

/// Log label for the edge that led to a node: its prerequisites, or the run input.
fn source_label(dependencies: &[String]) -> String {
    if dependencies.is_empty() {
        ROOT_SOURCE.to_string()
    } else {
        dependencies.join(", ")
    }
}

/// Artifact records for the declared outputs a node actually produced.
///
/// Yields `(kind, path)` in declared order, where `kind` is the output key.
/// A string value is one path, an array of strings is one path per element,
/// and any other value is recorded as its JSON text.
fn declared_artifacts<'n>(node: &'n Node, outputs: &Outputs) -> Vec<(&'n str, String)> {
    let mut artifacts = Vec::new();

    for key in &node.output_artifacts {
        match outputs.get(key) {
            None => {}
            Some(Value::String(path)) => artifacts.push((key.as_str(), path.clone())),
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => {
                artifacts.extend(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|path| (key.as_str(), path.to_string())),
                );
            }
            Some(other) => artifacts.push((key.as_str(), other.to_string())),
        }
    }

    artifacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_label() {
        assert_eq!(source_label(&[]), "input");
        assert_eq!(source_label(&["a".to_string()]), "a");
        assert_eq!(source_label(&["a".to_string(), "b".to_string()]), "a, b");
    }

    #[test]
    fn test_declared_artifacts_table_driven() {
        struct TestCase {
            name: &'static str,
            outputs: Outputs,
            expected: Vec<(&'static str, &'static str)>,
        }

        let node = Node::new("n", "p").with_outputs(["topics_path", "posts"]);

        let test_cases = vec![
            TestCase {
                name: "nothing produced",
                outputs: Outputs::new(),
                expected: vec![],
            },
            TestCase {
                name: "string path",
                outputs: Outputs::from([("topics_path".to_string(), json!("t.json"))]),
                expected: vec![("topics_path", "t.json")],
            },
            TestCase {
                name: "array of paths in declared order",
                outputs: Outputs::from([
                    ("posts".to_string(), json!(["a.md", "b.md"])),
                    ("topics_path".to_string(), json!("t.json")),
                ]),
                expected: vec![("topics_path", "t.json"), ("posts", "a.md"), ("posts", "b.md")],
            },
            TestCase {
                name: "undeclared output ignored",
                outputs: Outputs::from([("scratch".to_string(), json!("tmp"))]),
                expected: vec![],
            },
            TestCase {
                name: "non-path value as json",
                outputs: Outputs::from([("posts".to_string(), json!({"count": 2}))]),
                expected: vec![("posts", r#"{"count":2}"#)],
            },
        ];

        for case in test_cases {
            let actual = declared_artifacts(&node, &case.outputs);
            let actual: Vec<(&str, &str)> = actual.iter().map(|(k, p)| (*k, p.as_str())).collect();
            assert_eq!(actual, case.expected, "case '{}'", case.name);
        }
    }
}
