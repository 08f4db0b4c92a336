// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation for processing graphs.
//!
//! Two checks run when a graph is built:
//!
//! 1. **Uniqueness**: every node id appears once
//! 2. **Reference**: both endpoints of every edge name an existing node
//!
//! Errors are accumulated so every problem in a graph file is reported at
//! once. A third check, [`validate_processor_refs`], runs against a processor
//! registry before execution so an unknown processor is rejected before any
//! node runs.
//!
//! Acyclicity is deliberately not validated here. See
//! [`crate::engine::GraphExecutor`] for how cycles surface.

use std::collections::HashSet;

use crate::config::ProcessorRegistry;
use crate::errors::{ValidationError, ValidationErrors};
use crate::graph::model::{Edge, Graph, Node};
use crate::observability::messages::validation::{
    DuplicateNodeId, UnknownEdgeEndpoint, UnknownProcessor, ValidationCompleted,
    ValidationFailed,
};
use crate::observability::messages::StructuredLog;

/// Validate node uniqueness and edge references.
///
/// **Time Complexity**: O(V + E)
pub fn validate_graph_structure(nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    errors.extend(validate_unique_node_ids(nodes));
    errors.extend(validate_edge_references(nodes, edges));

    finish(nodes.len(), errors)
}

/// Validate that every node's `processor_ref` is registered.
pub fn validate_processor_refs(
    graph: &Graph,
    registry: &ProcessorRegistry,
) -> Result<(), ValidationErrors> {
    let errors: Vec<ValidationError> = graph
        .nodes()
        .iter()
        .filter(|node| !registry.contains_key(&node.processor_ref))
        .map(|node| {
            UnknownProcessor {
                node_id: &node.id,
                processor_ref: &node.processor_ref,
            }
            .log();

            ValidationError::UnknownProcessor {
                node_id: node.id.clone(),
                processor_ref: node.processor_ref.clone(),
            }
        })
        .collect();

    finish(graph.len(), errors)
}

fn finish(node_count: usize, errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
    let result = ValidationErrors::from(errors).into_result();
    match &result {
        Ok(()) => ValidationCompleted { node_count }.log(),
        Err(errors) => ValidationFailed {
            error_count: errors.len(),
        }
        .log(),
    }
    result
}

fn validate_unique_node_ids(nodes: &[Node]) -> Vec<ValidationError> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for node in nodes {
        if !seen_ids.insert(node.id.as_str()) {
            DuplicateNodeId { node_id: &node.id }.log();
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }

    errors
}

fn validate_edge_references(nodes: &[Node], edges: &[Edge]) -> Vec<ValidationError> {
    let node_ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut errors = Vec::new();

    for edge in edges {
        for endpoint in [&edge.source_node_id, &edge.target_node_id] {
            if !node_ids.contains(endpoint.as_str()) {
                UnknownEdgeEndpoint {
                    source_id: &edge.source_node_id,
                    target_id: &edge.target_node_id,
                    missing_id: endpoint,
                }
                .log();

                errors.push(ValidationError::UnknownEdgeEndpoint {
                    source_id: edge.source_node_id.clone(),
                    target_id: edge.target_node_id.clone(),
                    missing_id: endpoint.clone(),
                });
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::FnProcessor;
    use std::sync::Arc;

    #[test]
    fn test_validate_graph_structure_table_driven() {
        struct TestCase {
            name: &'static str,
            nodes: Vec<Node>,
            edges: Vec<Edge>,
            expected_errors: usize,
        }

        let test_cases = vec![
            TestCase {
                name: "empty graph",
                nodes: vec![],
                edges: vec![],
                expected_errors: 0,
            },
            TestCase {
                name: "linear chain",
                nodes: vec![Node::new("a", "p"), Node::new("b", "p"), Node::new("c", "p")],
                edges: vec![Edge::new("a", "b"), Edge::new("b", "c")],
                expected_errors: 0,
            },
            TestCase {
                name: "cycle is structurally valid",
                nodes: vec![Node::new("a", "p"), Node::new("b", "p")],
                edges: vec![Edge::new("a", "b"), Edge::new("b", "a")],
                expected_errors: 0,
            },
            TestCase {
                name: "duplicate ids",
                nodes: vec![Node::new("a", "p"), Node::new("a", "p"), Node::new("a", "p")],
                edges: vec![],
                expected_errors: 2,
            },
            TestCase {
                name: "both endpoints unknown",
                nodes: vec![Node::new("a", "p")],
                edges: vec![Edge::new("x", "y")],
                expected_errors: 2,
            },
        ];

        for case in test_cases {
            let result = validate_graph_structure(&case.nodes, &case.edges);
            let actual = result.err().map(|e| e.len()).unwrap_or(0);
            assert_eq!(actual, case.expected_errors, "case '{}'", case.name);
        }
    }

    #[test]
    fn test_validate_processor_refs() {
        let graph = Graph::new(
            "refs",
            "",
            vec![Node::new("a", "known"), Node::new("b", "unknown")],
            vec![],
        )
        .unwrap();

        let mut registry = ProcessorRegistry::new();
        registry.insert(
            "known".to_string(),
            Arc::new(FnProcessor::new("known", |_| Ok(Default::default()))),
        );

        let errors = validate_processor_refs(&graph, &registry).unwrap_err();
        assert_eq!(
            errors.0,
            vec![ValidationError::UnknownProcessor {
                node_id: "b".to_string(),
                processor_ref: "unknown".to_string(),
            }]
        );
    }
}
