// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph model: nodes, edges, and the validated [`Graph`] that owns them.
//!
//! A [`Graph`] can only be obtained through validation, either from
//! [`Graph::new`] or by deserializing a [`GraphDocument`]. Once built it is
//! read-only. Cycles are not checked here; the executor detects them while
//! scheduling so that cyclic and otherwise stuck graphs fail the same way.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::consts::DEFAULT_GRAPH_NAME;
use crate::errors::ValidationErrors;
use crate::graph::validation::validate_graph_structure;

/// One pipeline step.
///
/// # Example
/// ```json
/// {
///   "id": "apply_aida",
///   "name": "Apply AIDA Format",
///   "description": "Apply AIDA format to top-ranked topics",
///   "processor_ref": "aida_formatter",
///   "input_artifacts": ["ranked_topics_path"],
///   "output_artifacts": ["aida_content_path"],
///   "parameters": {"top_n": 3}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Registry identifier of the processor implementing this step
    #[serde(alias = "processor_function")]
    pub processor_ref: String,
    /// Context keys passed to the processor when present
    #[serde(default)]
    pub input_artifacts: Vec<String>,
    /// Keys the step is expected to produce; recorded in the run log only
    #[serde(default)]
    pub output_artifacts: Vec<String>,
    /// Static arguments merged into every call, overriding context values
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    /// Forward the run's outputs directory even though it is not a declared input
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_outputs_dir: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Node {
    pub fn new(id: impl Into<String>, processor_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            processor_ref: processor_ref.into(),
            input_artifacts: Vec::new(),
            output_artifacts: Vec::new(),
            parameters: BTreeMap::new(),
            requires_outputs_dir: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.name = name.into();
        self.description = description.into();
        self
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_artifacts = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_artifacts = outputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn requiring_outputs_dir(mut self) -> Self {
        self.requires_outputs_dir = true;
        self
    }
}

/// Declared dependency: `target_node_id` runs after `source_node_id`.
///
/// `condition` is carried through load/save but never evaluated; every edge
/// is always traversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source_node_id: String,
    pub target_node_id: String,
    #[serde(default)]
    pub condition: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_node_id: source.into(),
            target_node_id: target.into(),
            condition: String::new(),
        }
    }
}

/// Serialized shape of a graph file, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_graph_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn default_graph_name() -> String {
    DEFAULT_GRAPH_NAME.to_string()
}

/// A validated processing graph.
///
/// Node order is significant: when several nodes become runnable at the same
/// time, the one declared first runs first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct Graph {
    name: String,
    description: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Build a graph, rejecting duplicate node ids and edges to unknown nodes.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Result<Self, ValidationErrors> {
        validate_graph_structure(&nodes, &edges)?;

        Ok(Self {
            name: name.into(),
            description: description.into(),
            nodes,
            edges,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Nodes in declared order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl TryFrom<GraphDocument> for Graph {
    type Error = ValidationErrors;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        Graph::new(doc.name, doc.description, doc.nodes, doc.edges)
    }
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        Self {
            name: graph.name,
            description: graph.description,
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}
