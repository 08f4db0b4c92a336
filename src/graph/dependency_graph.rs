// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use crate::graph::model::Graph;

/// Newtype wrapper mapping each node id to the ids it depends on.
///
/// Every node of the source graph has an entry; an empty list means the node
/// has no prerequisites. Dependencies keep edge declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph(pub HashMap<String, Vec<String>>);

impl DependencyGraph {
    /// Build the dependency map from a graph's edges
    pub fn from_graph(graph: &Graph) -> Self {
        let mut map: HashMap<String, Vec<String>> = graph
            .nodes()
            .iter()
            .map(|node| (node.id.clone(), Vec::new()))
            .collect();

        for edge in graph.edges() {
            let dependencies = map.entry(edge.target_node_id.clone()).or_default();
            if !dependencies.contains(&edge.source_node_id) {
                dependencies.push(edge.source_node_id.clone());
            }
        }

        Self(map)
    }

    /// Prerequisites of a node, empty when it has none or is unknown
    pub fn dependencies_of(&self, node_id: &str) -> &[String] {
        self.0.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when every prerequisite of `node_id` is in `executed`
    pub fn is_ready(&self, node_id: &str, executed: &HashSet<String>) -> bool {
        self.dependencies_of(node_id)
            .iter()
            .all(|dependency| executed.contains(dependency))
    }

    /// Nodes with no prerequisites, in the graph's declared order
    pub fn entry_points<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        graph
            .nodes()
            .iter()
            .filter(|node| self.dependencies_of(&node.id).is_empty())
            .map(|node| node.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::{Edge, Node};

    fn diamond() -> Graph {
        Graph::new(
            "diamond",
            "",
            vec![
                Node::new("d", "p"),
                Node::new("b", "p"),
                Node::new("a", "p"),
                Node::new("c", "p"),
            ],
            vec![
                Edge::new("a", "b"),
                Edge::new("a", "c"),
                Edge::new("b", "d"),
                Edge::new("c", "d"),
                Edge::new("c", "d"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_graph() {
        let deps = DependencyGraph::from_graph(&diamond());

        assert_eq!(deps.0.len(), 4);
        assert!(deps.dependencies_of("a").is_empty());
        assert_eq!(deps.dependencies_of("b"), ["a".to_string()]);
        assert_eq!(deps.dependencies_of("d"), ["b".to_string(), "c".to_string()]);
        assert!(deps.dependencies_of("unknown").is_empty());
    }

    #[test]
    fn test_is_ready() {
        let deps = DependencyGraph::from_graph(&diamond());
        let mut executed = HashSet::new();

        assert!(deps.is_ready("a", &executed));
        assert!(!deps.is_ready("b", &executed));

        executed.insert("a".to_string());
        executed.insert("b".to_string());
        assert!(!deps.is_ready("d", &executed));

        executed.insert("c".to_string());
        assert!(deps.is_ready("d", &executed));
    }

    #[test]
    fn test_entry_points_follow_declared_order() {
        let graph = Graph::new(
            "two roots",
            "",
            vec![Node::new("z", "p"), Node::new("m", "p"), Node::new("a", "p")],
            vec![Edge::new("z", "m")],
        )
        .unwrap();

        let deps = DependencyGraph::from_graph(&graph);
        assert_eq!(deps.entry_points(&graph), vec!["z", "a"]);
    }
}
