// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The built-in content flywheel pipeline: meeting transcript in, social
//! media content out.

use crate::graph::model::{Edge, Graph, Node};

/// Create the default five-step content flywheel graph.
///
/// ```text
/// extract_metadata -> generate_topics -> rank_topics -> apply_aida -> create_social
/// ```
pub fn create_default_graph() -> Graph {
    let nodes = vec![
        Node::new("extract_metadata", "extract_metadata")
            .named(
                "Extract Meeting Metadata",
                "Extract metadata from meeting transcript",
            )
            .with_inputs(["transcript_path"])
            .with_outputs(["metadata_path"]),
        Node::new("generate_topics", "generate_topics")
            .named(
                "Generate Topic Ideas",
                "Generate topic ideas from meeting metadata",
            )
            .with_inputs(["metadata_path", "transcript_path"])
            .with_outputs(["topics_path"]),
        Node::new("rank_topics", "rank_topics")
            .named("Rank Topics by Potential", "Rank topics using the Value Equation")
            .with_inputs(["topics_path"])
            .with_outputs(["ranked_topics_path"]),
        Node::new("apply_aida", "apply_aida_format")
            .named("Apply AIDA Format", "Apply AIDA format to top-ranked topics")
            .with_inputs(["ranked_topics_path"])
            .with_outputs(["aida_content_path"])
            .with_parameter("top_n", 3),
        Node::new("create_social", "create_social_content")
            .named(
                "Create Social Media Content",
                "Create social media content variations",
            )
            .with_inputs(["aida_content_path"])
            .with_outputs(["social_content_paths"])
            .requiring_outputs_dir(),
    ];

    let edges = vec![
        Edge::new("extract_metadata", "generate_topics"),
        Edge::new("generate_topics", "rank_topics"),
        Edge::new("rank_topics", "apply_aida"),
        Edge::new("apply_aida", "create_social"),
    ];

    // Static definition; ids are unique and every edge endpoint exists.
    match Graph::new(
        "Content Flywheel",
        "Transform meeting transcripts into valuable content assets",
        nodes,
        edges,
    ) {
        Ok(graph) => graph,
        Err(errors) => unreachable!("default graph is invalid: {errors}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyGraph;

    #[test]
    fn test_default_graph_shape() {
        let graph = create_default_graph();

        assert_eq!(graph.name(), "Content Flywheel");
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.edges().len(), 4);

        let deps = DependencyGraph::from_graph(&graph);
        assert_eq!(deps.entry_points(&graph), vec!["extract_metadata"]);

        let social = graph.node("create_social").unwrap();
        assert!(social.requires_outputs_dir);
        assert_eq!(
            graph.node("apply_aida").unwrap().parameters.get("top_n"),
            Some(&serde_json::json!(3))
        );
    }
}
