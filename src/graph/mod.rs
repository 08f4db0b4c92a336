// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod default;
mod dependency_graph;
pub mod io;
pub mod model;
mod validation;

pub use default::create_default_graph;
pub use dependency_graph::DependencyGraph;
pub use io::{load_and_validate_graph, load_graph, save_graph};
pub use model::{Edge, Graph, GraphDocument, Node};
pub use validation::{validate_graph_structure, validate_processor_refs};
