// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON load/save for graph files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProcessorRegistry;
use crate::errors::{ExecutionError, GraphLoadError, PersistenceError};
use crate::graph::model::{Graph, GraphDocument};
use crate::graph::validation::validate_processor_refs;

/// Load a graph from a JSON file.
///
/// The file is parsed as a [`GraphDocument`] first and then validated, so an
/// unreadable or malformed file is a [`GraphLoadError::Persistence`] while a
/// well-formed file with duplicate node ids or dangling edges is a
/// [`GraphLoadError::Validation`] naming every problem.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph, GraphLoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    let document: GraphDocument =
        serde_json::from_str(&content).map_err(|e| PersistenceError::json(path, e))?;
    Ok(Graph::try_from(document)?)
}

/// Load a graph and check its processor references against `registry`.
pub fn load_and_validate_graph<P: AsRef<Path>>(
    path: P,
    registry: &ProcessorRegistry,
) -> Result<Graph, ExecutionError> {
    let graph = load_graph(path)?;
    validate_processor_refs(&graph, registry)?;
    Ok(graph)
}

/// Save a graph as pretty-printed JSON, creating parent directories.
pub fn save_graph<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<PathBuf, PersistenceError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(graph).map_err(|e| PersistenceError::json(path, e))?;
    fs::write(path, json).map_err(|e| PersistenceError::io(path, e))?;

    Ok(path.to_path_buf())
}
