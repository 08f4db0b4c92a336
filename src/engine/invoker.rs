// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{ARTIFACTS_DIR_KEY, OUTPUTS_DIR_KEY};
use crate::config::AmbientConfig;
use crate::context::ArtifactContext;
use crate::errors::ProcessorError;
use crate::graph::Node;
use crate::observability::messages::engine::ArgumentsBound;
use crate::observability::messages::StructuredLog;
use crate::traits::{Arguments, Outputs, Processor};

/// Context keys forwarded to processors without being declared as inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbientKeys {
    /// Forwarded to every node when present in the context
    pub shared: Vec<String>,
    /// Forwarded only to nodes with `requires_outputs_dir`
    pub outputs_dir: String,
}

impl Default for AmbientKeys {
    fn default() -> Self {
        Self {
            shared: vec![ARTIFACTS_DIR_KEY.to_string()],
            outputs_dir: OUTPUTS_DIR_KEY.to_string(),
        }
    }
}

impl From<&AmbientConfig> for AmbientKeys {
    fn from(config: &AmbientConfig) -> Self {
        Self {
            shared: config.shared.clone(),
            outputs_dir: config.outputs_dir.clone(),
        }
    }
}

/// Binds a node's arguments from the run context and calls its processor.
///
/// Arguments are assembled in three layers, each overriding the one before:
/// 1. ambient keys present in the context
/// 2. the node's `input_artifacts` present in the context, under the same name
/// 3. the node's static `parameters`
///
/// Inputs absent from the context are left out rather than reported; the
/// processor decides whether it can run without them.
#[derive(Debug, Clone, Default)]
pub struct StepInvoker {
    ambient: AmbientKeys,
}

impl StepInvoker {
    pub fn new(ambient: AmbientKeys) -> Self {
        Self { ambient }
    }

    pub fn ambient(&self) -> &AmbientKeys {
        &self.ambient
    }

    pub fn bind(&self, node: &Node, context: &ArtifactContext) -> Arguments {
        let mut args = Arguments::new();

        let outputs_dir = node
            .requires_outputs_dir
            .then_some(&self.ambient.outputs_dir);

        for key in self.ambient.shared.iter().chain(outputs_dir) {
            if let Some(value) = context.get(key) {
                args.insert(key.clone(), value.clone());
            }
        }

        for input in &node.input_artifacts {
            if let Some(value) = context.get(input) {
                args.insert(input.clone(), value.clone());
            }
        }

        for (name, value) in &node.parameters {
            args.insert(name.clone(), value.clone());
        }

        args
    }

    /// Bind arguments for `node` and await `processor` with them.
    pub async fn invoke(
        &self,
        node: &Node,
        processor: &dyn Processor,
        context: &ArtifactContext,
    ) -> Result<Outputs, ProcessorError> {
        let args = self.bind(node, context);

        let argument_names: Vec<&str> = args.names().map(String::as_str).collect();
        ArgumentsBound {
            node_id: &node.id,
            argument_names: &argument_names,
        }
        .log();

        processor.process(args).await
    }
}
