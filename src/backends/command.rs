// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processors backed by an external program.
//!
//! The program receives the invocation's arguments as one JSON object on
//! stdin and must print one JSON object on stdout; that object's members are
//! the processor's outputs. A non-zero exit status is a processor failure
//! carrying the program's stderr.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::Instrument;

use crate::config::{BackendType, ProcessorConfig};
use crate::errors::{ProcessorError, ProcessorMapError};
use crate::observability::messages::processor::{CommandSpawned, ProcessorCompleted, ProcessorFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::{Arguments, Outputs, Processor};

pub struct CommandProcessor {
    id: String,
    command: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    working_dir: Option<PathBuf>,
}

impl CommandProcessor {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            working_dir: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_working_dir(mut self, working_dir: Option<PathBuf>) -> Self {
        self.working_dir = working_dir;
        self
    }

    /// Build from a `type: command` processor entry.
    pub fn from_config(config: &ProcessorConfig) -> Result<Self, ProcessorMapError> {
        let command = config
            .command
            .clone()
            .ok_or_else(|| ProcessorMapError::MissingField {
                processor_id: config.id.clone(),
                backend: BackendType::Command,
                field: "command",
            })?;

        Ok(Self::new(config.id.clone(), command)
            .with_args(config.args.clone())
            .with_env(config.env.clone())
            .with_working_dir(config.working_dir.clone()))
    }

    async fn run(&self, args: Arguments) -> Result<Outputs, ProcessorError> {
        let input = serde_json::to_vec(&args.into_inner()).map_err(|e| ProcessorError::InvalidOutput {
            command: self.command.clone(),
            reason: format!("arguments are not serializable: {}", e),
        })?;

        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let spawn_error = |source: std::io::Error| ProcessorError::Spawn {
            command: self.command.clone(),
            source,
        };

        let mut child = command.spawn().map_err(spawn_error)?;
        let stdin = child.stdin.take();
        // Stdin is fed while stdout and stderr drain, so neither side can fill a pipe and stall.
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            // A program that never reads stdin closes the pipe early; that is not a failure.
            match stdin.write_all(&input).await {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            }
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(spawn_error)?;
        fed.map_err(spawn_error)?;
        if !output.status.success() {
            return Err(ProcessorError::CommandFailed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_outputs(&self.command, &output.stdout)
    }
}

fn parse_outputs(command: &str, stdout: &[u8]) -> Result<Outputs, ProcessorError> {
    let invalid = |reason: String| ProcessorError::InvalidOutput {
        command: command.to_string(),
        reason,
    };

    match serde_json::from_slice::<Value>(stdout) {
        Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(invalid(format!("expected a JSON object, got {}", type_name(&other)))),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Processor for CommandProcessor {
    async fn process(&self, args: Arguments) -> Result<Outputs, ProcessorError> {
        let spawned = CommandSpawned {
            processor_id: &self.id,
            command: &self.command,
            argument_count: args.len(),
        };
        spawned.log();

        let start_time = Instant::now();
        let result = self.run(args).instrument(spawned.span("command_processor")).await;

        match &result {
            Ok(outputs) => ProcessorCompleted {
                processor_id: &self.id,
                output_count: outputs.len(),
                duration: start_time.elapsed(),
            }
            .log(),
            Err(e) => ProcessorFailed {
                processor_id: &self.id,
                error: e,
            }
            .log(),
        }

        result
    }

    fn name(&self) -> &str {
        &self.id
    }
}
