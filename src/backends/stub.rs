// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test processors for exercising the executor without real work.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use crate::errors::ProcessorError;
use crate::traits::{Arguments, Outputs, Processor};

/// A processor that records every invocation and returns fixed outputs
pub struct StubProcessor {
    pub id: String,
    outputs: Outputs,
    calls: Arc<Mutex<Vec<(String, Arguments)>>>,
}

impl StubProcessor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outputs: Outputs::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `value` under `key` on every call
    pub fn with_output(mut self, key: &str, value: Value) -> Self {
        self.outputs.insert(key.to_string(), value);
        self
    }

    /// Share a call journal with other stubs to observe execution order
    pub fn with_journal(mut self, calls: Arc<Mutex<Vec<(String, Arguments)>>>) -> Self {
        self.calls = calls;
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<(String, Arguments)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Processor for StubProcessor {
    async fn process(&self, args: Arguments) -> Result<Outputs, ProcessorError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((self.id.clone(), args));
        }
        Ok(self.outputs.clone())
    }

    fn name(&self) -> &str {
        &self.id
    }
}

/// A processor that always fails for testing failure scenarios
pub struct FailingProcessor {
    pub id: String,
}

impl FailingProcessor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Processor for FailingProcessor {
    async fn process(&self, _args: Arguments) -> Result<Outputs, ProcessorError> {
        Err(ProcessorError::failed("Simulated processor failure"))
    }

    fn name(&self) -> &str {
        &self.id
    }
}

/// A processor that returns one string output per declared key, named after itself
pub fn path_output(id: &str, key: &str) -> StubProcessor {
    StubProcessor::new(id).with_output(key, json!(format!("{}/{}.json", id, key)))
}
