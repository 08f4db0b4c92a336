// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::ProcessorError;

/// Named outputs returned by a processor, merged verbatim into the run context.
pub type Outputs = BTreeMap<String, Value>;

/// Named-argument bag handed to a processor for one invocation.
///
/// Built by the step invoker from ambient context keys, the node's declared
/// inputs and its static parameters. Inputs missing from the context are simply
/// absent here; processors decide their own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Get a string argument the processor cannot run without.
    pub fn require_str(&self, name: &str) -> Result<&str, ProcessorError> {
        match self.0.get(name) {
            None => Err(ProcessorError::MissingArgument {
                name: name.to_string(),
            }),
            Some(value) => value.as_str().ok_or_else(|| ProcessorError::InvalidArgument {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl From<BTreeMap<String, Value>> for Arguments {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

/// A pipeline step implementation.
///
/// Accepts a named-argument bag and returns a named-output bag. Errors are
/// fatal for the run that invoked the processor.
#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, args: Arguments) -> Result<Outputs, ProcessorError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str() {
        let mut args = Arguments::new();
        args.insert("metadata_path", json!("a/metadata.json"));
        args.insert("top_n", json!(3));

        assert_eq!(args.require_str("metadata_path").unwrap(), "a/metadata.json");
        assert!(matches!(
            args.require_str("top_n"),
            Err(ProcessorError::InvalidArgument { expected: "a string", .. })
        ));
        assert!(matches!(
            args.require_str("transcript_path"),
            Err(ProcessorError::MissingArgument { name }) if name == "transcript_path"
        ));
    }
}
