// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run-scoped artifact store shared by every node of a graph run.
//!
//! The context is seeded by the caller (run directories, input paths), then
//! grown by each node's outputs. Writes are last-write-wins: whatever a node
//! sets is what every later node sees, including overwrites of seed entries.
//! The executor owns the context for the duration of a run and hands it back
//! when the run ends.

use serde_json::Value;
use std::collections::BTreeMap;

/// Typed key/value store threaded through graph execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactContext(BTreeMap<String, Value>);

impl ArtifactContext {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get the value under `key` if it is a JSON string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Store `value` under `key`, returning whatever it replaced
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Merge a batch of outputs; later writes replace earlier ones.
    pub fn extend<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in entries {
            self.0.insert(key.into(), value);
        }
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

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl From<BTreeMap<String, Value>> for ArtifactContext {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ArtifactContext {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}
