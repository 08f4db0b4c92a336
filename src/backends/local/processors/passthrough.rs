// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::errors::ProcessorError;
use crate::observability::messages::{processor::ProcessorCompleted, StructuredLog};
use crate::traits::{Arguments, Outputs, Processor};

/// Passthrough processor - returns its arguments as outputs.
///
/// An optional rename map turns argument names into different output names,
/// which lets a graph adapt one node's outputs to another node's inputs
/// without an external step. Arguments not named in the map keep their name.
pub struct PassthroughProcessor {
    id: String,
    rename: BTreeMap<String, String>,
}

impl PassthroughProcessor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rename: BTreeMap::new(),
        }
    }

    pub fn with_rename(mut self, rename: BTreeMap<String, String>) -> Self {
        self.rename = rename;
        self
    }
}

#[async_trait]
impl Processor for PassthroughProcessor {
    async fn process(&self, args: Arguments) -> Result<Outputs, ProcessorError> {
        let start_time = Instant::now();

        let outputs: Outputs = args
            .into_inner()
            .into_iter()
            .map(|(name, value)| match self.rename.get(&name) {
                Some(renamed) => (renamed.clone(), value),
                None => (name, value),
            })
            .collect();

        ProcessorCompleted {
            processor_id: &self.id,
            output_count: outputs.len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(outputs)
    }

    fn name(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_passthrough_table_driven() {
        struct TestCase {
            name: &'static str,
            rename: Vec<(&'static str, &'static str)>,
            expected_keys: Vec<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "no rename",
                rename: vec![],
                expected_keys: vec!["artifacts_dir", "transcript_path"],
            },
            TestCase {
                name: "rename one argument",
                rename: vec![("transcript_path", "notes_path")],
                expected_keys: vec!["artifacts_dir", "notes_path"],
            },
            TestCase {
                name: "rename of absent argument is ignored",
                rename: vec![("missing", "other")],
                expected_keys: vec!["artifacts_dir", "transcript_path"],
            },
        ];

        for case in test_cases {
            let rename = case
                .rename
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect();
            let processor = PassthroughProcessor::new("echo").with_rename(rename);

            let mut args = Arguments::new();
            args.insert("transcript_path", json!("meeting.txt"));
            args.insert("artifacts_dir", json!("run/artifacts"));

            let outputs = processor.process(args).await.unwrap();
            let keys: Vec<&str> = outputs.keys().map(String::as_str).collect();
            assert_eq!(keys, case.expected_keys, "case '{}'", case.name);
        }
    }

    #[tokio::test]
    async fn test_passthrough_preserves_values() {
        let processor = PassthroughProcessor::new("echo");
        let mut args = Arguments::new();
        args.insert("top_n", json!(3));

        let outputs = processor.process(args).await.unwrap();
        assert_eq!(outputs.get("top_n"), Some(&json!(3)));
    }
}
