// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::consts::ARTIFACTS_DIR_KEY;
use crate::errors::ProcessorError;
use crate::traits::{Arguments, Outputs, Processor};

/// Write JSON processor - persists its arguments as a JSON artifact.
///
/// Requires `artifacts_dir` among its arguments. Every other argument is
/// written to `<artifacts_dir>/<file_name>` as a pretty-printed JSON object,
/// and the file's path is returned under `output_key`.
pub struct WriteJsonProcessor {
    id: String,
    file_name: String,
    output_key: String,
}

impl WriteJsonProcessor {
    pub fn new(id: impl Into<String>, file_name: impl Into<String>, output_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            output_key: output_key.into(),
        }
    }
}

#[async_trait]
impl Processor for WriteJsonProcessor {
    async fn process(&self, args: Arguments) -> Result<Outputs, ProcessorError> {
        let artifacts_dir = PathBuf::from(args.require_str(ARTIFACTS_DIR_KEY)?);
        let path = artifacts_dir.join(&self.file_name);

        let body: serde_json::Map<String, Value> = args
            .into_inner()
            .into_iter()
            .filter(|(name, _)| name != ARTIFACTS_DIR_KEY)
            .collect();

        let bytes = serde_json::to_vec_pretty(&Value::Object(body))
            .map_err(|e| ProcessorError::failed(format!("failed to encode arguments: {}", e)))?;

        tokio::fs::create_dir_all(&artifacts_dir).await.map_err(|e| {
            ProcessorError::failed(format!("failed to create {}: {}", artifacts_dir.display(), e))
        })?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ProcessorError::failed(format!("failed to write {}: {}", path.display(), e)))?;

        Ok(Outputs::from([(
            self.output_key.clone(),
            Value::String(path.to_string_lossy().into_owned()),
        )]))
    }

    fn name(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_arguments_to_artifacts_dir() {
        let dir = TempDir::new().unwrap();
        let processor = WriteJsonProcessor::new("save", "topics.json", "topics_path");

        let mut args = Arguments::new();
        args.insert("artifacts_dir", json!(dir.path().to_string_lossy()));
        args.insert("topics", json!(["rust", "graphs"]));

        let outputs = processor.process(args).await.unwrap();
        let written = outputs.get("topics_path").and_then(Value::as_str).unwrap();
        assert_eq!(PathBuf::from(written), dir.path().join("topics.json"));

        let content: Value = serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(content, json!({"topics": ["rust", "graphs"]}));
    }

    #[tokio::test]
    async fn test_missing_artifacts_dir_fails() {
        let processor = WriteJsonProcessor::new("save", "out.json", "out_path");
        let err = processor.process(Arguments::new()).await.unwrap_err();
        assert!(matches!(err, ProcessorError::MissingArgument { ref name } if name == "artifacts_dir"));
    }
}
