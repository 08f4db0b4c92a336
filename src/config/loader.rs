// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::{ARTIFACTS_DIR_KEY, OUTPUTS_DIR_KEY};
use crate::errors::{ConfigError, PersistenceError, ProcessorMapError};

/// Run configuration for the flywheel engine.
///
/// Describes which processors exist and how context keys are forwarded to
/// them. The graph itself lives in a separate JSON file; this file only
/// populates the processor registry that the graph's `processor_ref`s are
/// resolved against.
///
/// # Fields
/// * `logs_dir` - Where the run log is written, relative to the run directory (optional)
/// * `ambient` - Context keys forwarded to nodes regardless of their inputs (optional)
/// * `processors` - Processor definitions, keyed by id
///
/// # Example
/// ```yaml
/// logs_dir: logs
/// ambient:
///   shared: [artifacts_dir]
///   outputs_dir: outputs_dir
/// processors:
///   - id: extract_metadata
///     type: command
///     command: python3
///     args: [scripts/extract_metadata.py]
///   - id: passthrough
///     type: local
///     impl_: passthrough
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub logs_dir: Option<PathBuf>,
    #[serde(default)]
    pub ambient: AmbientConfig,
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
}

/// Context keys forwarded to nodes without being declared as inputs.
///
/// # Fields
/// * `shared` - Forwarded to every node when present in the context
/// * `outputs_dir` - Forwarded only to nodes with `requires_outputs_dir`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmbientConfig {
    #[serde(default = "default_shared_keys")]
    pub shared: Vec<String>,
    #[serde(default = "default_outputs_dir_key")]
    pub outputs_dir: String,
}

fn default_shared_keys() -> Vec<String> {
    vec![ARTIFACTS_DIR_KEY.to_string()]
}

fn default_outputs_dir_key() -> String {
    OUTPUTS_DIR_KEY.to_string()
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            shared: default_shared_keys(),
            outputs_dir: default_outputs_dir_key(),
        }
    }
}

/// Configuration for a single processor.
///
/// # Fields
/// * `id` - Identifier that graph nodes reference through `processor_ref`
/// * `backend` - How the processor is implemented
/// * `impl_` - Built-in implementation name (for local)
/// * `command` - Program to run (for command)
/// * `args` - Program arguments (for command)
/// * `env` - Extra environment variables (for command)
/// * `working_dir` - Working directory (for command, optional)
/// * `options` - Implementation-specific options
///
/// # Example
/// ```yaml
/// id: "rank_topics"
/// type: command
/// command: python3
/// args: ["-m", "notegold.rank_topics"]
/// env:
///   MODEL: gpt-4o
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub backend: BackendType,
    pub impl_: Option<String>, // for local
    pub command: Option<String>, // for command
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>, // processor-specific options
}

/// Backend implementation type for processors.
///
/// # Variants
/// * `Local` - Built-in, in-process implementation
/// * `Command` - External program speaking JSON over stdin/stdout
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    Local,
    Command,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Local => "local",
            BackendType::Command => "command",
        }
    }
}

/// Load a run configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, PersistenceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    serde_yaml::from_str(&content).map_err(|e| PersistenceError::yaml(path, e))
}

/// Load and validate a run configuration from a YAML file
///
/// Validation checks processor ids are unique and each backend has the
/// fields it needs, so a broken config fails before any graph is loaded.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

/// Check processor ids and backend-specific required fields.
pub fn validate_config(cfg: &RunConfig) -> Result<(), Vec<ProcessorMapError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for processor in &cfg.processors {
        if !seen_ids.insert(processor.id.as_str()) {
            errors.push(ProcessorMapError::DuplicateProcessorId {
                processor_id: processor.id.clone(),
            });
        }

        let missing = match processor.backend {
            BackendType::Local if processor.impl_.is_none() => Some("impl_"),
            BackendType::Command if processor.command.is_none() => Some("command"),
            _ => None,
        };
        if let Some(field) = missing {
            errors.push(ProcessorMapError::MissingField {
                processor_id: processor.id.clone(),
                backend: processor.backend,
                field,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
logs_dir: audit
processors:
  - id: echo
    type: local
    impl_: passthrough
  - id: extract_metadata
    type: command
    command: python3
    args: [scripts/extract_metadata.py, --fast]
    env:
      MODEL: gpt-4o
"#;

        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.logs_dir, Some(PathBuf::from("audit")));
        assert_eq!(cfg.processors.len(), 2);
        assert_eq!(cfg.processors[0].backend, BackendType::Local);
        assert_eq!(cfg.processors[1].command.as_deref(), Some("python3"));
        assert_eq!(cfg.processors[1].args, vec!["scripts/extract_metadata.py", "--fast"]);
        assert_eq!(cfg.processors[1].env.get("MODEL").map(String::as_str), Some("gpt-4o"));
    }

    #[test]
    fn test_ambient_defaults() {
        let cfg: RunConfig = serde_yaml::from_str("processors: []").unwrap();
        assert_eq!(cfg.ambient, AmbientConfig::default());
        assert_eq!(cfg.ambient.shared, vec!["artifacts_dir"]);
        assert_eq!(cfg.ambient.outputs_dir, "outputs_dir");
        assert!(cfg.logs_dir.is_none());
    }

    #[test]
    fn test_ambient_partial_override() {
        let yaml = r#"
ambient:
  shared: [artifacts_dir, metadata_dir]
"#;
        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.ambient.shared, vec!["artifacts_dir", "metadata_dir"]);
        assert_eq!(cfg.ambient.outputs_dir, "outputs_dir");
    }

    #[test]
    fn test_parse_processor_with_options() {
        let yaml = r#"
processors:
  - id: rename
    type: local
    impl_: passthrough
    options:
      rename:
        transcript_path: notes_path
"#;

        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.processors[0].options.contains_key("rename"));
    }

    #[test]
    fn test_validate_config_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected_errors: usize,
        }

        let test_cases = vec![
            TestCase {
                name: "valid",
                yaml: "processors:\n  - {id: a, type: local, impl_: passthrough}\n  - {id: b, type: command, command: cat}\n",
                expected_errors: 0,
            },
            TestCase {
                name: "duplicate id",
                yaml: "processors:\n  - {id: a, type: local, impl_: passthrough}\n  - {id: a, type: local, impl_: passthrough}\n",
                expected_errors: 1,
            },
            TestCase {
                name: "local without impl_",
                yaml: "processors:\n  - {id: a, type: local}\n",
                expected_errors: 1,
            },
            TestCase {
                name: "command without command",
                yaml: "processors:\n  - {id: a, type: command, args: [x]}\n",
                expected_errors: 1,
            },
        ];

        for case in test_cases {
            let cfg: RunConfig = serde_yaml::from_str(case.yaml).unwrap();
            let actual = validate_config(&cfg).err().map(|e| e.len()).unwrap_or(0);
            assert_eq!(actual, case.expected_errors, "case '{}'", case.name);
        }
    }

    #[test]
    fn test_load_and_validate_config_from_file() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("flywheel.yaml");
        std::fs::write(
            &good,
            "processors:\n  - id: echo\n    type: local\n    impl_: passthrough\n",
        )
        .unwrap();
        assert!(load_and_validate_config(&good).is_ok());

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "processors:\n  - id: echo\n    type: local\n").unwrap();
        let message = load_and_validate_config(&bad).unwrap_err().to_string();
        assert!(message.contains("Configuration validation failed"));
        assert!(message.contains("missing the 'impl_' field"));

        let unparsable = dir.path().join("broken.yaml");
        std::fs::write(&unparsable, "processors: [").unwrap();
        assert!(matches!(
            load_and_validate_config(&unparsable),
            Err(ConfigError::Persistence(PersistenceError::Yaml { .. }))
        ));
    }
}
