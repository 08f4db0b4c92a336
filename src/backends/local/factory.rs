// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::processors::*;
use crate::config::{BackendType, ProcessorConfig};
use crate::errors::ProcessorMapError;
use crate::traits::Processor;

/// Factory for creating local (in-process) processor instances
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a processor instance from configuration
    ///
    /// The `impl_` field in the config determines which processor to create:
    /// - "passthrough" -> PassthroughProcessor (optional `rename` map option)
    /// - "write_json" -> WriteJsonProcessor (`file_name` and `output_key` options)
    pub fn create_processor(config: &ProcessorConfig) -> Result<Arc<dyn Processor>, ProcessorMapError> {
        let impl_name = config
            .impl_
            .as_deref()
            .ok_or_else(|| ProcessorMapError::MissingField {
                processor_id: config.id.clone(),
                backend: BackendType::Local,
                field: "impl_",
            })?;

        match impl_name {
            "passthrough" => {
                let rename: BTreeMap<String, String> = option(config, "rename")?.unwrap_or_default();
                Ok(Arc::new(
                    PassthroughProcessor::new(config.id.clone()).with_rename(rename),
                ))
            }

            "write_json" => {
                let file_name: String =
                    option(config, "file_name")?.unwrap_or_else(|| format!("{}.json", config.id));
                let output_key: String =
                    option(config, "output_key")?.unwrap_or_else(|| format!("{}_path", config.id));
                Ok(Arc::new(WriteJsonProcessor::new(
                    config.id.clone(),
                    file_name,
                    output_key,
                )))
            }

            _ => Err(creation_failed(
                config,
                format!(
                    "Unknown local processor implementation: '{}' (available: {})",
                    impl_name,
                    Self::list_available_implementations().join(", ")
                ),
            )),
        }
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["passthrough", "write_json"]
    }
}

fn option<T: DeserializeOwned>(config: &ProcessorConfig, key: &str) -> Result<Option<T>, ProcessorMapError> {
    config
        .options
        .get(key)
        .map(|value| {
            serde_yaml::from_value(value.clone())
                .map_err(|e| creation_failed(config, format!("invalid '{}' option: {}", key, e)))
        })
        .transpose()
}

fn creation_failed(config: &ProcessorConfig, reason: String) -> ProcessorMapError {
    ProcessorMapError::ProcessorCreationFailed {
        processor_id: config.id.clone(),
        backend: BackendType::Local,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Arguments;
    use serde_json::json;
    use std::collections::HashMap;

    fn create_test_config(id: &str, impl_name: &str) -> ProcessorConfig {
        ProcessorConfig {
            id: id.to_string(),
            backend: BackendType::Local,
            impl_: Some(impl_name.to_string()),
            command: None,
            args: vec![],
            env: BTreeMap::new(),
            working_dir: None,
            options: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_create_passthrough_with_rename() {
        let mut config = create_test_config("adapt", "passthrough");
        config.options.insert(
            "rename".to_string(),
            serde_yaml::from_str("{transcript_path: notes_path}").unwrap(),
        );

        let processor = LocalProcessorFactory::create_processor(&config).unwrap();
        assert_eq!(processor.name(), "adapt");

        let mut args = Arguments::new();
        args.insert("transcript_path", json!("meeting.txt"));
        let outputs = processor.process(args).await.unwrap();
        assert_eq!(outputs.get("notes_path"), Some(&json!("meeting.txt")));
    }

    #[test]
    fn test_create_processor_errors_table_driven() {
        struct TestCase {
            name: &'static str,
            config: ProcessorConfig,
            expected_message: &'static str,
        }

        let mut bad_rename = create_test_config("adapt", "passthrough");
        bad_rename
            .options
            .insert("rename".to_string(), serde_yaml::from_str("[1, 2]").unwrap());

        let test_cases = vec![
            TestCase {
                name: "unknown implementation",
                config: create_test_config("llm", "summon_llm"),
                expected_message:
                    "Unknown local processor implementation: 'summon_llm' (available: passthrough, write_json)",
            },
            TestCase {
                name: "missing impl_",
                config: ProcessorConfig {
                    impl_: None,
                    ..create_test_config("empty", "")
                },
                expected_message: "missing the 'impl_' field",
            },
            TestCase {
                name: "malformed option",
                config: bad_rename,
                expected_message: "invalid 'rename' option",
            },
        ];

        for case in test_cases {
            let err = match LocalProcessorFactory::create_processor(&case.config) {
                Ok(_) => panic!("case '{}' should fail", case.name),
                Err(e) => e,
            };
            assert!(
                err.to_string().contains(case.expected_message),
                "case '{}': {}",
                case.name,
                err
            );
        }
    }

    #[test]
    fn test_every_listed_implementation_can_be_created() {
        for impl_name in LocalProcessorFactory::list_available_implementations() {
            let config = create_test_config(impl_name, impl_name);
            assert!(
                LocalProcessorFactory::create_processor(&config).is_ok(),
                "implementation '{}'",
                impl_name
            );
        }
    }
}
