/// Name given to graphs loaded from files without a `name` field
pub const DEFAULT_GRAPH_NAME: &str = "Default Graph";

/// Context key for the shared artifacts directory, forwarded to every node
pub const ARTIFACTS_DIR_KEY: &str = "artifacts_dir";
/// Context key for the outputs directory, forwarded to nodes that request it
pub const OUTPUTS_DIR_KEY: &str = "outputs_dir";
/// Context key for the run's metadata directory
pub const METADATA_DIR_KEY: &str = "metadata_dir";
/// Context key for the run's copy of the meeting notes
pub const TRANSCRIPT_PATH_KEY: &str = "transcript_path";
/// Context key the run summary is stored under after a successful run
pub const SUMMARY_KEY: &str = "run_summary";

/// Log entry source for nodes without prerequisites
pub const ROOT_SOURCE: &str = "input";

/// Run log file names inside the logs directory
pub const PROCESS_LOG_FILE: &str = "process_log.json";
pub const SUMMARY_JSON_FILE: &str = "summary.json";
pub const SUMMARY_MARKDOWN_FILE: &str = "summary.md";

/// Run directory layout used by the CLI
pub const ARTIFACTS_DIR_NAME: &str = "artifacts";
pub const OUTPUTS_DIR_NAME: &str = "outputs";
pub const METADATA_DIR_NAME: &str = "metadata";
pub const LOGS_DIR_NAME: &str = "logs";
pub const MEETING_NOTES_DIR_NAME: &str = "meeting_notes";
/// Where the CLI saves the graph it ran, inside the metadata directory
pub const SAVED_GRAPH_FILE: &str = "processing_graph.json";
