// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use the_flywheel::config::consts::{
    ARTIFACTS_DIR_KEY, ARTIFACTS_DIR_NAME, LOGS_DIR_NAME, MEETING_NOTES_DIR_NAME, METADATA_DIR_KEY,
    METADATA_DIR_NAME, OUTPUTS_DIR_KEY, OUTPUTS_DIR_NAME, SAVED_GRAPH_FILE, TRANSCRIPT_PATH_KEY,
};
use the_flywheel::config::{load_and_validate_config, ProcessorRegistry, Runtime};
use the_flywheel::context::ArtifactContext;
use the_flywheel::graph::{
    create_default_graph, load_and_validate_graph, load_graph, save_graph, Graph,
};

#[derive(Parser)]
#[command(name = "flywheel", version, about = "Run dependency-ordered processing graphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a graph and print the final context as JSON
    Run {
        /// Meeting notes to process; copied into the run and seeded as `transcript_path`
        notes: Option<PathBuf>,

        /// Run configuration (YAML)
        #[arg(short, long, env = "FLYWHEEL_CONFIG")]
        config: PathBuf,

        /// Meeting id; defaults to `meeting_<notes file stem>`
        #[arg(long, requires = "notes")]
        meeting_id: Option<String>,

        /// Graph file (JSON); the built-in pipeline is used when omitted
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Directory that receives artifacts, outputs, metadata and logs;
        /// defaults to the meeting id when notes are given
        #[arg(short, long)]
        run_dir: Option<PathBuf>,

        /// Seed a context entry; the value is parsed as JSON, else kept as a string
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_seed)]
        seeds: Vec<(String, Value)>,
    },
    /// Check a graph file, and its processor references when a config is given
    Validate {
        /// Graph file (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Run configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the built-in pipeline graph as JSON
    DefaultGraph {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Meeting id for a notes file: `meeting_` plus the file name up to its first dot.
fn meeting_id_for(notes: &Path) -> String {
    let file_name = notes
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    format!("meeting_{stem}")
}

/// Copy the notes into `<run_dir>/meeting_notes/` and return the copy's path.
fn stage_notes(notes: &Path, run_dir: &Path) -> anyhow::Result<PathBuf> {
    let file_name = notes
        .file_name()
        .with_context(|| format!("meeting notes path {} has no file name", notes.display()))?;
    let notes_dir = run_dir.join(MEETING_NOTES_DIR_NAME);
    std::fs::create_dir_all(&notes_dir)
        .with_context(|| format!("creating run directory {}", notes_dir.display()))?;

    let staged = notes_dir.join(file_name);
    std::fs::copy(notes, &staged).with_context(|| {
        format!("copying meeting notes {} to {}", notes.display(), staged.display())
    })?;
    Ok(staged)
}

fn parse_seed(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("the_flywheel=info,warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            notes,
            config,
            meeting_id,
            graph,
            run_dir,
            seeds,
        } => {
            let run_dir = match (run_dir, &notes) {
                (Some(run_dir), _) => run_dir,
                (None, Some(notes)) => {
                    PathBuf::from(meeting_id.unwrap_or_else(|| meeting_id_for(notes)))
                }
                (None, None) => bail!("either a meeting notes file or --run-dir is required"),
            };
            run(&config, notes.as_deref(), graph.as_deref(), &run_dir, seeds).await
        }
        Commands::Validate { graph, config } => validate(&graph, config.as_deref()),
        Commands::DefaultGraph { output } => {
            let path = save_graph(&create_default_graph(), &output)?;
            eprintln!("Default graph written to {}", path.display());
            Ok(())
        }
    }
}

async fn run(
    config_path: &Path,
    notes: Option<&Path>,
    graph_path: Option<&Path>,
    run_dir: &Path,
    seeds: Vec<(String, Value)>,
) -> anyhow::Result<()> {
    let config = load_and_validate_config(config_path)
        .with_context(|| format!("loading run configuration {}", config_path.display()))?;
    let runtime = Runtime::from_config(&config).context("building processor registry")?;

    if let Some(notes) = notes {
        if !notes.is_file() {
            bail!("meeting notes file not found: {}", notes.display());
        }
    }

    let mut context = ArtifactContext::new();
    if let Some(notes) = notes {
        let staged = stage_notes(notes, run_dir)?;
        context.set(TRANSCRIPT_PATH_KEY, staged.to_string_lossy().into_owned());
    }
    for (key, name) in [
        (ARTIFACTS_DIR_KEY, ARTIFACTS_DIR_NAME),
        (OUTPUTS_DIR_KEY, OUTPUTS_DIR_NAME),
        (METADATA_DIR_KEY, METADATA_DIR_NAME),
    ] {
        let dir = run_dir.join(name);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating run directory {}", dir.display()))?;
        context.set(key, dir.to_string_lossy().into_owned());
    }
    context.extend(seeds);

    let graph: Graph = match graph_path {
        Some(path) => load_graph(path).with_context(|| format!("loading graph {}", path.display()))?,
        None => {
            let graph = create_default_graph();
            let saved = save_graph(&graph, run_dir.join(METADATA_DIR_NAME).join(SAVED_GRAPH_FILE))?;
            eprintln!("Using default graph, saved to {}", saved.display());
            graph
        }
    };

    let logs_dir = run_dir.join(config.logs_dir.as_deref().unwrap_or(Path::new(LOGS_DIR_NAME)));

    eprintln!(
        "Running '{}' ({} nodes) in {}",
        graph.name(),
        graph.len(),
        run_dir.display()
    );
    let start = Instant::now();
    let context = runtime
        .run(&graph, context, &logs_dir)
        .await
        .with_context(|| format!("running graph '{}'", graph.name()))?;
    eprintln!(
        "Completed in {:.2}s, log written to {}",
        start.elapsed().as_secs_f64(),
        logs_dir.display()
    );

    let output = serde_json::to_string_pretty(&context.into_inner())?;
    println!("{output}");
    Ok(())
}

fn validate(graph_path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let graph = match config_path {
        Some(config_path) => {
            let config = load_and_validate_config(config_path)
                .with_context(|| format!("loading run configuration {}", config_path.display()))?;
            let registry = ProcessorRegistry::from_config(&config)?;
            load_and_validate_graph(graph_path, &registry)
                .with_context(|| format!("validating graph {}", graph_path.display()))?
        }
        None => load_graph(graph_path)
            .with_context(|| format!("validating graph {}", graph_path.display()))?,
    };

    println!(
        "Graph '{}' is valid: {} nodes, {} edges",
        graph.name(),
        graph.len(),
        graph.edges().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_seed_table_driven() {
        let test_cases = vec![
            ("transcript_path=meeting.txt", Ok(("transcript_path", json!("meeting.txt")))),
            ("top_n=3", Ok(("top_n", json!(3)))),
            ("tags=[\"a\",\"b\"]", Ok(("tags", json!(["a", "b"])))),
            ("expr=a=b", Ok(("expr", json!("a=b")))),
            ("empty=", Ok(("empty", json!("")))),
            ("novalue", Err(())),
            ("=value", Err(())),
        ];

        for (input, expected) in test_cases {
            let actual = parse_seed(input);
            match expected {
                Ok((key, value)) => assert_eq!(actual, Ok((key.to_string(), value)), "input '{}'", input),
                Err(()) => assert!(actual.is_err(), "input '{}' should fail", input),
            }
        }
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "flywheel", "run", "--config", "flywheel.yaml", "--run-dir", "out", "--set", "top_n=5",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                notes,
                graph,
                run_dir,
                seeds,
                ..
            } => {
                assert!(notes.is_none());
                assert!(graph.is_none());
                assert_eq!(run_dir, Some(PathBuf::from("out")));
                assert_eq!(seeds, vec![("top_n".to_string(), json!(5))]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_cli_parses_run_with_notes() {
        let cli = Cli::try_parse_from([
            "flywheel", "run", "notes/q3.txt", "--config", "flywheel.yaml", "--meeting-id", "q3_sync",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                notes,
                meeting_id,
                run_dir,
                ..
            } => {
                assert_eq!(notes, Some(PathBuf::from("notes/q3.txt")));
                assert_eq!(meeting_id.as_deref(), Some("q3_sync"));
                assert!(run_dir.is_none());
            }
            _ => panic!("expected run"),
        }

        assert!(Cli::try_parse_from([
            "flywheel", "run", "--config", "flywheel.yaml", "--meeting-id", "q3_sync", "--run-dir", "out",
        ])
        .is_err());
    }

    #[test]
    fn test_meeting_id_for_table_driven() {
        let test_cases = vec![
            ("notes/q3_planning.txt", "meeting_q3_planning"),
            ("standup.2025-06-01.md", "meeting_standup"),
            ("transcript", "meeting_transcript"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(meeting_id_for(Path::new(input)), expected, "input '{}'", input);
        }
    }

    #[test]
    fn test_stage_notes_copies_into_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let notes = dir.path().join("q3.txt");
        std::fs::write(&notes, "Attendees: Ana, Raj").unwrap();
        let run_dir = dir.path().join("meeting_q3");

        let staged = stage_notes(&notes, &run_dir).unwrap();

        assert_eq!(staged, run_dir.join("meeting_notes").join("q3.txt"));
        assert_eq!(std::fs::read_to_string(&staged).unwrap(), "Attendees: Ana, Raj");
        assert!(notes.exists());

        assert!(stage_notes(&dir.path().join("missing.txt"), &run_dir).is_err());
    }
}
