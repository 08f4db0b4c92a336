// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::observability::run_log::LogEntry;

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_edges: usize,
    pub total_artifacts: usize,
    pub total_time_ms: u64,
    pub completed_at: DateTime<Utc>,
}

fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Render the human-readable run report.
pub fn render_markdown(summary: &RunSummary, entries: &[LogEntry]) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# Content Flywheel Processing Summary\n");
    let _ = writeln!(
        out,
        "**Completed at:** {}",
        summary.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "**Total processing time:** {:.2} seconds",
        seconds(summary.total_time_ms)
    );
    let _ = writeln!(out, "**Total processing steps:** {}", summary.total_edges);
    let _ = writeln!(out, "**Total artifacts:** {}\n", summary.total_artifacts);

    let _ = writeln!(out, "## Processing Steps\n");
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "### {}. {} → {}\n", i + 1, entry.source, entry.target);
        let _ = writeln!(out, "- **Status:** {}", entry.status);
        let _ = writeln!(
            out,
            "- **Execution time:** {:.2} seconds",
            seconds(entry.execution_time_ms)
        );

        if !entry.artifacts.is_empty() {
            let _ = writeln!(out, "- **Artifacts:**");
            for artifact in &entry.artifacts {
                let _ = writeln!(out, "  - {}: `{}`", artifact.kind, artifact.path);
            }
        }

        out.push('\n');
    }

    out
}
