//! The `tfsmoke suite` command: run a `tfsmoke.toml` suite file.

use std::path::Path;

use anyhow::{Context, Result};

use tfsmoke_core::smoke::SmokeRunner;
use tfsmoke_core::suite;

use crate::OutputFormat;
use crate::run_cmd;

/// Execute `tfsmoke suite`. Returns the process exit code.
pub async fn run_suite(file: &Path, tool_bin: Option<&str>, format: OutputFormat) -> Result<i32> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read suite file {}", file.display()))?;
    let parsed = suite::parse_suite_toml(&content)
        .with_context(|| format!("invalid suite file {}", file.display()))?;

    // The suite's dir is relative to the file that declares it.
    let base_dir = file.parent().unwrap_or_else(|| Path::new("."));
    let opts = suite::plan_options(&parsed, base_dir);
    let checks = suite::resolve_checks(&parsed);
    let tool = run_cmd::resolve_tool(&parsed.suite.tool, tool_bin)?;

    tracing::info!(
        suite = %parsed.suite.name,
        dir = %opts.dir.display(),
        checks = checks.len(),
        "running suite"
    );

    let runner = SmokeRunner::new(tool, checks);
    run_cmd::execute_and_report(&runner, &opts, format).await
}
