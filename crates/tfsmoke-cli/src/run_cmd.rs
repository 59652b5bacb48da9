//! The `tfsmoke run` command.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use tfsmoke_core::check::MarkerCheck;
use tfsmoke_core::presets;
use tfsmoke_core::smoke::{SmokeReport, SmokeRunner};
use tfsmoke_core::tool::options::PlanOptions;
use tfsmoke_core::tool::registry::{self, ToolRegistry};
use tfsmoke_core::tool::{ProvisioningTool, ToolError};

use crate::OutputFormat;

/// Exit code when one or more marker checks failed.
pub const EXIT_CHECKS_FAILED: i32 = 1;
/// Exit code when init or plan itself failed (no checks evaluated).
pub const EXIT_SETUP_FAILED: i32 = 2;

/// Parsed arguments for one `run` invocation.
pub struct RunParams {
    pub dir: PathBuf,
    pub markers: Vec<String>,
    pub provider: Option<String>,
    pub tool: String,
    pub tool_bin: Option<String>,
    pub color: bool,
    pub vars: Vec<String>,
    pub var_files: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub format: OutputFormat,
}

/// Execute `tfsmoke run`. Returns the process exit code.
pub async fn run_smoke(params: RunParams) -> Result<i32> {
    let checks = build_checks(params.provider.as_deref(), &params.markers)?;
    let tool = resolve_tool(&params.tool, params.tool_bin.as_deref())?;

    let mut opts = PlanOptions::new(&params.dir).with_no_color(!params.color);
    for var in &params.vars {
        let (key, value) = var
            .split_once('=')
            .with_context(|| format!("invalid --var {var:?} (expected key=value)"))?;
        opts = opts.with_var(key, value);
    }
    for file in &params.var_files {
        opts = opts.with_var_file(file);
    }
    if let Some(secs) = params.timeout_secs {
        opts = opts.with_timeout(Duration::from_secs(secs));
    }

    let runner = SmokeRunner::new(tool, checks);
    execute_and_report(&runner, &opts, params.format).await
}

/// Run the smoke test and print the report. Shared with `tfsmoke suite`.
pub async fn execute_and_report(
    runner: &SmokeRunner,
    opts: &PlanOptions,
    format: OutputFormat,
) -> Result<i32> {
    match runner.run(opts).await {
        Ok(report) => {
            print_report(&report, format)?;
            if report.verdict.passed() {
                Ok(0)
            } else {
                Ok(EXIT_CHECKS_FAILED)
            }
        }
        Err(e) => {
            print_setup_failure(&e, format)?;
            Ok(EXIT_SETUP_FAILED)
        }
    }
}

/// Assemble the check list: provider presets first, then explicit
/// `--marker name=substring` entries. Check names must be unique,
/// including against the preset group, matching the suite-file rules.
fn build_checks(provider: Option<&str>, markers: &[String]) -> Result<Vec<MarkerCheck>> {
    let mut checks = match provider {
        Some(provider) => {
            let preset = presets::checks_for_provider(provider);
            if preset.is_empty() {
                bail!(
                    "unknown provider {provider:?} (available: {})",
                    presets::available_providers().join(", ")
                );
            }
            preset
        }
        None => Vec::new(),
    };

    let mut seen: HashSet<String> = checks.iter().map(|c| c.name.clone()).collect();
    for marker in markers {
        let (name, substring) = marker
            .split_once('=')
            .with_context(|| format!("invalid --marker {marker:?} (expected name=substring)"))?;
        if !seen.insert(name.to_owned()) {
            bail!("duplicate check name: {name:?}");
        }
        checks.push(MarkerCheck::new(name, substring));
    }

    if checks.is_empty() {
        bail!("no checks to run; pass --provider or at least one --marker");
    }
    Ok(checks)
}

/// Look up the tool adapter, applying a binary override if given.
pub fn resolve_tool(name: &str, tool_bin: Option<&str>) -> Result<Arc<dyn ProvisioningTool>> {
    let tool = match tool_bin {
        Some(bin) => registry::tool_with_binary(name, bin),
        None => ToolRegistry::builtin().get(name),
    };
    tool.with_context(|| {
        format!(
            "unknown tool {name:?} (available: {})",
            registry::KNOWN_TOOLS.join(", ")
        )
    })
}

fn print_report(report: &SmokeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).context("failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let failing: Vec<&str> = report
                .verdict
                .failures()
                .iter()
                .map(|f| f.check_name.as_str())
                .collect();

            println!(
                "Smoke run: {} ({} checks, init {}ms, plan {}ms)",
                report.tool,
                report.checks.len(),
                report.init_ms,
                report.plan_ms
            );
            for check in &report.checks {
                let status = if failing.contains(&check.name.as_str()) {
                    "FAIL"
                } else {
                    "PASS"
                };
                println!("  {status} {:<24} {}", check.name, check.marker);
            }
            println!();
            if failing.is_empty() {
                println!("All {} checks passed.", report.checks.len());
            } else {
                println!(
                    "{} of {} checks failed: {}",
                    failing.len(),
                    report.checks.len(),
                    failing.join(", ")
                );
            }
        }
    }
    Ok(())
}

fn print_setup_failure(err: &ToolError, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "setup_failed",
                "error": err.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            eprintln!("Setup failure (no checks evaluated): {err}");
        }
    }
    Ok(())
}
