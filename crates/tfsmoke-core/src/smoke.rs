//! The smoke runner: init, plan, then evaluate markers.
//!
//! A run is strictly sequential within itself and safe to run concurrently
//! with sibling runs against other directories; the only shared state is
//! the tool's own lock files inside each target directory, and plan runs
//! with locking disabled anyway.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::check::{self, MarkerCheck, SmokeVerdict};
use crate::tool::options::PlanOptions;
use crate::tool::{ProvisioningTool, ToolError};

/// The outcome of one complete smoke run.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    /// Name of the tool adapter that ran.
    pub tool: String,
    /// Full plan report text (combined stdout+stderr of the plan step).
    pub plan_output: String,
    /// Wall-clock duration of the init step, in milliseconds.
    pub init_ms: u64,
    /// Wall-clock duration of the plan step, in milliseconds.
    pub plan_ms: u64,
    /// The checks that were evaluated, in order.
    pub checks: Vec<MarkerCheck>,
    /// Per-check verdict.
    pub verdict: SmokeVerdict,
}

/// Drives init-and-plan for a tool and evaluates marker checks against the
/// resulting report.
pub struct SmokeRunner {
    tool: Arc<dyn ProvisioningTool>,
    checks: Vec<MarkerCheck>,
}

impl SmokeRunner {
    /// Runner for the given tool and check list.
    pub fn new(tool: Arc<dyn ProvisioningTool>, checks: Vec<MarkerCheck>) -> Self {
        Self { tool, checks }
    }

    /// The checks this runner will evaluate.
    pub fn checks(&self) -> &[MarkerCheck] {
        &self.checks
    }

    /// Run one smoke test.
    ///
    /// 1. Init the configuration directory.
    /// 2. Compute the plan and capture its report text.
    /// 3. Evaluate every marker check against the report.
    ///
    /// An init or plan failure aborts with [`ToolError`] before any check
    /// is evaluated. Check failures are not errors: they land in the
    /// report's verdict.
    pub async fn run(&self, opts: &PlanOptions) -> Result<SmokeReport, ToolError> {
        tracing::info!(
            tool = self.tool.name(),
            dir = %opts.dir.display(),
            checks = self.checks.len(),
            "starting smoke run"
        );

        let init_start = Instant::now();
        self.tool.init(opts).await?;
        let init_ms = init_start.elapsed().as_millis() as u64;
        tracing::info!(tool = self.tool.name(), init_ms, "init complete");

        let plan_start = Instant::now();
        let plan_output = self.tool.plan(opts).await?;
        let plan_ms = plan_start.elapsed().as_millis() as u64;
        tracing::info!(
            tool = self.tool.name(),
            plan_ms,
            bytes = plan_output.len(),
            "plan complete"
        );

        let verdict = check::evaluate(&plan_output, &self.checks);
        match &verdict {
            SmokeVerdict::Passed => {
                tracing::info!(checks = self.checks.len(), "all markers present");
            }
            SmokeVerdict::Failed { failures } => {
                tracing::warn!(missing = failures.len(), "markers absent from plan");
            }
        }

        Ok(SmokeReport {
            tool: self.tool.name().to_owned(),
            plan_output,
            init_ms,
            plan_ms,
            checks: self.checks.clone(),
            verdict,
        })
    }
}

impl std::fmt::Debug for SmokeRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmokeRunner")
            .field("tool", &self.tool.name())
            .field("checks", &self.checks.len())
            .finish()
    }
}
