//! Provisioning tool adapters.
//!
//! A [`ProvisioningTool`] wraps a specific declarative infrastructure CLI
//! (Terraform, OpenTofu) behind an object-safe init-and-plan surface. The
//! adapters only build argv and shell out; the tool remains an opaque
//! collaborator whose output is returned as a single text blob.

pub mod options;
pub mod registry;
pub mod terraform;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::exec::{self, ExecError};
use options::PlanOptions;

pub use registry::ToolRegistry;
pub use terraform::{OpenTofu, Terraform};

/// Environment variable that overrides the tool binary path. Lets test
/// suites substitute a stub binary without touching PATH. A fallback
/// only: an explicitly configured binary (e.g. `--tool-bin` or
/// [`Terraform::with_binary`]) always wins over it.
pub const TOOL_BIN_ENV: &str = "TFSMOKE_TOOL_BIN";

/// The two steps of a smoke invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStep {
    Init,
    Plan,
}

impl std::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStep::Init => write!(f, "init"),
            PlanStep::Plan => write!(f, "plan"),
        }
    }
}

/// Errors from driving a provisioning tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The target path is not a readable directory.
    #[error("not a configuration directory: {0}")]
    NotADirectory(PathBuf),

    /// Spawning, waiting on, or timing out the tool process.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// The tool exited non-zero. Fatal: no retry, no partial result.
    #[error("{tool} {step} failed (exit {code}): {stderr}")]
    Exit {
        tool: String,
        step: PlanStep,
        code: i32,
        stderr: String,
    },
}

/// Adapter interface for declarative provisioning CLIs.
///
/// Implementors translate [`PlanOptions`] into the concrete argv for their
/// tool. `init` and `plan` return the combined stdout+stderr text of the
/// step on success.
///
/// # Object Safety
///
/// The trait is object-safe so adapters can be stored as
/// `Arc<dyn ProvisioningTool>` in the [`ToolRegistry`].
#[async_trait]
pub trait ProvisioningTool: Send + Sync {
    /// Registry name for this tool (e.g. "terraform").
    fn name(&self) -> &str;

    /// The binary to invoke: the explicitly configured one if set,
    /// otherwise the adapter default.
    fn binary(&self) -> &str;

    /// Whether the binary was explicitly configured rather than the
    /// adapter default. An explicit binary wins over [`TOOL_BIN_ENV`].
    fn binary_overridden(&self) -> bool;

    /// Build the argv for the init step.
    fn init_args(&self, opts: &PlanOptions) -> Vec<String>;

    /// Build the argv for the plan step.
    fn plan_args(&self, opts: &PlanOptions) -> Vec<String>;

    /// Run the init step in the target directory.
    async fn init(&self, opts: &PlanOptions) -> Result<String, ToolError> {
        run_step(self, PlanStep::Init, &self.init_args(opts), opts).await
    }

    /// Run the plan step in the target directory.
    async fn plan(&self, opts: &PlanOptions) -> Result<String, ToolError> {
        run_step(self, PlanStep::Plan, &self.plan_args(opts), opts).await
    }
}

// Compile-time assertion: ProvisioningTool must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn ProvisioningTool) {}
};

/// Resolve the binary to invoke for a tool. An explicitly configured
/// binary wins; otherwise the `TFSMOKE_TOOL_BIN` environment variable
/// overrides the adapter default.
pub fn resolve_binary(tool: &(impl ProvisioningTool + ?Sized)) -> String {
    if tool.binary_overridden() {
        return tool.binary().to_owned();
    }
    std::env::var(TOOL_BIN_ENV).unwrap_or_else(|_| tool.binary().to_owned())
}

/// Run one step of a tool invocation and map the outcome.
///
/// Returns the combined stdout+stderr text on exit code 0. A non-zero exit
/// or a signal death maps to [`ToolError::Exit`] carrying a stderr snippet.
async fn run_step(
    tool: &(impl ProvisioningTool + ?Sized),
    step: PlanStep,
    args: &[String],
    opts: &PlanOptions,
) -> Result<String, ToolError> {
    if !opts.dir.is_dir() {
        return Err(ToolError::NotADirectory(opts.dir.clone()));
    }

    let binary = resolve_binary(tool);

    tracing::debug!(
        tool = tool.name(),
        %step,
        binary = %binary,
        dir = %opts.dir.display(),
        "running tool step"
    );

    let result = exec::run_captured(&binary, args, &opts.dir, &opts.env, opts.timeout).await?;

    if !result.success() {
        return Err(ToolError::Exit {
            tool: tool.name().to_owned(),
            step,
            code: result.exit_code.unwrap_or(-1),
            stderr: crate::check::truncate_excerpt(&result.stderr, 1024),
        });
    }

    tracing::debug!(
        tool = tool.name(),
        %step,
        duration_ms = result.duration.as_millis() as u64,
        "tool step succeeded"
    );

    // Combined blob: stdout first, stderr appended (normally empty on
    // success, but some tools emit warnings there).
    let mut text = result.stdout;
    text.push_str(&result.stderr);
    Ok(text)
}

/// Run init followed by plan, returning the plan step's report text.
///
/// Init output is discarded on success; its failure aborts the sequence
/// before plan runs.
pub async fn init_and_plan(
    tool: &dyn ProvisioningTool,
    opts: &PlanOptions,
) -> Result<String, ToolError> {
    tool.init(opts).await?;
    tool.plan(opts).await
}
