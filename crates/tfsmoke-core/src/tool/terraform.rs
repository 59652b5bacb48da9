//! Terraform and OpenTofu adapters.
//!
//! The two tools share an identical init/plan command-line surface; only
//! the binary name differs. Both adapters build fully non-interactive
//! invocations (`-input=false`) and disable state locking for the plan
//! step, since a smoke plan is read-only.

use async_trait::async_trait;

use super::ProvisioningTool;
use super::options::PlanOptions;

/// The Terraform CLI adapter.
#[derive(Debug, Clone)]
pub struct Terraform {
    /// Explicitly configured binary; `None` means the adapter default.
    binary: Option<String>,
}

impl Terraform {
    /// Adapter invoking the `terraform` binary from PATH.
    pub fn new() -> Self {
        Self { binary: None }
    }

    /// Adapter invoking a specific binary path. Used by test suites to
    /// point at a stub tool. An explicit binary wins over the
    /// `TFSMOKE_TOOL_BIN` environment override.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: Some(binary.into()),
        }
    }
}

impl Default for Terraform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvisioningTool for Terraform {
    fn name(&self) -> &str {
        "terraform"
    }

    fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or("terraform")
    }

    fn binary_overridden(&self) -> bool {
        self.binary.is_some()
    }

    fn init_args(&self, opts: &PlanOptions) -> Vec<String> {
        build_init_args(opts)
    }

    fn plan_args(&self, opts: &PlanOptions) -> Vec<String> {
        build_plan_args(opts)
    }
}

/// The OpenTofu CLI adapter. Same invocation surface as Terraform.
#[derive(Debug, Clone)]
pub struct OpenTofu {
    /// Explicitly configured binary; `None` means the adapter default.
    binary: Option<String>,
}

impl OpenTofu {
    /// Adapter invoking the `tofu` binary from PATH.
    pub fn new() -> Self {
        Self { binary: None }
    }

    /// Adapter invoking a specific binary path.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: Some(binary.into()),
        }
    }
}

impl Default for OpenTofu {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvisioningTool for OpenTofu {
    fn name(&self) -> &str {
        "tofu"
    }

    fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or("tofu")
    }

    fn binary_overridden(&self) -> bool {
        self.binary.is_some()
    }

    fn init_args(&self, opts: &PlanOptions) -> Vec<String> {
        build_init_args(opts)
    }

    fn plan_args(&self, opts: &PlanOptions) -> Vec<String> {
        build_plan_args(opts)
    }
}

fn build_init_args(opts: &PlanOptions) -> Vec<String> {
    let mut args = vec!["init".to_owned(), "-input=false".to_owned()];
    if opts.no_color {
        args.push("-no-color".to_owned());
    }
    args
}

fn build_plan_args(opts: &PlanOptions) -> Vec<String> {
    let mut args = vec![
        "plan".to_owned(),
        "-input=false".to_owned(),
        "-lock=false".to_owned(),
    ];
    if opts.no_color {
        args.push("-no-color".to_owned());
    }
    for (key, value) in &opts.vars {
        args.push("-var".to_owned());
        args.push(format!("{key}={value}"));
    }
    for file in &opts.var_files {
        args.push(format!("-var-file={}", file.display()));
    }
    args.extend(opts.extra_args.iter().cloned());
    args
}
