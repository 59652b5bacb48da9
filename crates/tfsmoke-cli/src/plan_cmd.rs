//! The `tfsmoke plan` command: init-and-plan, print the raw report.

use std::path::Path;

use anyhow::{Context, Result};

use tfsmoke_core::tool;
use tfsmoke_core::tool::options::PlanOptions;

use crate::run_cmd;

/// Execute `tfsmoke plan`.
pub async fn run_plan(dir: &Path, tool_name: &str, tool_bin: Option<&str>, color: bool) -> Result<()> {
    let tool = run_cmd::resolve_tool(tool_name, tool_bin)?;
    let opts = PlanOptions::new(dir).with_no_color(!color);

    let output = tool::init_and_plan(tool.as_ref(), &opts)
        .await
        .with_context(|| format!("plan failed for {}", dir.display()))?;

    print!("{output}");
    Ok(())
}
