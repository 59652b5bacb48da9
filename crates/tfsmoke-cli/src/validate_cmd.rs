//! The `tfsmoke validate` command: check a suite file without running it.

use std::path::Path;

use anyhow::{Context, Result};

use tfsmoke_core::suite;

/// Execute `tfsmoke validate`.
pub fn run_validate(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read suite file {}", file.display()))?;
    let parsed = suite::parse_suite_toml(&content)
        .with_context(|| format!("invalid suite file {}", file.display()))?;

    let checks = suite::resolve_checks(&parsed);

    println!("Suite {:?} is valid.", parsed.suite.name);
    println!("  dir   = {}", parsed.suite.dir);
    println!("  tool  = {}", parsed.suite.tool);
    if let Some(ref provider) = parsed.suite.provider {
        println!("  provider = {provider}");
    }
    println!("  {} checks:", checks.len());
    for check in &checks {
        println!("    {:<24} {}", check.name, check.marker);
    }

    Ok(())
}
