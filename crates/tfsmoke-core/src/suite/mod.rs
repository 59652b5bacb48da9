//! Smoke suite definitions: the `tfsmoke.toml` on-disk format.
//!
//! A suite names a configuration directory, a tool, and a set of marker
//! checks -- either spelled out as `[[checks]]` entries, pulled in from a
//! provider preset group, or both.

pub mod parser;
pub mod toml_format;

use std::path::Path;
use std::time::Duration;

use crate::check::MarkerCheck;
use crate::presets;
use crate::tool::options::PlanOptions;

pub use parser::{SuiteParseError, parse_suite_toml};
pub use toml_format::{CheckToml, SuiteMeta, SuiteToml};

/// Resolve the full check list of a suite: provider presets first (in
/// library order), then explicit `[[checks]]` entries (in file order).
pub fn resolve_checks(suite: &SuiteToml) -> Vec<MarkerCheck> {
    let mut checks = match suite.suite.provider {
        Some(ref provider) => presets::checks_for_provider(provider),
        None => Vec::new(),
    };
    checks.extend(
        suite
            .checks
            .iter()
            .map(|c| MarkerCheck::new(c.name.clone(), c.marker.clone())),
    );
    checks
}

/// Build [`PlanOptions`] from a suite, resolving `suite.dir` relative to
/// `base_dir` (normally the directory containing the suite file).
pub fn plan_options(suite: &SuiteToml, base_dir: &Path) -> PlanOptions {
    let mut opts = PlanOptions::new(base_dir.join(&suite.suite.dir))
        .with_no_color(suite.suite.no_color);
    for (key, value) in &suite.suite.vars {
        opts = opts.with_var(key, value);
    }
    if let Some(secs) = suite.suite.timeout_secs {
        opts = opts.with_timeout(Duration::from_secs(secs));
    }
    opts
}
