//! TOML format types for smoke suite files.
//!
//! These types map directly to the `tfsmoke.toml` on-disk format and are
//! deserialized via `serde` + the `toml` crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level structure of a `tfsmoke.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteToml {
    /// Suite metadata and invocation settings.
    pub suite: SuiteMeta,
    /// Explicit marker checks, evaluated after any provider presets.
    #[serde(default)]
    pub checks: Vec<CheckToml>,
}

/// Suite-level settings in `[suite]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteMeta {
    /// Human-readable suite name.
    pub name: String,
    /// Configuration directory, relative to the suite file.
    pub dir: String,
    /// Tool adapter to use: "terraform" or "tofu".
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Pull in the preset check group for a provider (e.g. "aws").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Suppress ANSI color codes in tool output.
    #[serde(default = "default_no_color")]
    pub no_color: bool,
    /// Per-step timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// `-var` assignments passed to the plan step.
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

/// A single `[[checks]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckToml {
    /// Unique check name within the suite.
    pub name: String,
    /// The substring expected in plan output.
    pub marker: String,
}

fn default_tool() -> String {
    crate::tool::registry::DEFAULT_TOOL.to_owned()
}

fn default_no_color() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_suite() {
        let toml_str = r#"
[suite]
name = "web stack"
dir = "infra/"
provider = "aws"
"#;
        let suite: SuiteToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(suite.suite.name, "web stack");
        assert_eq!(suite.suite.tool, "terraform");
        assert_eq!(suite.suite.provider.as_deref(), Some("aws"));
        assert!(suite.suite.no_color);
        assert!(suite.suite.timeout_secs.is_none());
        assert!(suite.checks.is_empty());
    }

    #[test]
    fn deserialize_full_suite() {
        let toml_str = r#"
[suite]
name = "staging"
dir = "../"
tool = "tofu"
no_color = false
timeout_secs = 120

[suite.vars]
region = "eu-west-1"

[[checks]]
name = "virtual_network"
marker = "aws_vpc"

[[checks]]
name = "storage_bucket"
marker = "aws_s3_bucket"
"#;
        let suite: SuiteToml = toml::from_str(toml_str).expect("should parse");
        assert_eq!(suite.suite.tool, "tofu");
        assert!(!suite.suite.no_color);
        assert_eq!(suite.suite.timeout_secs, Some(120));
        assert_eq!(suite.suite.vars.get("region").map(String::as_str), Some("eu-west-1"));
        assert_eq!(suite.checks.len(), 2);
        assert_eq!(suite.checks[1].marker, "aws_s3_bucket");
    }

    #[test]
    fn serialize_roundtrip() {
        let toml_str = r#"
[suite]
name = "roundtrip"
dir = "infra/"

[[checks]]
name = "virtual_network"
marker = "aws_vpc"
"#;
        let suite: SuiteToml = toml::from_str(toml_str).expect("should parse");
        let out = toml::to_string_pretty(&suite).expect("should serialize");
        let reparsed: SuiteToml = toml::from_str(&out).expect("should reparse");
        assert_eq!(suite, reparsed);
    }
}
