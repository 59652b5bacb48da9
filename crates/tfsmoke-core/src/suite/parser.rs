//! Suite TOML parser with validation.
//!
//! Parses a `tfsmoke.toml` string into a [`SuiteToml`] and validates:
//! - The tool name is a registered adapter.
//! - A named provider exists in the preset library.
//! - The suite yields at least one check (explicit or via provider).
//! - Check names are unique, including against provider presets.

use std::collections::HashSet;

use thiserror::Error;

use crate::presets;
use crate::tool::registry::KNOWN_TOOLS;

use super::toml_format::SuiteToml;

/// Errors that can occur during suite parsing and validation.
#[derive(Debug, Error)]
pub enum SuiteParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("unknown tool {value:?} (expected one of: {})", KNOWN_TOOLS.join(", "))]
    UnknownTool { value: String },

    #[error("unknown provider {value:?} (expected one of: {known})")]
    UnknownProvider { value: String, known: String },

    #[error("duplicate check name: {0:?}")]
    DuplicateCheckName(String),

    #[error("suite defines no checks; add [[checks]] entries or set suite.provider")]
    NoChecks,
}

/// Parse and validate a `tfsmoke.toml` string.
pub fn parse_suite_toml(content: &str) -> Result<SuiteToml, SuiteParseError> {
    let suite: SuiteToml = toml::from_str(content)?;
    validate(&suite)?;
    Ok(suite)
}

/// Validate the parsed suite structure.
fn validate(suite: &SuiteToml) -> Result<(), SuiteParseError> {
    if !KNOWN_TOOLS.contains(&suite.suite.tool.as_str()) {
        return Err(SuiteParseError::UnknownTool {
            value: suite.suite.tool.clone(),
        });
    }

    // Check names contributed by the provider preset group, if any.
    let mut seen: HashSet<String> = HashSet::new();
    if let Some(ref provider) = suite.suite.provider {
        let preset_checks = presets::checks_for_provider(provider);
        if preset_checks.is_empty() {
            return Err(SuiteParseError::UnknownProvider {
                value: provider.clone(),
                known: presets::available_providers().join(", "),
            });
        }
        for check in preset_checks {
            seen.insert(check.name);
        }
    }

    for check in &suite.checks {
        if !seen.insert(check.name.clone()) {
            return Err(SuiteParseError::DuplicateCheckName(check.name.clone()));
        }
    }

    if seen.is_empty() {
        return Err(SuiteParseError::NoChecks);
    }

    Ok(())
}
