//! Marker checks: soft substring assertions over a plan report.
//!
//! Each check is independent. Evaluation never short-circuits: every check
//! runs against the full report text and every failure is collected, so a
//! single run reports all missing markers at once.

use serde::{Deserialize, Serialize};

/// A named expected substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerCheck {
    /// Human-readable check name (e.g. `compute_instance`).
    pub name: String,
    /// The substring expected somewhere in the plan report.
    pub marker: String,
}

impl MarkerCheck {
    pub fn new(name: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: marker.into(),
        }
    }
}

/// A single check whose marker was absent from the report.
#[derive(Debug, Clone, Serialize)]
pub struct CheckFailure {
    /// Name of the failing check.
    pub check_name: String,
    /// The marker that was not found.
    pub marker: String,
    /// A truncated excerpt of the scanned text (up to 1024 bytes), for
    /// diagnostics.
    pub excerpt: String,
}

/// The outcome of evaluating all marker checks for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SmokeVerdict {
    /// Every marker was present.
    Passed,
    /// One or more markers were absent.
    Failed {
        /// Details for each missing marker.
        failures: Vec<CheckFailure>,
    },
}

impl SmokeVerdict {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        matches!(self, SmokeVerdict::Passed)
    }

    /// The failing checks, empty when passed.
    pub fn failures(&self) -> &[CheckFailure] {
        match self {
            SmokeVerdict::Passed => &[],
            SmokeVerdict::Failed { failures } => failures,
        }
    }
}

/// Evaluate every check against the full report text.
///
/// All checks run regardless of earlier failures.
pub fn evaluate(report: &str, checks: &[MarkerCheck]) -> SmokeVerdict {
    let mut failures = Vec::new();

    for check in checks {
        if report.contains(&check.marker) {
            tracing::debug!(check = %check.name, marker = %check.marker, "marker present");
        } else {
            tracing::warn!(check = %check.name, marker = %check.marker, "marker absent");
            failures.push(CheckFailure {
                check_name: check.name.clone(),
                marker: check.marker.clone(),
                excerpt: truncate_excerpt(report, 1024),
            });
        }
    }

    if failures.is_empty() {
        SmokeVerdict::Passed
    } else {
        SmokeVerdict::Failed { failures }
    }
}

/// Truncate a string to at most `max_bytes` bytes, appending "..." if
/// truncated.
pub fn truncate_excerpt(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    // Find a valid UTF-8 boundary near the limit.
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = s[..end].to_owned();
    truncated.push_str("...");
    truncated
}
