//! Core library for tfsmoke: a plan smoke-test harness for declarative
//! infrastructure tools.
//!
//! The harness drives an external provisioning tool (Terraform or OpenTofu)
//! through its init-and-plan sequence against a configuration directory,
//! captures the textual plan report, and evaluates a set of independent
//! substring checks ("markers") against it. The tool is an opaque
//! collaborator: tfsmoke never parses the plan structurally, it only scans
//! the rendered text.

pub mod check;
pub mod exec;
pub mod presets;
pub mod smoke;
pub mod suite;
pub mod tool;
