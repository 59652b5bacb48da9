//! Plan invocation options.

use std::path::PathBuf;
use std::time::Duration;

/// Default per-step timeout. Generous on purpose: a plan against a real
/// backend can legitimately take minutes, and CI has its own limits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Options for one init-and-plan invocation.
///
/// Immutable once constructed: build it at the start of a run with the
/// `with_*` methods and hand it to the tool by reference.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Target configuration directory.
    pub dir: PathBuf,
    /// Suppress ANSI color codes in tool output. Defaults to `true` so
    /// substring checks never trip over escape sequences.
    pub no_color: bool,
    /// `-var key=value` assignments, in declaration order.
    pub vars: Vec<(String, String)>,
    /// `-var-file` paths, in declaration order.
    pub var_files: Vec<PathBuf>,
    /// Extra arguments appended verbatim to the plan step.
    pub extra_args: Vec<String>,
    /// Extra environment variables for the tool process.
    pub env: Vec<(String, String)>,
    /// Per-step timeout; the child is killed on expiry.
    pub timeout: Duration,
}

impl PlanOptions {
    /// Options for the given configuration directory, with defaults for
    /// everything else.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            no_color: true,
            vars: Vec::new(),
            var_files: Vec::new(),
            extra_args: Vec::new(),
            env: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Enable or disable color suppression.
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Add a `-var key=value` assignment.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    /// Add a `-var-file` path.
    pub fn with_var_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_files.push(path.into());
        self
    }

    /// Append a verbatim extra argument to the plan step.
    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Add an environment variable for the tool process.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Override the per-step timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_suppress_color() {
        let opts = PlanOptions::new("/tmp/cfg");
        assert!(opts.no_color);
        assert_eq!(opts.timeout, DEFAULT_TIMEOUT);
        assert!(opts.vars.is_empty());
        assert!(opts.env.is_empty());
    }

    #[test]
    fn builders_accumulate_in_order() {
        let opts = PlanOptions::new("/tmp/cfg")
            .with_var("region", "eu-west-1")
            .with_var("env", "staging")
            .with_var_file("common.tfvars")
            .with_env("TF_LOG", "ERROR")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(
            opts.vars,
            vec![
                ("region".to_owned(), "eu-west-1".to_owned()),
                ("env".to_owned(), "staging".to_owned()),
            ]
        );
        assert_eq!(opts.var_files, vec![PathBuf::from("common.tfvars")]);
        assert_eq!(opts.env, vec![("TF_LOG".to_owned(), "ERROR".to_owned())]);
        assert_eq!(opts.timeout, Duration::from_secs(30));
    }
}
