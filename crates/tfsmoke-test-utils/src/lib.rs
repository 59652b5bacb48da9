//! Shared test utilities for tfsmoke integration tests.
//!
//! Provides a stub provisioning binary and fixture configuration
//! directories so the test suite never needs a real terraform install or
//! cloud credentials.
//!
//! The stub mimics the init/plan command-line surface:
//! - `init` fails when the directory has no `.tf` files or when a file has
//!   unbalanced braces (standing in for a real syntax error).
//! - `plan` prints one "will be created" entry per `resource` block found
//!   in the configuration, so which markers appear in the report is driven
//!   entirely by the fixture directory.

use std::path::{Path, PathBuf};

/// The six resource types of the canonical AWS smoke fixture.
pub const ALL_RESOURCE_TYPES: &[&str] = &[
    "aws_vpc",
    "aws_instance",
    "aws_autoscaling_group",
    "aws_lb",
    "aws_s3_bucket",
    "aws_iam_role",
];

const FAKE_TOOL_SCRIPT: &str = r#"#!/bin/sh
set -u
cmd="${1:-}"
case "$cmd" in
  init)
    found=0
    for f in ./*.tf; do
      [ -e "$f" ] || break
      found=1
      opens=$(grep -c '{' "$f")
      closes=$(grep -c '}' "$f")
      if [ "$opens" -ne "$closes" ]; then
        echo "Error: Unclosed configuration block in $f" >&2
        exit 1
      fi
    done
    if [ "$found" -eq 0 ]; then
      echo "Error: No configuration files found" >&2
      exit 1
    fi
    echo "Initializing the backend..."
    echo "Stub tool has been successfully initialized!"
    ;;
  plan)
    echo "Stub tool will perform the following actions:"
    echo ""
    count=0
    for addr in $(sed -n 's/^resource "\([a-z0-9_]*\)" "\([a-z0-9_]*\)".*/\1.\2/p' ./*.tf 2>/dev/null); do
      ty=${addr%%.*}
      name=${addr#*.}
      echo "  # $addr will be created"
      echo "  + resource \"$ty\" \"$name\""
      echo ""
      count=$((count + 1))
    done
    echo "Plan: $count to add, 0 to change, 0 to destroy."
    ;;
  *)
    echo "usage: fake-tool init|plan" >&2
    exit 64
    ;;
esac
"#;

/// A stub tool whose plan step never returns, for timeout tests.
const HANGING_TOOL_SCRIPT: &str = r#"#!/bin/sh
case "${1:-}" in
  init) echo "Initializing the backend..." ;;
  plan) sleep 300 ;;
esac
"#;

/// Write the stub provisioning binary into `dir` and return its path.
pub fn write_fake_tool(dir: &Path) -> PathBuf {
    write_script(dir, "fake-tool", FAKE_TOOL_SCRIPT)
}

/// Write a stub whose plan step hangs until killed.
pub fn write_hanging_tool(dir: &Path) -> PathBuf {
    write_script(dir, "hanging-tool", HANGING_TOOL_SCRIPT)
}

/// Write a stub that prints `banner` on every invocation and exits 0.
///
/// Useful for asserting which of several candidate binaries actually ran.
pub fn write_banner_tool(dir: &Path, name: &str, banner: &str) -> PathBuf {
    let body = format!("#!/bin/sh\necho \"{banner}\"\n");
    write_script(dir, name, &body)
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o755);
        std::fs::set_permissions(&path, perms)
            .unwrap_or_else(|e| panic!("failed to chmod {}: {e}", path.display()));
    }

    path
}

/// Write a `main.tf` declaring one resource block per type.
pub fn write_config(dir: &Path, resource_types: &[&str]) {
    let mut config = String::new();
    for (i, ty) in resource_types.iter().enumerate() {
        config.push_str(&format!(
            "resource \"{ty}\" \"r{i}\" {{\n  tags = \"smoke\"\n}}\n\n"
        ));
    }
    std::fs::write(dir.join("main.tf"), config).expect("failed to write main.tf");
}

/// Write a `main.tf` with an unclosed resource block, which the stub's
/// init step rejects the way a real tool rejects a syntax error.
pub fn write_broken_config(dir: &Path) {
    let config = "resource \"aws_vpc\" \"main\" {\n  tags = \"smoke\"\n";
    std::fs::write(dir.join("main.tf"), config).expect("failed to write main.tf");
}
