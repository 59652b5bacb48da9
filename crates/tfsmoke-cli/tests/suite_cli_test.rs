//! Integration tests for the `tfsmoke` binary.
//!
//! These run the compiled CLI against the stub provisioning tool, covering
//! the exit-code contract: 0 when all checks pass, 1 when a marker is
//! missing, 2 when init or plan fails.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use tfsmoke_test_utils::{
    ALL_RESOURCE_TYPES, write_broken_config, write_config, write_fake_tool,
};

fn tfsmoke(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tfsmoke"))
        .args(args)
        .output()
        .expect("failed to run tfsmoke binary")
}

fn write_suite_file(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("tfsmoke.toml");
    std::fs::write(&path, body).expect("failed to write suite file");
    path
}

#[test]
fn run_passes_with_all_markers() {
    let bin_dir = TempDir::new().unwrap();
    let cfg_dir = TempDir::new().unwrap();
    write_config(cfg_dir.path(), ALL_RESOURCE_TYPES);
    let bin = write_fake_tool(bin_dir.path());

    let output = tfsmoke(&[
        "run",
        cfg_dir.path().to_str().unwrap(),
        "--provider",
        "aws",
        "--tool-bin",
        bin.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("All 6 checks passed."), "stdout: {stdout}");
}

#[test]
fn run_exits_1_when_a_marker_is_missing() {
    let bin_dir = TempDir::new().unwrap();
    let cfg_dir = TempDir::new().unwrap();
    let types: Vec<&str> = ALL_RESOURCE_TYPES
        .iter()
        .copied()
        .filter(|t| *t != "aws_instance")
        .collect();
    write_config(cfg_dir.path(), &types);
    let bin = write_fake_tool(bin_dir.path());

    let output = tfsmoke(&[
        "run",
        cfg_dir.path().to_str().unwrap(),
        "--provider",
        "aws",
        "--tool-bin",
        bin.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "stdout: {stdout}");
    assert!(stdout.contains("FAIL compute_instance"), "stdout: {stdout}");
    assert!(stdout.contains("PASS virtual_network"), "stdout: {stdout}");
    assert!(
        stdout.contains("1 of 6 checks failed: compute_instance"),
        "stdout: {stdout}"
    );
}

#[test]
fn run_exits_2_on_setup_failure() {
    let bin_dir = TempDir::new().unwrap();
    let cfg_dir = TempDir::new().unwrap();
    write_broken_config(cfg_dir.path());
    let bin = write_fake_tool(bin_dir.path());

    let output = tfsmoke(&[
        "run",
        cfg_dir.path().to_str().unwrap(),
        "--provider",
        "aws",
        "--tool-bin",
        bin.to_str().unwrap(),
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2), "stderr: {stderr}");
    assert!(stderr.contains("Setup failure"), "stderr: {stderr}");
    // No check appears in the output, failed or otherwise.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("PASS"), "stdout: {stdout}");
    assert!(!stdout.contains("FAIL"), "stdout: {stdout}");
}

#[test]
fn run_emits_machine_readable_json() {
    let bin_dir = TempDir::new().unwrap();
    let cfg_dir = TempDir::new().unwrap();
    write_config(cfg_dir.path(), &["aws_vpc"]);
    let bin = write_fake_tool(bin_dir.path());

    let output = tfsmoke(&[
        "run",
        cfg_dir.path().to_str().unwrap(),
        "--marker",
        "virtual_network=aws_vpc",
        "--tool-bin",
        bin.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["tool"], "terraform");
    assert_eq!(report["verdict"]["status"], "passed");
    assert!(
        report["plan_output"]
            .as_str()
            .unwrap()
            .contains("aws_vpc")
    );
}

#[test]
fn suite_file_drives_a_run() {
    let bin_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let cfg_dir = project.path().join("infra");
    std::fs::create_dir(&cfg_dir).unwrap();
    write_config(&cfg_dir, ALL_RESOURCE_TYPES);
    let bin = write_fake_tool(bin_dir.path());

    let suite = write_suite_file(
        project.path(),
        r#"
[suite]
name = "web stack"
dir = "infra"
provider = "aws"
"#,
    );

    let output = tfsmoke(&[
        "suite",
        suite.to_str().unwrap(),
        "--tool-bin",
        bin.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("All 6 checks passed."), "stdout: {stdout}");
}

#[test]
fn validate_reports_resolved_checks() {
    let project = TempDir::new().unwrap();
    let suite = write_suite_file(
        project.path(),
        r#"
[suite]
name = "web stack"
dir = "infra"
provider = "aws"

[[checks]]
name = "queue"
marker = "aws_sqs_queue"
"#,
    );

    let output = tfsmoke(&["validate", suite.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("7 checks"), "stdout: {stdout}");
    assert!(stdout.contains("aws_sqs_queue"), "stdout: {stdout}");
}

#[test]
fn validate_rejects_a_bad_suite() {
    let project = TempDir::new().unwrap();
    let suite = write_suite_file(
        project.path(),
        r#"
[suite]
name = "empty"
dir = "infra"
"#,
    );

    let output = tfsmoke(&["validate", suite.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no checks"), "stderr: {stderr}");
}

#[test]
fn plan_prints_the_raw_report() {
    let bin_dir = TempDir::new().unwrap();
    let cfg_dir = TempDir::new().unwrap();
    write_config(cfg_dir.path(), &["aws_vpc", "aws_s3_bucket"]);
    let bin = write_fake_tool(bin_dir.path());

    let output = tfsmoke(&[
        "plan",
        cfg_dir.path().to_str().unwrap(),
        "--tool-bin",
        bin.to_str().unwrap(),
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("Plan: 2 to add"), "stdout: {stdout}");
    assert!(stdout.contains("aws_s3_bucket"), "stdout: {stdout}");
}

#[test]
fn markers_lists_the_aws_presets() {
    let output = tfsmoke(&["markers", "--provider", "aws"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for marker in ALL_RESOURCE_TYPES {
        assert!(stdout.contains(marker), "missing {marker} in: {stdout}");
    }
}
