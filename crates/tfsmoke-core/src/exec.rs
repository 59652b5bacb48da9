//! Captured subprocess execution.
//!
//! Runs a command in a working directory with stdout and stderr piped,
//! reading both concurrently with the exit wait so a chatty child cannot
//! deadlock on a full pipe buffer. The whole invocation runs under a
//! timeout; on expiry the child is killed.

use std::path::Path;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Errors from spawning or waiting on a captured subprocess.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The binary could not be spawned (not found, not executable, ...).
    #[error("failed to spawn {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child process failed.
    #[error("failed to wait on {program:?}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process did not exit within the allotted time and was killed.
    #[error("{program:?} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },
}

/// The captured outcome of one subprocess run.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl ExecResult {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `program` with `args` in `working_dir`, capturing output.
///
/// Extra environment variables are appended to the inherited environment.
/// The child is killed if it does not exit within `timeout`.
pub async fn run_captured(
    program: &str,
    args: &[String],
    working_dir: &Path,
    env: &[(String, String)],
    timeout: Duration,
) -> Result<ExecResult, ExecError> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(working_dir)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());
    for (key, value) in env {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().map_err(|e| ExecError::Spawn {
        program: program.to_owned(),
        source: e,
    })?;

    // Take the pipe handles so output can be drained concurrently with
    // waiting for the process to exit.
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let read_stdout = async {
        let mut buf = Vec::new();
        if let Some(ref mut pipe) = stdout_pipe {
            pipe.read_to_end(&mut buf).await.ok();
        }
        String::from_utf8_lossy(&buf).into_owned()
    };

    let read_stderr = async {
        let mut buf = Vec::new();
        if let Some(ref mut pipe) = stderr_pipe {
            pipe.read_to_end(&mut buf).await.ok();
        }
        String::from_utf8_lossy(&buf).into_owned()
    };

    match tokio::time::timeout(timeout, async {
        let (wait_result, stdout, stderr) = tokio::join!(child.wait(), read_stdout, read_stderr);
        (wait_result, stdout, stderr)
    })
    .await
    {
        Ok((Ok(status), stdout, stderr)) => Ok(ExecResult {
            exit_code: status.code(),
            stdout,
            stderr,
            duration: start.elapsed(),
        }),
        Ok((Err(e), _, _)) => Err(ExecError::Wait {
            program: program.to_owned(),
            source: e,
        }),
        Err(_) => {
            let _ = child.kill().await;
            Err(ExecError::Timeout {
                program: program.to_owned(),
                secs: timeout.as_secs(),
            })
        }
    }
}
