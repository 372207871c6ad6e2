//! Bounded subprocess execution with full output capture
//!
//! Every external invocation in this tool goes through [`run_with_timeout`]:
//! spawn, drain stdout/stderr concurrently, wait with a deadline, kill on
//! expiry. Checks then classify the captured [`ExecOutcome`] themselves.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use wait_timeout::ChildExt;

/// Timeout for collecting output from child process pipes
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum captured size per stream (1MB). The checks only scan output for
/// short marker strings, so anything beyond this is noise.
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of one bounded subprocess invocation
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Whether the process was killed because it exceeded its deadline
    pub timed_out: bool,
    pub duration: Duration,
}

impl ExecOutcome {
    /// True only for a clean exit: code 0 and no timeout
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// stdout and stderr concatenated, for marker scanning
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined
    }
}

/// Run an external command with a bounded wait, capturing all output.
///
/// A timeout is not an `Err`: the child is killed and reaped, and the
/// outcome comes back with `timed_out` set and no exit code. Errors are
/// reserved for failures to launch or wait at all.
pub fn run_with_timeout(
    program: &Path,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<ExecOutcome, ExecError> {
    let start = Instant::now();
    let mut child = spawn_captured(program, args, cwd)?;

    // Start reading output BEFORE waiting for exit. If we wait first, the
    // child may block on write() when the pipe buffer fills up (~64KB on
    // Linux), causing a deadlock. Drain the pipes concurrently with the wait.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let (stdout_tx, stdout_rx) = mpsc::channel();
    let (stderr_tx, stderr_rx) = mpsc::channel();

    if let Some(stdout) = stdout_handle {
        thread::spawn(move || {
            let result = read_stream_to_string(stdout);
            let _ = stdout_tx.send(result);
        });
    } else {
        let _ = stdout_tx.send(String::new());
    }

    if let Some(stderr) = stderr_handle {
        thread::spawn(move || {
            let result = read_stream_to_string(stderr);
            let _ = stderr_tx.send(result);
        });
    } else {
        let _ = stderr_tx.send(String::new());
    }

    let wait_result = child.wait_timeout(timeout).map_err(|source| ExecError::Wait {
        program: program.display().to_string(),
        source,
    })?;

    if wait_result.is_none() {
        // Deadline expired. Kill, then reap the zombie; the reader threads
        // unblock once the pipes close.
        let _ = child.kill();
        let _ = child.wait();
    }

    let stdout = stdout_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_else(|_| "[output collection timed out]".to_string());
    let stderr = stderr_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_else(|_| "[output collection timed out]".to_string());

    let duration = start.elapsed();

    Ok(match wait_result {
        Some(status) => ExecOutcome {
            exit_code: status.code(),
            stdout,
            stderr,
            timed_out: false,
            duration,
        },
        None => ExecOutcome {
            exit_code: None,
            stdout,
            stderr,
            timed_out: true,
            duration,
        },
    })
}

fn spawn_captured(program: &Path, args: &[&str], cwd: Option<&Path>) -> Result<Child, ExecError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    cmd.spawn().map_err(|source| ExecError::Launch {
        program: program.display().to_string(),
        source,
    })
}

/// Read a stream to string, truncating at [`MAX_OUTPUT_SIZE`].
///
/// The stream is drained even past the cap so the child never hits a
/// broken pipe while we are still waiting on it.
fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = MAX_OUTPUT_SIZE.saturating_sub(buf.len());
                let to_copy = n.min(remaining);
                buf.extend_from_slice(&chunk[..to_copy]);
                if to_copy < n {
                    let mut discard = [0u8; 8192];
                    while stream.read(&mut discard).unwrap_or(0) > 0 {}
                    buf.extend_from_slice(b"\n[output truncated at 1MB]");
                    break;
                }
            }
            Err(_) => {
                if buf.is_empty() {
                    return "[error reading output]".to_string();
                }
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}
