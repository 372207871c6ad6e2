//! PATH probing and version queries for external tools

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::exec::run_with_timeout;

/// Wait budget for a `--version`-style invocation
const VERSION_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Binary names under which the Godot editor may be installed
pub const ENGINE_BINARY_NAMES: &[&str] = &["godot", "godot4"];

/// A resolved engine binary: the name it answers to and where it lives
#[derive(Debug, Clone)]
pub struct EngineBinary {
    pub command_name: String,
    pub path: PathBuf,
}

/// Resolve a tool on the search path
pub fn find_tool(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find the engine under any of its accepted binary names
pub fn find_engine() -> Option<EngineBinary> {
    for name in ENGINE_BINARY_NAMES {
        if let Some(path) = find_tool(name) {
            return Some(EngineBinary {
                command_name: (*name).to_string(),
                path,
            });
        }
    }
    None
}

/// Query a tool's version string by running it with the given arguments.
///
/// Returns the first non-empty output line. Launch errors, non-zero exits
/// and timeouts all come back as `None`; callers report that as a warning,
/// never a hard failure.
pub fn query_version(program: &Path, args: &[&str]) -> Option<String> {
    let outcome = run_with_timeout(program, args, None, VERSION_QUERY_TIMEOUT).ok()?;
    if !outcome.success() {
        return None;
    }
    outcome
        .combined_output()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
