//! Toolchain presence, version and environment checks

use std::path::Path;
use std::time::Duration;

use crate::exec::run_with_timeout;
use crate::pipeline::CheckResult;
use crate::probe::{find_engine, find_tool, query_version, ENGINE_BINARY_NAMES};
use crate::ui;

/// Tools the game's build chain cannot do without
pub const ESSENTIAL_TOOLS: &[&str] = &["go", "gcc", "g++"];

const ENV_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Is the named tool reachable on the search path?
pub fn tool_presence(name: &str) -> CheckResult {
    match find_tool(name) {
        Some(path) => {
            ui::ok(&format!("found {name} at {}", path.display()));
            CheckResult::pass()
        }
        None => {
            let msg = format!("{name} not found in PATH");
            ui::fail(&msg);
            CheckResult::fail(vec![msg])
        }
    }
}

/// Is the engine installed under any of its accepted binary names?
///
/// Absence is reported as a warning; how much it matters is decided by the
/// criticality the caller attaches to this check.
pub fn engine_presence() -> CheckResult {
    match find_engine() {
        Some(engine) => {
            ui::ok(&format!(
                "found engine as '{}' at {}",
                engine.command_name,
                engine.path.display()
            ));
            CheckResult::pass()
        }
        None => {
            let msg = format!(
                "engine not found in PATH (tried {})",
                ENGINE_BINARY_NAMES.join(", ")
            );
            ui::warn(&msg);
            CheckResult::fail(vec![msg])
        }
    }
}

/// Report a tool's version string.
///
/// Skipped when the tool is absent (presence has its own check); a present
/// tool that cannot answer a version query is a reportable failure.
pub fn tool_version(name: &str, version_args: &'static [&'static str]) -> CheckResult {
    let Some(path) = find_tool(name) else {
        let msg = format!("{name} absent, version query skipped");
        ui::skip(&msg);
        return CheckResult::skip(msg);
    };

    match query_version(&path, version_args) {
        Some(version) => {
            ui::info(&format!("{name} version: {version}"));
            CheckResult::pass()
        }
        None => {
            let msg = format!("failed to query {name} version");
            ui::fail(&msg);
            CheckResult::fail(vec![msg])
        }
    }
}

/// Report the engine's version string, trying its accepted binary names
pub fn engine_version() -> CheckResult {
    let Some(engine) = find_engine() else {
        let msg = "engine absent, version query skipped".to_string();
        ui::skip(&msg);
        return CheckResult::skip(msg);
    };

    match query_version(&engine.path, &["--version"]) {
        Some(version) => {
            ui::info(&format!("engine version: {version}"));
            CheckResult::pass()
        }
        None => {
            let msg = format!("failed to query {} version", engine.command_name);
            ui::fail(&msg);
            CheckResult::fail(vec![msg])
        }
    }
}

/// Verify CGO is enabled so shared-library builds can work.
///
/// A disabled CGO is a warning, not a failure: the build smoke test will
/// surface the hard evidence.
pub fn cgo_enabled() -> CheckResult {
    let Some(go) = find_tool("go") else {
        let msg = "go absent, CGO check skipped".to_string();
        ui::skip(&msg);
        return CheckResult::skip(msg);
    };

    cgo_enabled_with(&go)
}

fn cgo_enabled_with(go: &Path) -> CheckResult {
    let outcome = match run_with_timeout(go, &["env", "CGO_ENABLED"], None, ENV_QUERY_TIMEOUT) {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = format!("failed to query go env: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    if !outcome.success() {
        let msg = format!(
            "go env CGO_ENABLED failed: {}",
            outcome.stderr.trim()
        );
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    let value = outcome.stdout.trim().to_string();
    ui::info(&format!("CGO_ENABLED: {value}"));
    if value != "1" {
        ui::warn("CGO_ENABLED is not 1; shared library builds will fail");
    }
    CheckResult::pass()
}
