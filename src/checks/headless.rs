//! Headless engine invocations
//!
//! Three escalating probes of the project through the engine binary:
//! syntax-only validation, an export build, and a frame-bounded run. Each
//! outcome combines the exit code with a scan of the combined output for
//! error markers, because the engine can exit 0 while logging a runtime
//! error.

use std::fs;
use std::path::Path;
use std::time::Duration;

use regex::Regex;

use crate::exec::{run_with_timeout, ExecOutcome};
use crate::pipeline::CheckResult;
use crate::ui;

/// Substrings marking an error in engine output, matched case-insensitively
pub const ERROR_MARKERS: &[&str] = &[
    "error:",
    "script error",
    "parse error",
    "compile error",
    "failed to load",
    "invalid call",
    "fatal",
];

/// Export pack artifact written into the scratch directory
pub const EXPORT_PACK_NAME: &str = "export.pck";

const EXPORT_PRESETS_FILE: &str = "export_presets.cfg";

const SYNTAX_TIMEOUT: Duration = Duration::from_secs(60);
const EXPORT_TIMEOUT: Duration = Duration::from_secs(120);
const RUN_TIMEOUT: Duration = Duration::from_secs(45);

/// Frames the bounded run lets the game advance before quitting
const FRAME_BUDGET: &str = "60";

/// Lines of combined output whose lowercase form contains an error marker
fn error_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| {
            let lowered = line.to_lowercase();
            ERROR_MARKERS.iter().any(|marker| lowered.contains(marker))
        })
        .map(str::to_string)
        .collect()
}

/// Parse the project without running it, catching script syntax errors
pub fn syntax_check(engine: &Path, root: &Path) -> CheckResult {
    let root_arg = root.display().to_string();
    let args = [
        "--headless",
        "--editor",
        "--quit",
        "--check-only",
        "--path",
        &root_arg,
    ];

    let outcome = match run_with_timeout(engine, &args, Some(root), SYNTAX_TIMEOUT) {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = format!("engine could not be launched: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    if outcome.timed_out {
        let msg = format!(
            "syntax validation timed out after {}s",
            SYNTAX_TIMEOUT.as_secs()
        );
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    classify("syntax validation", &outcome)
}

/// Export the project as a pack file and verify the artifact exists.
///
/// Projects without an `export_presets.cfg` have nothing to export and
/// are skipped rather than failed.
pub fn export_build(engine: &Path, root: &Path, scratch: &Path) -> CheckResult {
    let Some(preset) = first_preset_name(root) else {
        let msg = format!("no {EXPORT_PRESETS_FILE} in project, export not attempted");
        ui::skip(&msg);
        return CheckResult::skip(msg);
    };

    let pack = scratch.join(EXPORT_PACK_NAME);
    if pack.exists() {
        if let Err(e) = fs::remove_file(&pack) {
            let msg = format!("failed to remove stale export pack: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    }

    let root_arg = root.display().to_string();
    let pack_arg = pack.display().to_string();
    let args = [
        "--headless",
        "--path",
        &root_arg,
        "--export-pack",
        preset.as_str(),
        &pack_arg,
    ];

    let outcome = match run_with_timeout(engine, &args, Some(root), EXPORT_TIMEOUT) {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = format!("engine could not be launched: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    if outcome.timed_out {
        let msg = format!("export timed out after {}s", EXPORT_TIMEOUT.as_secs());
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    let result = classify(&format!("export (preset '{preset}')"), &outcome);
    if !result.passed() {
        return result;
    }

    // Exit code and logs look clean; the pack file is the proof.
    if pack.exists() {
        ui::ok(&format!("export produced {EXPORT_PACK_NAME}"));
        CheckResult::pass()
    } else {
        let msg = format!("export claimed success but {EXPORT_PACK_NAME} was not created");
        ui::fail(&msg);
        CheckResult::fail(vec![msg])
    }
}

/// Run the game headlessly for a bounded number of frames.
///
/// A process still alive at the deadline is assumed to have initialized
/// correctly and is reported as a pass with a warning; only a crash or a
/// logged error within the window fails the check.
pub fn bounded_run(engine: &Path, root: &Path) -> CheckResult {
    bounded_run_with(engine, root, RUN_TIMEOUT)
}

fn bounded_run_with(engine: &Path, root: &Path, timeout: Duration) -> CheckResult {
    let root_arg = root.display().to_string();
    let args = [
        "--headless",
        "--path",
        &root_arg,
        "--quit-after",
        FRAME_BUDGET,
    ];

    let outcome = match run_with_timeout(engine, &args, Some(root), timeout) {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = format!("engine could not be launched: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    if outcome.timed_out {
        ui::warn(&format!(
            "engine still running after {}s; assuming it initialized correctly",
            timeout.as_secs()
        ));
        return CheckResult::pass();
    }

    classify(&format!("{FRAME_BUDGET}-frame run"), &outcome)
}

/// Shared exit-code × output-marker classification
fn classify(mode: &str, outcome: &ExecOutcome) -> CheckResult {
    let errors = error_lines(&outcome.combined_output());

    if outcome.success() && errors.is_empty() {
        ui::ok(&format!("{mode} passed"));
        return CheckResult::pass();
    }

    let mut messages = Vec::new();
    if !outcome.success() {
        let msg = format!("{mode} exited with code {:?}", outcome.exit_code);
        ui::fail(&msg);
        messages.push(msg);
    }
    for line in errors {
        let msg = format!("{mode} logged: {line}");
        ui::fail(&msg);
        messages.push(msg);
    }
    CheckResult::fail(messages)
}

/// First preset name declared in export_presets.cfg, if any
fn first_preset_name(root: &Path) -> Option<String> {
    let content = fs::read_to_string(root.join(EXPORT_PRESETS_FILE)).ok()?;
    let regex = Regex::new(r#"name="([^"]+)""#).ok()?;
    regex
        .captures(&content)
        .map(|capture| capture[1].to_string())
}
