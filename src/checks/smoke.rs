//! Go/CGO runtime smoke tests
//!
//! Exercises the Go toolchain end to end in a scratch directory: run a
//! trivial program, then build it as a C shared library and confirm the
//! artifact actually landed on disk. A build that exits 0 without
//! producing the library is reported as a failure.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::exec::run_with_timeout;
use crate::pipeline::CheckResult;
use crate::ui;

/// Shared library artifact the CGO build must produce
pub const SHARED_LIB_NAME: &str = "libgdsmoke.so";

/// Header emitted alongside the shared library by the CGO build
const SHARED_HEADER_NAME: &str = "libgdsmoke.h";

const SMOKE_SOURCE_NAME: &str = "main.go";

const GO_RUN_TIMEOUT: Duration = Duration::from_secs(60);
const GO_BUILD_TIMEOUT: Duration = Duration::from_secs(120);

/// Minimal program exercising both a plain run and a CGO export
const SMOKE_PROGRAM: &str = r#"package main

import "fmt"
import "C"

//export Ping
func Ping() {
	fmt.Println("ping from the shared library")
}

func main() {
	fmt.Println("go toolchain is alive")
}
"#;

/// Seed the scratch directory with the smoke program
fn write_smoke_program(scratch: &Path) -> Result<(), String> {
    let source = scratch.join(SMOKE_SOURCE_NAME);
    fs::write(&source, SMOKE_PROGRAM)
        .map_err(|e| format!("failed to write {}: {e}", source.display()))
}

/// Compile and run the trivial program with `go run`
pub fn go_run_smoke(go: &Path, scratch: &Path) -> CheckResult {
    if let Err(msg) = write_smoke_program(scratch) {
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    let outcome = match run_with_timeout(
        go,
        &["run", SMOKE_SOURCE_NAME],
        Some(scratch),
        GO_RUN_TIMEOUT,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = format!("go run could not be launched: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    if outcome.timed_out {
        let msg = format!("go run timed out after {}s", GO_RUN_TIMEOUT.as_secs());
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    if outcome.success() {
        ui::ok(&format!("go run successful: {}", outcome.stdout.trim()));
        CheckResult::pass()
    } else {
        let msg = format!("go run failed: {}", outcome.stderr.trim());
        ui::fail(&msg);
        CheckResult::fail(vec![msg])
    }
}

/// Build the program as a C shared library and verify the artifact exists.
///
/// Stale artifacts from a previous run are deleted first so an old library
/// cannot masquerade as a fresh build.
pub fn shared_library_smoke(go: &Path, scratch: &Path) -> CheckResult {
    if let Err(msg) = write_smoke_program(scratch) {
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    for stale in [SHARED_LIB_NAME, SHARED_HEADER_NAME] {
        let path = scratch.join(stale);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                let msg = format!("failed to remove stale artifact {}: {e}", path.display());
                ui::fail(&msg);
                return CheckResult::fail(vec![msg]);
            }
        }
    }

    let outcome = match run_with_timeout(
        go,
        &[
            "build",
            "-buildmode=c-shared",
            "-o",
            SHARED_LIB_NAME,
            SMOKE_SOURCE_NAME,
        ],
        Some(scratch),
        GO_BUILD_TIMEOUT,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            let msg = format!("shared library build could not be launched: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    if outcome.timed_out {
        let msg = format!(
            "shared library build timed out after {}s",
            GO_BUILD_TIMEOUT.as_secs()
        );
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    if !outcome.success() {
        let msg = format!(
            "shared library build failed (is CGO enabled and gcc/g++ working?): {}",
            outcome.stderr.trim()
        );
        ui::fail(&msg);
        return CheckResult::fail(vec![msg]);
    }

    // Exit code 0 is only half the story: the library must exist on disk.
    if scratch.join(SHARED_LIB_NAME).exists() {
        ui::ok(&format!(
            "shared library build successful: {SHARED_LIB_NAME} created"
        ));
        CheckResult::pass()
    } else {
        let msg = format!("build claimed success but {SHARED_LIB_NAME} was not created");
        ui::fail(&msg);
        CheckResult::fail(vec![msg])
    }
}
