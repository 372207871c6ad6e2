//! Dependency check command: toolchain discovery, versions and smoke tests

use anyhow::{Context, Result};
use std::path::Path;

use crate::checks::{smoke, toolchain};
use crate::pipeline::{Check, CheckResult, Criticality, Pipeline, PipelineReport, Profile};
use crate::probe;
use crate::ui;

/// Register the dependency stages: discovery, versions, smoke tests.
///
/// Tool absence uses the profile-gated criticality; version queries are
/// always advisory. The smoke-test scratch directory is owned by the
/// caller so its lifetime spans the run.
pub fn register(pipeline: &mut Pipeline, smoke_dir: &Path) {
    let tool_criticality = pipeline.profile().tool_criticality();

    let mut discovery: Vec<Check> = toolchain::ESSENTIAL_TOOLS
        .iter()
        .map(|&tool| Check::new(tool, tool_criticality, move || toolchain::tool_presence(tool)))
        .collect();
    discovery.push(Check::new(
        "engine binary",
        tool_criticality,
        toolchain::engine_presence,
    ));
    pipeline.stage("Tool Discovery", discovery);

    pipeline.stage(
        "Versions and Environment",
        vec![
            Check::new("go version", Criticality::Advisory, || {
                toolchain::tool_version("go", &["version"])
            }),
            Check::new("gcc version", Criticality::Advisory, || {
                toolchain::tool_version("gcc", &["--version"])
            }),
            Check::new("g++ version", Criticality::Advisory, || {
                toolchain::tool_version("g++", &["--version"])
            }),
            Check::new("engine version", Criticality::Advisory, toolchain::engine_version),
            Check::new("CGO_ENABLED", Criticality::Advisory, toolchain::cgo_enabled),
        ],
    );

    let run_dir = smoke_dir.to_path_buf();
    let build_dir = smoke_dir.to_path_buf();
    pipeline.stage(
        "Go Runtime Smoke Test",
        vec![Check::new("go run", tool_criticality, move || {
            match probe::find_tool("go") {
                Some(go) => smoke::go_run_smoke(&go, &run_dir),
                None => {
                    let msg = "go absent, runtime smoke test skipped".to_string();
                    ui::skip(&msg);
                    CheckResult::skip(msg)
                }
            }
        })],
    );

    pipeline.stage(
        "Shared Library Build Test",
        vec![Check::new("cgo shared library", tool_criticality, move || {
            match probe::find_tool("go") {
                Some(go) => smoke::shared_library_smoke(&go, &build_dir),
                None => {
                    let msg = "go absent, shared library build skipped".to_string();
                    ui::skip(&msg);
                    CheckResult::skip(msg)
                }
            }
        })],
    );
}

/// Run the dependency check pipeline
pub fn execute(profile: Profile) -> Result<PipelineReport> {
    println!("Starting dependency check...");

    let scratch = tempfile::tempdir().context("failed to create smoke-test scratch directory")?;

    let mut pipeline = Pipeline::new(profile);
    register(&mut pipeline, scratch.path());

    let report = pipeline.run();
    report.print_summary();
    Ok(report)
}
