//! Full pipeline command: dependency stages followed by validation stages

use anyhow::{ensure, Context, Result};
use std::fs;
use std::path::Path;

use crate::commands::{deps, validate};
use crate::pipeline::{Pipeline, PipelineReport, Profile};

/// Run every stage against one shared report
pub fn execute(project: &Path, profile: Profile) -> Result<PipelineReport> {
    ensure!(
        project.is_dir(),
        "project directory {} does not exist",
        project.display()
    );
    println!("Running full validation pipeline...");

    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;
    let smoke_dir = scratch.path().join("smoke");
    let export_dir = scratch.path().join("export");
    fs::create_dir_all(&smoke_dir).context("failed to create smoke-test scratch directory")?;
    fs::create_dir_all(&export_dir).context("failed to create export scratch directory")?;

    let mut pipeline = Pipeline::new(profile);
    deps::register(&mut pipeline, &smoke_dir);
    validate::register(&mut pipeline, project, &export_dir);

    let report = pipeline.run();
    report.print_summary();
    Ok(report)
}
