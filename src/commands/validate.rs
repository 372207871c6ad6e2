//! Project validation command: static audit plus headless engine checks

use anyhow::{ensure, Context, Result};
use std::path::Path;

use crate::checks::audit::{config, imports, naming, references, structure};
use crate::checks::headless;
use crate::pipeline::{Check, CheckResult, Criticality, Pipeline, PipelineReport, Profile};
use crate::probe;
use crate::ui;

/// Register the validation stages against a project root.
///
/// The static audit stages are always critical. The headless stages only
/// run when the engine binary is present; its absence is a skip on a
/// developer machine and a failure under the CI profile.
pub fn register(pipeline: &mut Pipeline, project: &Path, export_scratch: &Path) {
    let profile = pipeline.profile();
    let root = project.to_path_buf();

    pipeline.stage(
        "Project Structure",
        vec![Check::new("required files", Criticality::Critical, {
            let root = root.clone();
            move || structure::required_files(&root)
        })],
    );

    pipeline.stage(
        "Project Configuration",
        vec![
            Check::new("input map actions", Criticality::Critical, {
                let root = root.clone();
                move || config::input_actions(&root)
            }),
            Check::new("physics layer names", Criticality::Critical, {
                let root = root.clone();
                move || config::physics_layers(&root)
            }),
        ],
    );

    pipeline.stage(
        "Asset Conventions",
        vec![
            Check::new("mesh naming", Criticality::Critical, {
                let root = root.clone();
                move || naming::mesh_naming(&root)
            }),
            Check::new("texture imports", Criticality::Critical, {
                let root = root.clone();
                move || imports::texture_imports(&root)
            }),
        ],
    );

    pipeline.stage(
        "Resource References",
        vec![Check::new("scene resource references", Criticality::Critical, {
            let root = root.clone();
            move || references::resource_references(&root)
        })],
    );

    match probe::find_engine() {
        Some(engine) => {
            let syntax_root = root.clone();
            let syntax_engine = engine.path.clone();
            let export_root = root.clone();
            let export_engine = engine.path.clone();
            let export_dir = export_scratch.to_path_buf();
            let run_root = root.clone();
            let run_engine = engine.path.clone();

            pipeline.stage(
                "Headless Engine",
                vec![
                    Check::new("syntax validation", Criticality::Critical, move || {
                        headless::syntax_check(&syntax_engine, &syntax_root)
                    }),
                    Check::new("export build", Criticality::Critical, move || {
                        headless::export_build(&export_engine, &export_root, &export_dir)
                    }),
                    Check::new("bounded engine run", Criticality::Critical, move || {
                        headless::bounded_run(&run_engine, &run_root)
                    }),
                ],
            );
        }
        None => {
            pipeline.stage(
                "Headless Engine",
                vec![Check::new(
                    "engine binary",
                    profile.tool_criticality(),
                    move || match profile {
                        Profile::Ci => {
                            let msg =
                                "engine binary required for headless validation".to_string();
                            ui::fail(&msg);
                            CheckResult::fail(vec![msg])
                        }
                        Profile::Interactive => {
                            let msg =
                                "engine binary not found; skipping headless validation".to_string();
                            ui::warn(&msg);
                            CheckResult::skip(msg)
                        }
                    },
                )],
            );
        }
    }
}

/// Run the project validation pipeline
pub fn execute(project: &Path, profile: Profile) -> Result<PipelineReport> {
    ensure!(
        project.is_dir(),
        "project directory {} does not exist",
        project.display()
    );
    println!("Validating project at {}", project.display());

    let scratch = tempfile::tempdir().context("failed to create export scratch directory")?;

    let mut pipeline = Pipeline::new(profile);
    register(&mut pipeline, project, scratch.path());

    let report = pipeline.run();
    report.print_summary();
    Ok(report)
}
