//! Profile-sensitive severity: developer machine vs CI gate

use std::env;

use serial_test::serial;
use tempfile::TempDir;

use gdcheck::commands::validate;
use gdcheck::pipeline::{Pipeline, Profile};

use super::helpers::{init_valid_project, with_path_dir};

/// Run `f` with PATH pointing at an empty directory so no tool resolves
fn with_empty_path<T>(f: impl FnOnce() -> T) -> T {
    let empty = TempDir::new().unwrap();
    with_path_dir(empty.path(), f)
}

#[test]
#[serial]
fn test_engine_absence_fails_under_ci_profile() {
    let project = init_valid_project();
    let scratch = TempDir::new().unwrap();

    let report = with_empty_path(|| {
        let mut pipeline = Pipeline::new(Profile::Ci);
        validate::register(&mut pipeline, project.path(), scratch.path());
        pipeline.run()
    });

    assert!(!report.overall_success());
    assert_eq!(report.exit_code(), 1);
    assert!(report.failed_critical().contains(&"engine binary"));
}

#[test]
#[serial]
fn test_engine_absence_is_tolerated_interactively() {
    let project = init_valid_project();
    let scratch = TempDir::new().unwrap();

    let report = with_empty_path(|| {
        let mut pipeline = Pipeline::new(Profile::Interactive);
        validate::register(&mut pipeline, project.path(), scratch.path());
        pipeline.run()
    });

    // same absence, same project: the run still succeeds
    assert!(report.overall_success());
    assert_eq!(report.exit_code(), 0);
}

#[test]
#[serial]
fn test_broken_project_fails_regardless_of_profile() {
    let project = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    let report = with_empty_path(|| {
        let mut pipeline = Pipeline::new(Profile::Interactive);
        validate::register(&mut pipeline, project.path(), scratch.path());
        pipeline.run()
    });

    assert!(!report.overall_success());
    assert!(report.failed_critical().contains(&"required files"));
}

#[test]
#[serial]
fn test_profile_detection_from_ci_marker() {
    let saved = env::var_os("CI");

    env::set_var("CI", "true");
    assert_eq!(Profile::detect(), Profile::Ci);

    env::set_var("CI", "false");
    assert_eq!(Profile::detect(), Profile::Interactive);

    env::set_var("CI", "0");
    assert_eq!(Profile::detect(), Profile::Interactive);

    env::remove_var("CI");
    assert_eq!(Profile::detect(), Profile::Interactive);

    match saved {
        Some(value) => env::set_var("CI", value),
        None => env::remove_var("CI"),
    }
}
