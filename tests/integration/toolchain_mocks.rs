//! Dependency pipeline driven end to end against mock toolchain binaries

use serial_test::serial;
use tempfile::TempDir;

use gdcheck::commands::deps;
use gdcheck::pipeline::{Pipeline, Profile};

use super::helpers::{mock_go_body, with_path_dir, write_mock_tool};

fn seed_full_toolchain(tools: &TempDir) {
    write_mock_tool(tools.path(), "go", mock_go_body());
    write_mock_tool(tools.path(), "gcc", "echo 'gcc (GCC) 13.2.0'; exit 0");
    write_mock_tool(tools.path(), "g++", "echo 'g++ (GCC) 13.2.0'; exit 0");
    write_mock_tool(
        tools.path(),
        "godot",
        "echo '4.2.2.stable.official'; exit 0",
    );
}

#[test]
#[serial]
fn test_deps_pipeline_succeeds_with_full_mock_toolchain() {
    let tools = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    seed_full_toolchain(&tools);

    let report = with_path_dir(tools.path(), || {
        let mut pipeline = Pipeline::new(Profile::Ci);
        deps::register(&mut pipeline, scratch.path());
        pipeline.run()
    });

    assert!(report.overall_success());
    // the mock build honored its -o argument
    assert!(scratch
        .path()
        .join(gdcheck::checks::smoke::SHARED_LIB_NAME)
        .exists());
}

#[test]
#[serial]
fn test_deps_pipeline_missing_go_fails_only_in_ci() {
    let tools = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    // everything except go
    write_mock_tool(tools.path(), "gcc", "echo 'gcc (GCC) 13.2.0'; exit 0");
    write_mock_tool(tools.path(), "g++", "echo 'g++ (GCC) 13.2.0'; exit 0");
    write_mock_tool(
        tools.path(),
        "godot",
        "echo '4.2.2.stable.official'; exit 0",
    );

    let ci_report = with_path_dir(tools.path(), || {
        let mut pipeline = Pipeline::new(Profile::Ci);
        deps::register(&mut pipeline, scratch.path());
        pipeline.run()
    });
    assert!(!ci_report.overall_success());
    assert!(ci_report.failed_critical().contains(&"go"));

    let interactive_report = with_path_dir(tools.path(), || {
        let mut pipeline = Pipeline::new(Profile::Interactive);
        deps::register(&mut pipeline, scratch.path());
        pipeline.run()
    });
    assert!(interactive_report.overall_success());
    assert_eq!(interactive_report.exit_code(), 0);
}

#[test]
#[serial]
fn test_deps_pipeline_build_lying_about_success_fails_in_ci() {
    let tools = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    seed_full_toolchain(&tools);
    // replace go with one whose build exits 0 but creates nothing
    write_mock_tool(
        tools.path(),
        "go",
        r#"case "$1" in
  version) echo "go version go1.22.1 linux/amd64" ;;
  env) echo "1" ;;
  run) echo "go toolchain is alive" ;;
  build) ;;
esac
exit 0"#,
    );

    let report = with_path_dir(tools.path(), || {
        let mut pipeline = Pipeline::new(Profile::Ci);
        deps::register(&mut pipeline, scratch.path());
        pipeline.run()
    });

    assert!(!report.overall_success());
    assert!(report.failed_critical().contains(&"cgo shared library"));
}
