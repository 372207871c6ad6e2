//! End-to-end static audit behavior over complete project fixtures

use std::fs;

use gdcheck::checks::audit::{config, imports, naming, references, structure};
use gdcheck::pipeline::CheckStatus;

use super::helpers::{complete_project_config, init_valid_project};

#[test]
fn test_valid_project_passes_every_audit_check() {
    let project = init_valid_project();
    let root = project.path();

    assert!(structure::required_files(root).passed());
    assert!(config::input_actions(root).passed());
    assert!(config::physics_layers(root).passed());
    assert!(naming::mesh_naming(root).passed());
    assert!(imports::texture_imports(root).passed());
    assert!(references::resource_references(root).passed());
}

#[test]
fn test_deleting_required_file_breaks_only_structure_check() {
    let project = init_valid_project();
    let root = project.path();
    fs::remove_file(root.join("scripts/utils/FPSCounter.gd")).unwrap();

    let result = structure::required_files(root);
    assert_eq!(result.status, CheckStatus::Failed);
    assert!(result
        .messages
        .iter()
        .any(|m| m.contains("scripts/utils/FPSCounter.gd")));

    // the other checks are independent of the deleted script
    assert!(config::input_actions(root).passed());
    assert!(references::resource_references(root).passed());
}

#[test]
fn test_config_token_removal_and_restore_is_idempotent() {
    let project = init_valid_project();
    let root = project.path();
    let full = complete_project_config();

    let without_restart = full.replace("restart=", "restart_disabled=");
    fs::write(root.join("project.godot"), &without_restart).unwrap();
    let result = config::input_actions(root);
    assert_eq!(result.status, CheckStatus::Failed);
    assert!(result.messages.iter().any(|m| m.contains("restart")));

    fs::write(root.join("project.godot"), &full).unwrap();
    assert!(config::input_actions(root).passed());
}

#[test]
fn test_dangling_scene_reference_round_trip() {
    let project = init_valid_project();
    let root = project.path();

    fs::write(
        root.join("scenes/ui/hud.tscn"),
        "[gd_scene format=3]\n\n[ext_resource path=\"res://missing/thing.png\" id=\"1\"]\n",
    )
    .unwrap();

    let broken = references::resource_references(root);
    assert_eq!(broken.status, CheckStatus::Failed);
    assert!(broken.messages[0].contains("res://missing/thing.png"));

    let target = root.join("missing/thing.png");
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "png").unwrap();
    assert!(references::resource_references(root).passed());
}

#[test]
fn test_collision_suffix_conventions() {
    let project = init_valid_project();
    let root = project.path();
    let meshes = root.join("assets/meshes");
    fs::create_dir_all(&meshes).unwrap();

    fs::write(meshes.join("snake_head-col.glb"), "glTF").unwrap();
    assert!(naming::mesh_naming(root).passed());

    fs::write(meshes.join("snake_body_col.glb"), "glTF").unwrap();
    let result = naming::mesh_naming(root);
    assert_eq!(result.status, CheckStatus::Failed);
    assert!(result.messages[0].contains("snake_body_col.glb"));
}

#[test]
fn test_uncompressed_texture_import_is_flagged() {
    let project = init_valid_project();
    let root = project.path();

    fs::write(
        root.join("assets/textures/ui_icon.png.import"),
        "[remap]\n\nimporter=\"texture\"\ntype=\"ImageTexture\"\n",
    )
    .unwrap();

    let result = imports::texture_imports(root);
    assert_eq!(result.status, CheckStatus::Failed);
    assert!(result.messages[0].contains("ui_icon.png.import"));
}
