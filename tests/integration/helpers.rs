//! Shared test helpers: project fixtures and mock executables

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use gdcheck::checks::audit::config::{REQUIRED_ACTIONS, REQUIRED_LAYERS};
use gdcheck::checks::audit::structure::REQUIRED_FILES;

/// Build a project.godot carrying every required action and layer name
pub fn complete_project_config() -> String {
    let mut content = String::from("config_version=5\n\n[input]\n\n");
    for action in REQUIRED_ACTIONS {
        content.push_str(&format!("{action}={{\"deadzone\": 0.5, \"events\": []}}\n"));
    }
    content.push_str("\n[layer_names]\n\n");
    for (i, layer) in REQUIRED_LAYERS.iter().enumerate() {
        content.push_str(&format!("3d_physics/layer_{}=\"{layer}\"\n", i + 1));
    }
    content
}

/// Create a temporary project tree that passes every static audit check
pub fn init_valid_project() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp project");
    let root = temp.path();

    for rel in REQUIRED_FILES {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("failed to create project dirs");
        if *rel == "project.godot" {
            fs::write(&path, complete_project_config()).expect("failed to write config");
        } else if rel.ends_with(".tscn") {
            fs::write(&path, "[gd_scene format=3]\n").expect("failed to write scene");
        } else {
            fs::write(&path, "extends Node\n").expect("failed to write script");
        }
    }

    // one scene referencing a texture that exists, with compressed import metadata
    let texture = root.join("assets/textures/grass.png");
    fs::create_dir_all(texture.parent().unwrap()).unwrap();
    fs::write(&texture, "png").unwrap();
    fs::write(
        root.join("assets/textures/grass.png.import"),
        "[remap]\n\nimporter=\"texture\"\ntype=\"CompressedTexture2D\"\n",
    )
    .unwrap();
    fs::write(
        root.join("scenes/main/main.tscn"),
        "[gd_scene format=3]\n\n[ext_resource type=\"Texture2D\" path=\"res://assets/textures/grass.png\" id=\"1\"]\n",
    )
    .unwrap();

    temp
}

/// Run `f` with PATH replaced by `dir`, restoring the original afterward.
/// Callers must hold the serial-test lock since PATH is process-global.
pub fn with_path_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let saved = std::env::var_os("PATH");
    std::env::set_var("PATH", dir);
    let result = f();
    match saved {
        Some(path) => std::env::set_var("PATH", path),
        None => std::env::remove_var("PATH"),
    }
    result
}

/// Write an executable shell script into `dir` and return its path
pub fn write_mock_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write mock tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to chmod mock tool");
    path
}

/// A mock `go` that answers version/env queries, runs, and builds the
/// artifact named by its `-o` argument
pub fn mock_go_body() -> &'static str {
    r#"case "$1" in
  version) echo "go version go1.22.1 linux/amd64" ;;
  env) echo "1" ;;
  run) echo "go toolchain is alive" ;;
  build)
    out=""
    prev=""
    for a in "$@"; do
      if [ "$prev" = "-o" ]; then out="$a"; fi
      prev="$a"
    done
    [ -n "$out" ] && : > "$out"
    ;;
esac
exit 0"#
}
