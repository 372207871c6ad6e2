//! Required-file presence check

use std::path::Path;

use crate::pipeline::CheckResult;
use crate::ui;

/// Files the project cannot function without, relative to the project root
pub const REQUIRED_FILES: &[&str] = &[
    "project.godot",
    "scenes/main/main.tscn",
    "scenes/ui/hud.tscn",
    "scenes/main/SnakeHead.tscn",
    "scripts/core/SnakeHead.gd",
    "scripts/core/CameraManager.gd",
    "scripts/utils/FPSCounter.gd",
];

/// Verify every required file exists; each missing path is its own failure
pub fn required_files(root: &Path) -> CheckResult {
    let mut missing = Vec::new();

    for rel in REQUIRED_FILES {
        if !root.join(rel).exists() {
            let msg = format!("missing file: {rel}");
            ui::fail(&msg);
            missing.push(msg);
        }
    }

    if missing.is_empty() {
        ui::ok(&format!("all {} required files present", REQUIRED_FILES.len()));
        CheckResult::pass()
    } else {
        CheckResult::fail(missing)
    }
}
