//! Configuration token checks against project.godot

use std::fs;
use std::path::Path;

use crate::pipeline::CheckResult;
use crate::ui;

const PROJECT_CONFIG: &str = "project.godot";

/// Input-map actions the game binds; matched as exact `<action>=` tokens
pub const REQUIRED_ACTIONS: &[&str] = &["turn_left", "turn_right", "toggle_camera", "restart", "quit"];

/// Physics layers the scenes rely on; matched as quoted names
pub const REQUIRED_LAYERS: &[&str] = &["ground", "snake", "food", "walls"];

fn read_project_config(root: &Path) -> Result<String, String> {
    let path = root.join(PROJECT_CONFIG);
    fs::read_to_string(&path).map_err(|e| format!("failed to read {PROJECT_CONFIG}: {e}"))
}

/// Every required input action must be declared in the input map
pub fn input_actions(root: &Path) -> CheckResult {
    let content = match read_project_config(root) {
        Ok(content) => content,
        Err(msg) => {
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    let mut missing = Vec::new();
    for action in REQUIRED_ACTIONS {
        if !content.contains(&format!("{action}=")) {
            let msg = format!("missing input map action: {action}");
            ui::fail(&msg);
            missing.push(msg);
        }
    }

    if missing.is_empty() {
        ui::ok(&format!(
            "all {} input actions declared",
            REQUIRED_ACTIONS.len()
        ));
        CheckResult::pass()
    } else {
        CheckResult::fail(missing)
    }
}

/// Every required physics layer must be named in the configuration
pub fn physics_layers(root: &Path) -> CheckResult {
    let content = match read_project_config(root) {
        Ok(content) => content,
        Err(msg) => {
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    let mut missing = Vec::new();
    for layer in REQUIRED_LAYERS {
        if !content.contains(&format!("\"{layer}\"")) {
            let msg = format!("missing physics layer name: {layer}");
            ui::fail(&msg);
            missing.push(msg);
        }
    }

    if missing.is_empty() {
        ui::ok(&format!("all {} physics layers named", REQUIRED_LAYERS.len()));
        CheckResult::pass()
    } else {
        CheckResult::fail(missing)
    }
}
