//! Asset naming-convention scan for mesh files

use std::path::Path;

use crate::pipeline::CheckResult;
use crate::ui;

/// Collision meshes must use the `-col` suffix; `_col` is the error variant
const WRONG_COLLISION_SUFFIX: &str = "_col.glb";

/// Scan every `.glb` under the project for naming violations.
///
/// Uppercase in a file stem is a warning (snake_case preferred); the
/// `_col` collision-suffix variant is an error.
pub fn mesh_naming(root: &Path) -> CheckResult {
    let pattern = format!("{}/**/*.glb", root.display());
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            let msg = format!("invalid scan pattern {pattern}: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    let mut violations = Vec::new();
    let mut scanned = 0usize;

    for entry in entries.flatten() {
        scanned += 1;
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let stem = name.strip_suffix(".glb").unwrap_or(&name);
        if stem.chars().any(|c| c.is_ascii_uppercase()) {
            ui::warn(&format!(
                "{name} contains uppercase letters; snake_case preferred"
            ));
        }

        if name.ends_with(WRONG_COLLISION_SUFFIX) {
            let msg = format!("{name} uses '_col' instead of the required '-col' suffix");
            ui::fail(&msg);
            violations.push(msg);
        }
    }

    if violations.is_empty() {
        ui::ok(&format!("{scanned} mesh files follow naming conventions"));
        CheckResult::pass()
    } else {
        CheckResult::fail(violations)
    }
}
