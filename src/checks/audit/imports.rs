//! Texture import-settings scan

use std::fs;
use std::path::Path;

use crate::pipeline::CheckResult;
use crate::ui;

/// Directory whose import metadata is audited, relative to the project root
const TEXTURES_DIR: &str = "assets/textures";

/// Import type every texture must compress to
const REQUIRED_IMPORT_TYPE: &str = "type=\"CompressedTexture2D\"";

/// Every texture's `.import` metadata must carry the compressed type tag
pub fn texture_imports(root: &Path) -> CheckResult {
    let pattern = format!("{}/{TEXTURES_DIR}/**/*.import", root.display());
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
        let display = entry
            .strip_prefix(root)
            .unwrap_or(&entry)
            .display()
            .to_string();

        match fs::read_to_string(&entry) {
            Ok(content) => {
                if !content.contains(REQUIRED_IMPORT_TYPE) {
                    let msg = format!("{display} is not imported as CompressedTexture2D");
                    ui::fail(&msg);
                    violations.push(msg);
                }
            }
            Err(e) => {
                let msg = format!("failed to read {display}: {e}");
                ui::fail(&msg);
                violations.push(msg);
            }
        }
    }

    if violations.is_empty() {
        ui::ok(&format!("{scanned} texture import files use VRAM compression"));
        CheckResult::pass()
    } else {
        CheckResult::fail(violations)
    }
}
