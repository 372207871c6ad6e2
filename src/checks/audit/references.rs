//! Scene resource cross-reference integrity

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::pipeline::CheckResult;
use crate::ui;

/// Resource reference token inside scene files: `path="res://<relative>"`
const RESOURCE_REF_PATTERN: &str = r#"path="res://([^"]+)""#;

/// Every `res://` path referenced by a scene file must exist on disk.
///
/// Each dangling reference is reported with both the offending scene and
/// the missing path. `uid://` references carry no filesystem location and
/// are not matched.
pub fn resource_references(root: &Path) -> CheckResult {
    let regex = match Regex::new(RESOURCE_REF_PATTERN) {
        Ok(regex) => regex,
        Err(e) => {
            let msg = format!("invalid resource reference pattern: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    let pattern = format!("{}/**/*.tscn", root.display());
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            let msg = format!("invalid scan pattern {pattern}: {e}");
            ui::fail(&msg);
            return CheckResult::fail(vec![msg]);
        }
    };

    let mut dangling = Vec::new();
    let mut scanned = 0usize;
    let mut referenced = 0usize;

    for entry in entries.flatten() {
        scanned += 1;
        let scene = entry
            .strip_prefix(root)
            .unwrap_or(&entry)
            .display()
            .to_string();

        let content = match fs::read_to_string(&entry) {
            Ok(content) => content,
            Err(e) => {
                let msg = format!("failed to read {scene}: {e}");
                ui::fail(&msg);
                dangling.push(msg);
                continue;
            }
        };

        for capture in regex.captures_iter(&content) {
            referenced += 1;
            let rel = &capture[1];
            if !root.join(rel).exists() {
                let msg = format!("{scene} references missing resource res://{rel}");
                ui::fail(&msg);
                dangling.push(msg);
            }
        }
    }

    if dangling.is_empty() {
        ui::ok(&format!(
            "{referenced} resource references in {scanned} scenes resolve"
        ));
        CheckResult::pass()
    } else {
        CheckResult::fail(dangling)
    }
}
