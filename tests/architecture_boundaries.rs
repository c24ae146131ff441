//! Layering rules checked against the source tree.

use std::fs;
use std::path::Path;

/// A source file under `src/`, keyed by its manifest-relative path with `/` separators.
struct Source {
    path: String,
    text: String,
}

fn sources_under(subdir: &str) -> Vec<Source> {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut found = Vec::new();
    collect(manifest, &manifest.join(subdir), &mut found);
    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

fn collect(manifest: &Path, dir: &Path, found: &mut Vec<Source>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.filter_map(|e| e.ok().map(|e| e.path())) {
        if path.is_dir() {
            collect(manifest, &path, found);
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let relative = path.strip_prefix(manifest).unwrap_or(&path);
        found.push(Source {
            path: relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            text: fs::read_to_string(&path).unwrap_or_default(),
        });
    }
}

fn assert_clean(rule: &str, violations: Vec<String>) {
    assert!(violations.is_empty(), "{rule}:\n{}", violations.join("\n"));
}

#[test]
fn system_module_does_not_depend_on_rendering() {
    let violations = sources_under("src/system")
        .iter()
        .flat_map(|src| {
            ["crate::ui", "crate::app", "ratatui", "crossterm"]
                .into_iter()
                .filter(|needle| src.text.contains(needle))
                .map(|needle| format!("{} pulls in `{needle}`", src.path))
        })
        .collect();

    assert_clean("sampler must stay free of rendering code", violations);
}

#[test]
fn ui_module_does_not_query_the_os() {
    let violations = sources_under("src/ui")
        .iter()
        .flat_map(|src| {
            ["crate::system::platform", "sysinfo"]
                .into_iter()
                .filter(|needle| src.text.contains(needle))
                .map(|needle| format!("{} reads the host through `{needle}`", src.path))
        })
        .collect();

    assert_clean("ui must render snapshots only", violations);
}

#[test]
fn target_os_cfg_is_scoped_to_system_platform() {
    let violations = sources_under("src")
        .into_iter()
        .filter(|src| src.text.contains("target_os"))
        .filter(|src| !src.path.starts_with("src/system/platform/"))
        .map(|src| src.path)
        .collect();

    assert_clean("per-OS cfg outside src/system/platform", violations);
}
