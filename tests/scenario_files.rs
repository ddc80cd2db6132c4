//! Runs every TOML scenario under tests/scenarios/ as part of cargo test.
//! The test-scenarios binary runs the same files with nicer reporting.

use std::path::{Path, PathBuf};

use poolgame::testing::{ScenarioResult, parse_scenario_file, run_scenario};

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            out.push(path);
        }
    }
}

#[test]
fn all_scenario_files_pass() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scenarios");
    let mut paths = Vec::new();
    collect(&base, &mut paths);
    paths.sort();
    assert!(!paths.is_empty(), "no scenario files found under {base:?}");

    let mut failures = Vec::new();
    for path in &paths {
        let name = path
            .strip_prefix(&base)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        match parse_scenario_file(path) {
            Ok(def) => match run_scenario(&def) {
                ScenarioResult::Pass { .. } => {}
                ScenarioResult::Fail { message } | ScenarioResult::Error { message } => {
                    failures.push(format!("{name}: {message}"));
                }
            },
            Err(message) => failures.push(format!("{name}: {message}")),
        }
    }

    assert!(
        failures.is_empty(),
        "{} scenario(s) failed:\n{}",
        failures.len(),
        failures.join("\n")
    );
}
