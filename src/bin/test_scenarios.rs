//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios              # Run all scenarios
//!   cargo run --bin test-scenarios -- rules/    # Run category
//!   cargo run --bin test-scenarios -- rules/scratch  # Run single scenario

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use poolgame::testing::{SCENARIOS_DIR, ScenarioResult, parse_scenario_file, run_scenario};

fn main() {
    let args: Vec<String> = env::args().collect();
    let filter: Option<String> = args[1..]
        .iter()
        .find(|a| !a.starts_with('-'))
        .cloned();

    println!("Scenario Tests");
    println!("==============\n");

    let scenarios_path = Path::new(SCENARIOS_DIR);
    if !scenarios_path.exists() {
        println!("No scenarios directory found at {SCENARIOS_DIR}");
        std::process::exit(1);
    }

    let scenarios = discover_scenarios(scenarios_path, filter.as_deref());
    if scenarios.is_empty() {
        println!("No scenario files found.");
        if let Some(f) = filter {
            println!("Filter: {f}");
        }
        std::process::exit(1);
    }

    let mut passed = 0;
    let mut failed = 0;
    let mut errors = 0;
    let mut current_category = String::new();

    for path in &scenarios {
        let rel_path = path.strip_prefix(scenarios_path).unwrap_or(path);

        if let Some(parent) = rel_path.parent() {
            let category = parent.to_string_lossy().to_string();
            if category != current_category && !category.is_empty() {
                if !current_category.is_empty() {
                    println!();
                }
                println!("{category}/");
                current_category = category;
            }
        }

        let name = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let result = match parse_scenario_file(path) {
            Ok(def) => run_scenario(&def),
            Err(message) => ScenarioResult::Error { message },
        };

        match &result {
            ScenarioResult::Pass { .. } => passed += 1,
            ScenarioResult::Fail { .. } => failed += 1,
            ScenarioResult::Error { .. } => errors += 1,
        }
        print_result(&name, &result);
    }

    println!("\n==============");
    println!("Results: {passed} passed, {failed} failed, {errors} errors");

    if failed > 0 || errors > 0 {
        std::process::exit(1);
    }
}

fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut scenarios = Vec::new();
    discover_recursive(base, base, filter, &mut scenarios);
    scenarios.sort();
    scenarios
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            discover_recursive(base, &path, filter, out);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            out.push(path);
        }
    }
}

fn print_result(name: &str, result: &ScenarioResult) {
    let dots = ".".repeat(40 - name.len().min(39));
    match result {
        ScenarioResult::Pass { ticks } => {
            println!("  {name} {dots} PASS ({ticks} ticks)");
        }
        ScenarioResult::Fail { message } => {
            println!("  {name} {dots} FAIL");
            println!("    {message}");
        }
        ScenarioResult::Error { message } => {
            println!("  {name} {dots} ERROR");
            println!("    {message}");
        }
    }
}
