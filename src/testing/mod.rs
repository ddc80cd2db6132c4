//! Scenario testing system for deterministic rule verification
//!
//! Scenarios are TOML files describing a table layout, one shot, and the
//! expected adjudication; the runner plays them through the headless app.

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, check_forbidden, check_sequence, check_state};
pub use parser::{
    BallDef, Expectations, OwnershipDef, ScenarioDefinition, ScenarioSetup, ShotDef, StateExpect,
    parse_scenario_file,
};
pub use runner::{ScenarioResult, run_scenario};

/// Default path for scenario files
pub const SCENARIOS_DIR: &str = "tests/scenarios";
