//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ball::{BallCategory, BallGroup};

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: ScenarioSetup,
    /// The single shot to take; omit to adjudicate a table as-is
    pub shot: Option<ShotDef>,
    #[serde(default)]
    pub expect: Expectations,
}

/// Table layout and match state before the shot
#[derive(Debug, Deserialize)]
pub struct ScenarioSetup {
    #[serde(default = "default_player")]
    pub current_player: u8,
    pub ownership: Option<OwnershipDef>,
    #[serde(default)]
    pub balls: Vec<BallDef>,
}

fn default_player() -> u8 {
    1
}

/// Group assignment, e.g. player1 = "red", player2 = "yellow"
#[derive(Debug, Deserialize)]
pub struct OwnershipDef {
    pub player1: String,
    pub player2: String,
}

/// One ball on (or off) the table
#[derive(Debug, Clone, Deserialize)]
pub struct BallDef {
    pub category: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
    #[serde(default)]
    pub potted: bool,
}

/// Shot velocity applied to the cue ball
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShotDef {
    pub vx: f32,
    pub vy: f32,
}

/// Expected outcomes
#[derive(Debug, Default, Deserialize)]
pub struct Expectations {
    /// Event kinds that must appear in this order (other events may
    /// interleave)
    #[serde(default)]
    pub events: Vec<String>,
    /// Event kinds that must not appear at all
    #[serde(default)]
    pub forbidden: Vec<String>,
    pub state: Option<StateExpect>,
}

/// State assertions evaluated after the shot settles
#[derive(Debug, Default, Deserialize)]
pub struct StateExpect {
    pub current_player: Option<u8>,
    pub game_over: Option<bool>,
    pub winner: Option<u8>,
    pub cue_at_spawn: Option<bool>,
    pub red_remaining: Option<usize>,
    pub yellow_remaining: Option<usize>,
    pub player1_group: Option<String>,
    pub player2_group: Option<String>,
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<ScenarioDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Resolve a category name used in scenario files
pub fn parse_category(name: &str) -> Result<BallCategory, String> {
    match name {
        "cue" => Ok(BallCategory::Cue),
        "black" => Ok(BallCategory::Black),
        "red" => Ok(BallCategory::Red),
        "yellow" => Ok(BallCategory::Yellow),
        other => Err(format!("Unknown ball category '{other}'")),
    }
}

/// Resolve a group name used in scenario files
pub fn parse_group(name: &str) -> Result<BallGroup, String> {
    match name {
        "red" => Ok(BallGroup::Red),
        "yellow" => Ok(BallGroup::Yellow),
        other => Err(format!("Unknown ball group '{other}'")),
    }
}
