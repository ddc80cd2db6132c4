//! Global gameplay tuning settings (decoupled from UI)

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// Live physics/shot parameters consumed by the systems each tick
#[derive(Resource, Debug, Clone)]
pub struct PhysicsTweaks {
    /// Fraction of velocity retained after one second of rolling
    pub ball_friction: f32,
    /// Ball-ball coefficient of restitution
    pub ball_restitution: f32,
    /// Stop snap / stillness threshold (px/s)
    pub stop_epsilon: f32,
    /// Shot speed per pixel of drag
    pub shot_power_scale: f32,
    /// Cue launch speed cap (px/s)
    pub shot_max_speed: f32,
}

impl Default for PhysicsTweaks {
    fn default() -> Self {
        Self {
            ball_friction: BALL_FRICTION,
            ball_restitution: BALL_RESTITUTION,
            stop_epsilon: STOP_EPSILON,
            shot_power_scale: SHOT_POWER_SCALE,
            shot_max_speed: SHOT_MAX_SPEED,
        }
    }
}

/// Serializable tuning values stored in config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplayTuning {
    pub ball_friction: f32,
    pub ball_restitution: f32,
    pub stop_epsilon: f32,
    pub shot_power_scale: f32,
    pub shot_max_speed: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            ball_friction: BALL_FRICTION,
            ball_restitution: BALL_RESTITUTION,
            stop_epsilon: STOP_EPSILON,
            shot_power_scale: SHOT_POWER_SCALE,
            shot_max_speed: SHOT_MAX_SPEED,
        }
    }
}

impl GameplayTuning {
    pub fn apply_to(&self, tweaks: &mut PhysicsTweaks) {
        tweaks.ball_friction = self.ball_friction;
        tweaks.ball_restitution = self.ball_restitution;
        tweaks.stop_epsilon = self.stop_epsilon;
        tweaks.shot_power_scale = self.shot_power_scale;
        tweaks.shot_max_speed = self.shot_max_speed;
    }

    /// Load the tuning file, or defaults if it is missing or malformed
    pub fn load() -> Self {
        let path = Path::new(GAMEPLAY_TUNING_FILE);
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(tuning) => tuning,
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", GAMEPLAY_TUNING_FILE, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", GAMEPLAY_TUNING_FILE, e);
                Self::default()
            }
        }
    }
}

/// Apply the on-disk tuning config (if any) to the live tweaks
pub fn apply_global_tuning(tweaks: &mut PhysicsTweaks) {
    GameplayTuning::load().apply_to(tweaks);
}
