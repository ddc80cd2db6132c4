//! Tunable constants for poolgame
//!
//! All gameplay values are defined here for easy tweaking.

use bevy::prelude::*;

// =============================================================================
// TABLE DIMENSIONS
// =============================================================================

pub const TABLE_WIDTH: f32 = 960.0;
pub const TABLE_HEIGHT: f32 = 500.0;
pub const RAIL_THICKNESS: f32 = 28.0;

/// Inner play area edges (table is centered on the origin)
pub const PLAY_LEFT: f32 = -TABLE_WIDTH / 2.0 + RAIL_THICKNESS;
pub const PLAY_RIGHT: f32 = TABLE_WIDTH / 2.0 - RAIL_THICKNESS;
pub const PLAY_BOTTOM: f32 = -TABLE_HEIGHT / 2.0 + RAIL_THICKNESS;
pub const PLAY_TOP: f32 = TABLE_HEIGHT / 2.0 - RAIL_THICKNESS;

// =============================================================================
// POCKETS
// =============================================================================

pub const POCKET_RADIUS: f32 = 24.0;
pub const POCKET_COUNT: usize = 6;

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const BALL_RADIUS: f32 = 10.0;
pub const BALL_MASS: f32 = 1.0;
/// Fraction of velocity retained after one second of rolling
pub const BALL_FRICTION: f32 = 0.62;
/// Per-axis speed below which a velocity component snaps to zero (px/s).
/// Doubles as the stillness threshold for shot-completion detection.
pub const STOP_EPSILON: f32 = 3.0;
/// Coefficient of restitution for ball-ball collisions (near-elastic)
pub const BALL_RESTITUTION: f32 = 0.98;

// =============================================================================
// RACK
// =============================================================================

pub const RED_BALL_COUNT: usize = 7;
pub const YELLOW_BALL_COUNT: usize = 7;
/// Center-to-center spacing between racked balls (slight slack so the rack
/// spawns collision-free)
pub const RACK_GAP: f32 = BALL_RADIUS * 2.0 + 0.6;
pub const RACK_ROWS: usize = 5;
/// Apex of the rack triangle (right side of the table)
pub const RACK_APEX: Vec2 = Vec2::new(TABLE_WIDTH / 2.0 - RAIL_THICKNESS - 220.0, 0.0);
/// Cue ball starting spot (left side, also the reset point after fouls)
pub const CUE_SPAWN: Vec2 = Vec2::new(-TABLE_WIDTH / 2.0 + RAIL_THICKNESS + 120.0, 0.0);

// =============================================================================
// SHOOTING
// =============================================================================

/// Shot speed per pixel of drag length (px/s per px)
pub const SHOT_POWER_SCALE: f32 = 36.0;
/// Maximum cue ball launch speed (px/s)
pub const SHOT_MAX_SPEED: f32 = 3600.0;
/// Drags shorter than this are ignored (accidental clicks)
pub const MIN_DRAG_DISTANCE: f32 = 2.0;
/// How close to the cue ball a drag must start to count as aiming
pub const AIM_GRAB_RADIUS: f32 = BALL_RADIUS * 2.2;

// =============================================================================
// TICK RATE
// =============================================================================

/// Physics tick rate; the headless runner steps at exactly this rate
pub const TICK_RATE: f32 = 60.0;
/// Minimum dt clamp so a headless update with no elapsed time is a full tick
pub const MIN_TICK_DT: f32 = 1.0 / TICK_RATE;

// =============================================================================
// COLORS
// =============================================================================

pub const CLOTH_COLOR: Color = Color::srgb(0.16, 0.33, 0.23);
pub const RAIL_COLOR: Color = Color::srgb(0.36, 0.23, 0.11);
pub const POCKET_COLOR: Color = Color::srgb(0.02, 0.02, 0.02);
pub const CUE_BALL_COLOR: Color = Color::srgb(0.95, 0.95, 0.92);
pub const BLACK_BALL_COLOR: Color = Color::srgb(0.08, 0.08, 0.08);
pub const RED_BALL_COLOR: Color = Color::srgb(0.75, 0.16, 0.16);
pub const YELLOW_BALL_COLOR: Color = Color::srgb(0.86, 0.67, 0.12);
pub const AIM_LINE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8);
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4);

// =============================================================================
// UI
// =============================================================================

/// Seconds a banner message stays on screen
pub const BANNER_DURATION: f32 = 2.5;
/// Extra world-space margin around the table shown by the camera
pub const VIEW_MARGIN: f32 = 60.0;
