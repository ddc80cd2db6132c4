//! Presentation layer: banner, HUD, and aim overlay for the windowed game

pub mod banner;
pub mod hud;

pub use banner::{Banner, MessageBanner, update_banner};
pub use hud::{BallCountText, TurnText, update_ball_counts, update_turn_text};

use bevy::prelude::*;

use crate::constants::*;
use crate::input::AimState;

/// Dashed-line stand-in: a straight aim line from the cue ball to the
/// pointer while dragging, plus a ring marking the grab radius
pub fn draw_aim_line(aim: Res<AimState>, mut gizmos: Gizmos) {
    if !aim.aiming {
        return;
    }
    gizmos.line_2d(aim.start, aim.current, AIM_LINE_COLOR);
    gizmos.circle_2d(aim.start, AIM_GRAB_RADIUS, AIM_LINE_COLOR);
}
