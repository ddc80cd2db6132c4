//! Utility functions for poolgame

use bevy::prelude::*;

use crate::ball::BallCategory;
use crate::constants::*;

/// Flat display color for a ball category
pub fn ball_color(category: BallCategory) -> Color {
    match category {
        BallCategory::Cue => CUE_BALL_COLOR,
        BallCategory::Black => BLACK_BALL_COLOR,
        BallCategory::Red => RED_BALL_COLOR,
        BallCategory::Yellow => YELLOW_BALL_COLOR,
    }
}

/// Convert a window cursor position (top-left origin, y-down) to world
/// coordinates for a centered camera using FixedVertical scaling.
pub fn cursor_to_world(cursor: Vec2, window_size: Vec2) -> Vec2 {
    let view_height = TABLE_HEIGHT + 2.0 * VIEW_MARGIN;
    let scale = view_height / window_size.y;
    Vec2::new(
        (cursor.x - window_size.x / 2.0) * scale,
        (window_size.y / 2.0 - cursor.y) * scale,
    )
}
