//! HUD components and systems (turn indicator, per-player ball counts)

use bevy::prelude::*;

use crate::ball::{Ball, BallCategory, Potted};
use crate::events::PlayerId;
use crate::rules::{GameState, remaining_in_group};

/// Turn indicator text component
#[derive(Component)]
pub struct TurnText;

/// Per-player remaining-ball count text
#[derive(Component)]
pub struct BallCountText(pub PlayerId);

/// Update the turn/winner line
pub fn update_turn_text(
    state: Res<GameState>,
    mut text_query: Query<&mut Text2d, With<TurnText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    text.0 = match state.winner {
        Some(winner) => format!("{winner} wins!  (R to rack again)"),
        None => format!("Turn: {}", state.current_player),
    };
}

/// Update each player's scoreboard entry: remaining ball count once a group
/// is assigned, "unassigned" before the table is open
pub fn update_ball_counts(
    state: Res<GameState>,
    balls: Query<(&BallCategory, &Potted), With<Ball>>,
    mut text_query: Query<(&mut Text2d, &BallCountText)>,
) {
    for (mut text, owner) in &mut text_query {
        text.0 = match state.ownership.get(owner.0) {
            Some(group) => {
                let remaining = remaining_in_group(balls.iter(), group);
                format!("{}: {} ({})", owner.0, remaining, group.name())
            }
            None => format!("{}: unassigned", owner.0),
        };
    }
}
