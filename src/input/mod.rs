//! Input module - pointer aiming and match commands for the windowed game
//!
//! Only the resulting shot vector crosses into the core: the drag gesture
//! itself never touches game state directly.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::ball::{Ball, BallCategory, Potted};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::helpers::cursor_to_world;
use crate::rules::{GameState, ShotPhase};
use crate::shooting::{PendingShot, aim_velocity};
use crate::table::RestartRequested;
use crate::tuning::PhysicsTweaks;

/// Live drag state while the player is lining up a shot
#[derive(Resource, Default)]
pub struct AimState {
    pub aiming: bool,
    /// Cue ball center at drag start
    pub start: Vec2,
    /// Current pointer position in world space
    pub current: Vec2,
}

/// Track the pointer drag. A drag must begin near the cue ball while the
/// table is idle; releasing converts it into a pending shot.
pub fn capture_aim(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    phase: Res<ShotPhase>,
    state: Res<GameState>,
    tweaks: Res<PhysicsTweaks>,
    mut aim: ResMut<AimState>,
    mut pending: ResMut<PendingShot>,
    balls: Query<(&BallCategory, &Transform, &Potted), With<Ball>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    let world = cursor_to_world(cursor, window_size);

    if buttons.just_pressed(MouseButton::Left) && *phase == ShotPhase::Idle && !state.game_over {
        let cue_pos = balls.iter().find_map(|(category, transform, potted)| {
            (*category == BallCategory::Cue && !potted.0)
                .then(|| transform.translation.truncate())
        });
        if let Some(cue_pos) = cue_pos
            && world.distance(cue_pos) <= AIM_GRAB_RADIUS
        {
            aim.aiming = true;
            aim.start = cue_pos;
            aim.current = world;
        }
    }

    if aim.aiming && buttons.pressed(MouseButton::Left) {
        aim.current = world;
    }

    if aim.aiming && buttons.just_released(MouseButton::Left) {
        aim.aiming = false;
        pending.0 = aim_velocity(aim.start, aim.current, &tweaks);
    }
}

/// R racks a fresh game at any time; Escape ends the session
pub fn handle_commands(
    keys: Res<ButtonInput<KeyCode>>,
    mut restart: ResMut<RestartRequested>,
    mut bus: ResMut<EventBus>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        restart.0 = true;
    }
    if keys.just_pressed(KeyCode::Escape) {
        bus.emit(GameEvent::SessionEnd);
        exit.write(AppExit::Success);
    }
}
