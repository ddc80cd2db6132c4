//! Shot execution: turning an aim drag into cue ball velocity

use bevy::prelude::*;

use crate::ball::{Ball, BallCategory, Potted, Velocity};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::rules::{GameState, ShotEvents, ShotPhase};
use crate::tuning::PhysicsTweaks;

/// Velocity waiting to be applied to the cue ball. Set by the input layer
/// (or the headless runner) and consumed by `strike_cue`.
#[derive(Resource, Default)]
pub struct PendingShot(pub Option<Vec2>);

/// Shot velocity from a drag gesture: direction is the negated drag
/// displacement, speed proportional to drag length and clamped. Returns
/// None for drags too short to count.
pub fn aim_velocity(start: Vec2, release: Vec2, tweaks: &PhysicsTweaks) -> Option<Vec2> {
    let pull = start - release;
    let length = pull.length();
    if length < MIN_DRAG_DISTANCE {
        return None;
    }
    let speed = (length * tweaks.shot_power_scale).min(tweaks.shot_max_speed);
    Some(pull / length * speed)
}

/// Launch the cue ball if a shot is pending. Silently ignored unless the
/// table is Idle and the game is still on; a new shot clears the previous
/// shot's event accumulator.
pub fn strike_cue(
    mut pending: ResMut<PendingShot>,
    mut phase: ResMut<ShotPhase>,
    state: Res<GameState>,
    mut shot_events: ResMut<ShotEvents>,
    mut bus: ResMut<EventBus>,
    mut balls: Query<(&BallCategory, &mut Velocity, &Potted), With<Ball>>,
) {
    let Some(shot) = pending.0.take() else {
        return;
    };
    if *phase != ShotPhase::Idle || state.game_over {
        return;
    }

    for (category, mut velocity, potted) in &mut balls {
        if *category == BallCategory::Cue && !potted.0 {
            shot_events.clear();
            velocity.0 = shot;
            *phase = ShotPhase::InMotion;
            bus.emit(GameEvent::ShotTaken {
                player: state.current_player,
                speed: shot.length(),
            });
            info!("{} shoots at {:.0} px/s", state.current_player, shot.length());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shooting_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<PhysicsTweaks>();
        app.init_resource::<GameState>();
        app.init_resource::<ShotEvents>();
        app.init_resource::<ShotPhase>();
        app.init_resource::<PendingShot>();
        app.insert_resource(EventBus::new());
        app.add_systems(Update, strike_cue);
        app
    }

    fn spawn_cue(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Ball,
                BallCategory::Cue,
                Transform::from_xyz(CUE_SPAWN.x, CUE_SPAWN.y, 0.0),
                Velocity::default(),
                Potted(false),
            ))
            .id()
    }

    #[test]
    fn test_aim_velocity_negates_drag() {
        let tweaks = PhysicsTweaks::default();
        // Drag to the left launches to the right
        let v = aim_velocity(Vec2::ZERO, Vec2::new(-50.0, 0.0), &tweaks).unwrap();
        assert!(v.x > 0.0);
        assert_eq!(v.y, 0.0);
        assert!((v.length() - 50.0 * SHOT_POWER_SCALE).abs() < 0.01);
    }

    #[test]
    fn test_aim_velocity_clamps_to_max() {
        let tweaks = PhysicsTweaks::default();
        let v = aim_velocity(Vec2::ZERO, Vec2::new(-10_000.0, 0.0), &tweaks).unwrap();
        assert!((v.length() - tweaks.shot_max_speed).abs() < 0.01);
    }

    #[test]
    fn test_tiny_drag_is_ignored() {
        let tweaks = PhysicsTweaks::default();
        assert!(aim_velocity(Vec2::ZERO, Vec2::new(1.0, 0.5), &tweaks).is_none());
    }

    #[test]
    fn test_strike_launches_cue_and_opens_shot() {
        let mut app = shooting_app();
        let cue = spawn_cue(&mut app);
        app.world_mut().resource_mut::<ShotEvents>().scratch = true; // stale
        app.world_mut().resource_mut::<PendingShot>().0 = Some(Vec2::new(900.0, 0.0));
        app.update();

        assert_eq!(app.world().get::<Velocity>(cue).unwrap().0.x, 900.0);
        assert_eq!(*app.world().resource::<ShotPhase>(), ShotPhase::InMotion);
        assert!(
            !app.world().resource::<ShotEvents>().scratch,
            "stale shot events are cleared at shot start"
        );
    }

    #[test]
    fn test_strike_rejected_while_in_motion() {
        let mut app = shooting_app();
        let cue = spawn_cue(&mut app);
        *app.world_mut().resource_mut::<ShotPhase>() = ShotPhase::InMotion;
        app.world_mut().resource_mut::<PendingShot>().0 = Some(Vec2::new(900.0, 0.0));
        app.update();

        assert_eq!(app.world().get::<Velocity>(cue).unwrap().0, Vec2::ZERO);
        assert!(app.world().resource::<PendingShot>().0.is_none(), "request dropped");
    }

    #[test]
    fn test_strike_rejected_after_game_over() {
        let mut app = shooting_app();
        let cue = spawn_cue(&mut app);
        app.world_mut().resource_mut::<GameState>().game_over = true;
        app.world_mut().resource_mut::<PendingShot>().0 = Some(Vec2::new(900.0, 0.0));
        app.update();

        assert_eq!(app.world().get::<Velocity>(cue).unwrap().0, Vec2::ZERO);
    }
}
