//! Ball physics systems: integration, friction decay, rail bounces

use bevy::prelude::*;

use crate::ball::components::*;
use crate::constants::*;
use crate::table::Table;
use crate::tuning::PhysicsTweaks;

/// Advance every unpotted ball one tick: translate by velocity, apply
/// friction decay, and snap near-stationary velocity components to zero so
/// balls actually come to rest instead of decaying forever.
pub fn integrate_balls(
    tweaks: Res<PhysicsTweaks>,
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut Velocity, &Potted), With<Ball>>,
) {
    // Use minimum dt for headless mode compatibility
    let dt = time.delta_secs().max(MIN_TICK_DT);
    let decay = tweaks.ball_friction.powf(dt);

    for (mut transform, mut velocity, potted) in &mut query {
        if potted.0 {
            continue;
        }

        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;

        // Friction applies independently per axis, like the stop snap below
        velocity.0.x *= decay;
        velocity.0.y *= decay;

        if velocity.0.x.abs() < tweaks.stop_epsilon {
            velocity.0.x = 0.0;
        }
        if velocity.0.y.abs() < tweaks.stop_epsilon {
            velocity.0.y = 0.0;
        }
    }
}

/// Reflect balls off the table rails. Runs after integration and before
/// pocket detection: the position is clamped so the ball edge touches the
/// rail, and the velocity component into the rail is negated (elastic).
pub fn rail_collisions(
    table: Res<Table>,
    mut query: Query<(&mut Transform, &mut Velocity, &Potted), With<Ball>>,
) {
    for (mut transform, mut velocity, potted) in &mut query {
        if potted.0 {
            continue;
        }

        let min_x = table.play_left() + BALL_RADIUS;
        let max_x = table.play_right() - BALL_RADIUS;
        let min_y = table.play_bottom() + BALL_RADIUS;
        let max_y = table.play_top() - BALL_RADIUS;

        if transform.translation.x < min_x {
            transform.translation.x = min_x;
            velocity.0.x = -velocity.0.x;
        }
        if transform.translation.x > max_x {
            transform.translation.x = max_x;
            velocity.0.x = -velocity.0.x;
        }
        if transform.translation.y < min_y {
            transform.translation.y = min_y;
            velocity.0.y = -velocity.0.y;
        }
        if transform.translation.y > max_y {
            transform.translation.y = max_y;
            velocity.0.y = -velocity.0.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<PhysicsTweaks>();
        app.insert_resource(Table::standard());
        app.add_systems(Update, (integrate_balls, rail_collisions).chain());
        app
    }

    fn spawn_ball(app: &mut App, pos: Vec2, vel: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Ball,
                BallCategory::Cue,
                Transform::from_xyz(pos.x, pos.y, 0.0),
                Velocity(vel),
                Potted(false),
            ))
            .id()
    }

    #[test]
    fn test_ball_moves_and_decays() {
        let mut app = physics_app();
        let ball = spawn_ball(&mut app, Vec2::ZERO, Vec2::new(600.0, 0.0));
        app.update();

        let transform = app.world().get::<Transform>(ball).unwrap();
        let velocity = app.world().get::<Velocity>(ball).unwrap();
        // One clamped tick: moved by v * dt, velocity decayed geometrically
        assert!((transform.translation.x - 600.0 * MIN_TICK_DT).abs() < 0.01);
        assert!(velocity.0.x < 600.0);
        assert!(velocity.0.x > 590.0);
    }

    #[test]
    fn test_slow_ball_snaps_to_rest() {
        let mut app = physics_app();
        let ball = spawn_ball(&mut app, Vec2::ZERO, Vec2::new(2.0, -2.0));
        app.update();

        let velocity = app.world().get::<Velocity>(ball).unwrap();
        assert_eq!(velocity.0, Vec2::ZERO);
    }

    #[test]
    fn test_potted_ball_does_not_move() {
        let mut app = physics_app();
        let ball = spawn_ball(&mut app, Vec2::new(50.0, 50.0), Vec2::new(600.0, 0.0));
        app.world_mut().get_mut::<Potted>(ball).unwrap().0 = true;
        app.update();

        let transform = app.world().get::<Transform>(ball).unwrap();
        assert_eq!(transform.translation.x, 50.0);
    }

    #[test]
    fn test_rail_bounce_clamps_and_reflects() {
        let mut app = physics_app();
        // Start just inside the right rail, moving right fast enough to cross it
        let ball = spawn_ball(
            &mut app,
            Vec2::new(PLAY_RIGHT - BALL_RADIUS - 1.0, 0.0),
            Vec2::new(600.0, 0.0),
        );
        app.update();

        let transform = app.world().get::<Transform>(ball).unwrap();
        let velocity = app.world().get::<Velocity>(ball).unwrap();
        assert!((transform.translation.x - (PLAY_RIGHT - BALL_RADIUS)).abs() < 0.01);
        assert!(velocity.0.x < 0.0, "velocity should reflect off the rail");
    }

    #[test]
    fn test_corner_bounce_reflects_both_axes() {
        let mut app = physics_app();
        let ball = spawn_ball(
            &mut app,
            Vec2::new(PLAY_RIGHT - BALL_RADIUS - 1.0, PLAY_TOP - BALL_RADIUS - 1.0),
            Vec2::new(600.0, 600.0),
        );
        app.update();

        let velocity = app.world().get::<Velocity>(ball).unwrap();
        assert!(velocity.0.x < 0.0);
        assert!(velocity.0.y < 0.0);
    }
}
