//! Pocket capture detection

use bevy::prelude::*;

use crate::ball::{Ball, BallCategory, Potted, Velocity};
use crate::events::{EventBus, GameEvent};
use crate::rules::ShotEvents;
use crate::table::Table;

/// Test every unpotted ball against every pocket after rail resolution.
/// A captured ball is marked potted with zero velocity and stays that way
/// for the rest of the game (the cue ball comes back via the rule engine).
/// First matching pocket wins; one capture per ball per tick.
pub fn check_pockets(
    table: Res<Table>,
    mut shot_events: ResMut<ShotEvents>,
    mut bus: ResMut<EventBus>,
    mut query: Query<(&BallCategory, &Transform, &mut Velocity, &mut Potted), With<Ball>>,
) {
    for (category, transform, mut velocity, mut potted) in &mut query {
        if potted.0 {
            continue;
        }
        let position = transform.translation.truncate();
        for pocket in &table.pockets {
            if position.distance(pocket.center) < pocket.radius {
                potted.0 = true;
                velocity.0 = Vec2::ZERO;

                match category {
                    BallCategory::Cue => shot_events.scratch = true,
                    BallCategory::Black => shot_events.black_potted = true,
                    _ => shot_events.potted.push(*category),
                }
                bus.emit(GameEvent::BallPotted {
                    category: *category,
                });
                info!("{} ball potted", category.name());
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(Table::standard());
        app.init_resource::<ShotEvents>();
        app.insert_resource(EventBus::new());
        app.add_systems(Update, check_pockets);
        app
    }

    fn spawn_ball(app: &mut App, category: BallCategory, pos: Vec2, vel: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Ball,
                category,
                Transform::from_xyz(pos.x, pos.y, 0.0),
                Velocity(vel),
                Potted(false),
            ))
            .id()
    }

    #[test]
    fn test_ball_in_pocket_is_captured() {
        let mut app = pocket_app();
        let pocket_center = Table::standard().pockets[0].center;
        let ball = spawn_ball(
            &mut app,
            BallCategory::Red,
            pocket_center + Vec2::new(5.0, 0.0),
            Vec2::new(200.0, 0.0),
        );
        app.update();

        assert!(app.world().get::<Potted>(ball).unwrap().0);
        assert_eq!(app.world().get::<Velocity>(ball).unwrap().0, Vec2::ZERO);
        let events = app.world().resource::<ShotEvents>();
        assert_eq!(events.potted, vec![BallCategory::Red]);
    }

    #[test]
    fn test_ball_outside_capture_radius_stays() {
        let mut app = pocket_app();
        let pocket = Table::standard().pockets[0];
        let ball = spawn_ball(
            &mut app,
            BallCategory::Red,
            pocket.center + Vec2::new(pocket.radius + 1.0, 0.0),
            Vec2::ZERO,
        );
        app.update();
        assert!(!app.world().get::<Potted>(ball).unwrap().0);
    }

    #[test]
    fn test_cue_capture_sets_scratch_flag() {
        let mut app = pocket_app();
        let pocket_center = Table::standard().pockets[3].center;
        spawn_ball(&mut app, BallCategory::Cue, pocket_center, Vec2::ZERO);
        app.update();

        let events = app.world().resource::<ShotEvents>();
        assert!(events.scratch);
        assert!(events.potted.is_empty(), "cue does not join the potted list");
    }

    #[test]
    fn test_black_capture_sets_black_flag() {
        let mut app = pocket_app();
        let pocket_center = Table::standard().pockets[5].center;
        spawn_ball(&mut app, BallCategory::Black, pocket_center, Vec2::ZERO);
        app.update();

        let events = app.world().resource::<ShotEvents>();
        assert!(events.black_potted);
        assert!(events.potted.is_empty());
    }

    #[test]
    fn test_potted_ball_not_captured_twice() {
        let mut app = pocket_app();
        let pocket_center = Table::standard().pockets[0].center;
        spawn_ball(&mut app, BallCategory::Yellow, pocket_center, Vec2::ZERO);
        app.update();
        app.update();

        let events = app.world().resource::<ShotEvents>();
        assert_eq!(events.potted.len(), 1);
    }
}
