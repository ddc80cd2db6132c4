//! Deterministic shot runner for headless apps

use bevy::prelude::*;

use crate::ball::{Ball, BallCategory, Potted};
use crate::events::bus::{BusEvent, EventBus};
use crate::rules::ShotPhase;
use crate::shooting::PendingShot;

/// Even a maximum-power shot decays to rest in under fifteen simulated
/// seconds; this bounds runaway scenarios
pub const MAX_SHOT_TICKS: u32 = 3000;

/// Tick the app until the state machine returns to Idle (or the tick budget
/// runs out). Returns the number of ticks consumed.
pub fn run_until_idle(app: &mut App, max_ticks: u32) -> u32 {
    for tick in 1..=max_ticks {
        app.update();
        if *app.world().resource::<ShotPhase>() == ShotPhase::Idle {
            return tick;
        }
    }
    max_ticks
}

/// Queue a shot, run it to adjudication, and return the ticks consumed plus
/// every bus event emitted along the way
pub fn take_shot(app: &mut App, velocity: Vec2, max_ticks: u32) -> (u32, Vec<BusEvent>) {
    app.world_mut().resource_mut::<EventBus>().drain();
    app.world_mut().resource_mut::<PendingShot>().0 = Some(velocity);

    // The first tick consumes the pending shot; the loop then runs the
    // whole shot to settlement and adjudication
    let ticks = run_until_idle(app, max_ticks);

    let events = app.world_mut().resource_mut::<EventBus>().drain();
    (ticks, events)
}

/// Remaining unpotted (red, yellow, black) counts
pub fn table_counts(app: &mut App) -> (usize, usize, usize) {
    let mut counts = (0, 0, 0);
    let mut query = app
        .world_mut()
        .query_filtered::<(&BallCategory, &Potted), With<Ball>>();
    for (category, potted) in query.iter(app.world()) {
        if potted.0 {
            continue;
        }
        match category {
            BallCategory::Red => counts.0 += 1,
            BallCategory::Yellow => counts.1 += 1,
            BallCategory::Black => counts.2 += 1,
            BallCategory::Cue => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::Velocity;
    use crate::constants::*;
    use crate::events::{GameEvent, PlayerId, event_kind};
    use crate::rules::GameState;
    use crate::simulation::HeadlessAppBuilder;
    use crate::table::Table;

    fn spawn_ball(app: &mut App, category: BallCategory, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Ball,
                category,
                Transform::from_xyz(pos.x, pos.y, 0.0),
                Velocity::default(),
                Potted(false),
            ))
            .id()
    }

    fn kinds(events: &[BusEvent]) -> Vec<&'static str> {
        events.iter().map(|e| event_kind(&e.event)).collect()
    }

    #[test]
    fn test_missed_shot_is_adjudicated_no_contact() {
        let mut app = HeadlessAppBuilder::new().build();
        let cue = spawn_ball(&mut app, BallCategory::Cue, CUE_SPAWN);
        spawn_ball(&mut app, BallCategory::Red, Vec2::new(300.0, 200.0));

        // Fire along the x axis: nothing in the way, a couple of rail
        // bounces, then the shot settles
        let (ticks, events) = take_shot(&mut app, Vec2::new(-900.0, 0.0), MAX_SHOT_TICKS);
        assert!(ticks < MAX_SHOT_TICKS, "shot must settle");

        let kinds = kinds(&events);
        assert!(kinds.contains(&"shot_taken"));
        assert!(kinds.contains(&"foul_no_contact"));
        assert!(kinds.contains(&"turn_change"));

        let state = app.world().resource::<GameState>();
        assert_eq!(state.current_player, PlayerId::Two);
        // Foul spots the cue ball
        let transform = app.world().get::<Transform>(cue).unwrap();
        assert_eq!(transform.translation.x, CUE_SPAWN.x);
    }

    #[test]
    fn test_straight_pot_into_side_pocket_continues() {
        let mut app = HeadlessAppBuilder::new().build();
        let side_pocket = Table::standard().pockets[1].center;
        assert_eq!(side_pocket.x, 0.0);

        spawn_ball(&mut app, BallCategory::Cue, Vec2::new(0.0, 0.0));
        // Red lined up between cue and the top side pocket
        spawn_ball(
            &mut app,
            BallCategory::Red,
            Vec2::new(0.0, side_pocket.y - 60.0),
        );
        // Keep a second red far away so the group is not cleared
        spawn_ball(&mut app, BallCategory::Red, Vec2::new(-300.0, -100.0));
        spawn_ball(&mut app, BallCategory::Black, Vec2::new(300.0, -100.0));

        let (_, events) = take_shot(&mut app, Vec2::new(0.0, 900.0), MAX_SHOT_TICKS);
        let kinds = kinds(&events);
        assert!(kinds.contains(&"ball_potted"), "red should drop: {kinds:?}");
        assert!(kinds.contains(&"groups_assigned"));
        assert!(kinds.contains(&"player_continues"));

        let state = app.world().resource::<GameState>();
        assert_eq!(state.current_player, PlayerId::One);
        assert_eq!(
            state.ownership.get(PlayerId::One),
            Some(crate::ball::BallGroup::Red)
        );
        assert_eq!(table_counts(&mut app), (1, 0, 1));
    }

    #[test]
    fn test_cue_into_pocket_is_scratch_with_reset() {
        let mut app = HeadlessAppBuilder::new().build();
        let side_pocket = Table::standard().pockets[1].center;
        let cue = spawn_ball(&mut app, BallCategory::Cue, Vec2::new(0.0, 0.0));
        spawn_ball(&mut app, BallCategory::Red, Vec2::new(300.0, -150.0));

        let (_, events) = take_shot(
            &mut app,
            (side_pocket - Vec2::ZERO).normalize() * 900.0,
            MAX_SHOT_TICKS,
        );
        let kinds = kinds(&events);
        assert!(kinds.contains(&"foul_scratch"), "{kinds:?}");

        let state = app.world().resource::<GameState>();
        assert_eq!(state.current_player, PlayerId::Two);
        let transform = app.world().get::<Transform>(cue).unwrap();
        assert_eq!(transform.translation.truncate(), CUE_SPAWN);
        assert!(!app.world().get::<Potted>(cue).unwrap().0);
    }

    #[test]
    fn test_restart_mid_shot_discards_motion() {
        let mut app = HeadlessAppBuilder::new().with_rack(3).build();
        app.update();

        app.world_mut().resource_mut::<PendingShot>().0 = Some(Vec2::new(2000.0, 50.0));
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(*app.world().resource::<ShotPhase>(), ShotPhase::InMotion);

        app.world_mut()
            .resource_mut::<crate::table::RestartRequested>()
            .0 = true;
        app.update();

        assert_eq!(*app.world().resource::<ShotPhase>(), ShotPhase::Idle);
        let state = app.world().resource::<GameState>();
        assert_eq!(state.current_player, PlayerId::One);
        assert!(!state.ownership.is_assigned());
        assert_eq!(table_counts(&mut app), (RED_BALL_COUNT, YELLOW_BALL_COUNT, 1));

        let events = app.world_mut().resource_mut::<EventBus>().drain();
        assert!(
            events
                .iter()
                .any(|e| matches!(e.event, GameEvent::RackStart))
        );
    }
}
