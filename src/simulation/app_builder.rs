//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps running the
//! full tick chain. Used by the simulate binary, the scenario runner, and
//! integration tests. The chain is registered in `Update` so every
//! `app.update()` is exactly one deterministic tick (the physics systems
//! clamp their dt to a full tick when no wall time has passed).

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use crate::ball::{integrate_balls, rail_collisions, resolve_ball_collisions};
use crate::constants::*;
use crate::events::{EventBus, update_event_bus_time};
use crate::rules::{GameState, ShotEvents, ShotPhase, adjudicate_shot, check_settled};
use crate::shooting::{PendingShot, strike_cue};
use crate::table::{
    RestartRequested, Table, check_pockets, handle_restart, spawn_cue_ball, spawn_rack,
};
use crate::tuning::PhysicsTweaks;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    rack_seed: Option<u64>,
    fps: f32,
    bus_enabled: bool,
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings (empty table, enabled bus)
    pub fn new() -> Self {
        Self {
            rack_seed: None,
            fps: TICK_RATE,
            bus_enabled: true,
        }
    }

    /// Spawn a full rack at startup, shuffled with the given seed
    pub fn with_rack(mut self, seed: u64) -> Self {
        self.rack_seed = Some(seed);
        self
    }

    /// Set the target tick rate (default: TICK_RATE)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Drop all bus events instead of accumulating them
    pub fn with_disabled_bus(mut self) -> Self {
        self.bus_enabled = false;
        self
    }

    /// Build the app with minimal plugins, core resources, and the full
    /// tick chain. Callers spawn balls themselves unless `with_rack` was
    /// requested.
    pub fn build(self) -> App {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f32(1.0 / self.fps),
        )));

        app.insert_resource(Table::standard());
        app.init_resource::<GameState>();
        app.init_resource::<ShotEvents>();
        app.init_resource::<ShotPhase>();
        app.init_resource::<PendingShot>();
        app.init_resource::<RestartRequested>();
        app.init_resource::<PhysicsTweaks>();
        app.insert_resource(if self.bus_enabled {
            EventBus::new()
        } else {
            EventBus::disabled()
        });

        app.add_systems(
            Update,
            (
                update_event_bus_time,
                handle_restart,
                strike_cue,
                integrate_balls,
                rail_collisions,
                resolve_ball_collisions,
                check_pockets,
                check_settled,
                adjudicate_shot,
            )
                .chain(),
        );

        if let Some(seed) = self.rack_seed {
            app.add_systems(Startup, move |mut commands: Commands| {
                let mut rng = StdRng::seed_from_u64(seed);
                spawn_cue_ball(&mut commands);
                spawn_rack(&mut commands, &mut rng);
            });
        }

        app
    }
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{Ball, BallCategory, Potted};

    #[test]
    fn test_builder_creates_app_with_resources() {
        let app = HeadlessAppBuilder::new().build();
        assert!(app.world().contains_resource::<GameState>());
        assert!(app.world().contains_resource::<Table>());
        assert!(app.world().contains_resource::<ShotPhase>());
    }

    #[test]
    fn test_rack_spawns_full_ball_set() {
        let mut app = HeadlessAppBuilder::new().with_rack(1).build();
        app.update();

        let mut counts = (0, 0, 0, 0);
        let mut query = app
            .world_mut()
            .query_filtered::<(&BallCategory, &Potted), With<Ball>>();
        for (category, potted) in query.iter(app.world()) {
            assert!(!potted.0);
            match category {
                BallCategory::Cue => counts.0 += 1,
                BallCategory::Black => counts.1 += 1,
                BallCategory::Red => counts.2 += 1,
                BallCategory::Yellow => counts.3 += 1,
            }
        }
        assert_eq!(counts, (1, 1, RED_BALL_COUNT, YELLOW_BALL_COUNT));
    }
}
