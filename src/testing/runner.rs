//! Scenario runner: plays one scripted shot through the headless app

use bevy::prelude::*;

use crate::ball::{Ball, Potted, Velocity};
use crate::events::{PlayerId, event_kind};
use crate::rules::GameState;
use crate::simulation::{HeadlessAppBuilder, MAX_SHOT_TICKS, take_shot};
use crate::testing::assertions::{check_forbidden, check_sequence, check_state};
use crate::testing::parser::{ScenarioDefinition, parse_category, parse_group};

/// Outcome of running one scenario
#[derive(Debug)]
pub enum ScenarioResult {
    Pass { ticks: u32 },
    Fail { message: String },
    Error { message: String },
}

/// Build the table described by the scenario, take its shot, and evaluate
/// the expectations
pub fn run_scenario(def: &ScenarioDefinition) -> ScenarioResult {
    let mut app = HeadlessAppBuilder::new().build();

    // Match state
    {
        let current_player = match PlayerId::from_number(def.setup.current_player) {
            Some(p) => p,
            None => {
                return ScenarioResult::Error {
                    message: format!("bad current_player {}", def.setup.current_player),
                };
            }
        };
        let mut state = app.world_mut().resource_mut::<GameState>();
        state.current_player = current_player;
        if let Some(ownership) = &def.setup.ownership {
            let group = match parse_group(&ownership.player1) {
                Ok(g) => g,
                Err(e) => return ScenarioResult::Error { message: e },
            };
            match parse_group(&ownership.player2) {
                Ok(g) if g == group.opposite() => {}
                Ok(_) => {
                    return ScenarioResult::Error {
                        message: "ownership groups must be complementary".to_string(),
                    };
                }
                Err(e) => return ScenarioResult::Error { message: e },
            }
            state.ownership.assign(PlayerId::One, group);
        }
    }

    // Table layout
    for ball in &def.setup.balls {
        let category = match parse_category(&ball.category) {
            Ok(c) => c,
            Err(e) => return ScenarioResult::Error { message: e },
        };
        app.world_mut().spawn((
            Ball,
            category,
            Transform::from_xyz(ball.x, ball.y, 0.0),
            Velocity(Vec2::new(ball.vx, ball.vy)),
            Potted(ball.potted),
        ));
    }

    // The shot
    let (ticks, events) = match def.shot {
        Some(shot) => take_shot(&mut app, Vec2::new(shot.vx, shot.vy), MAX_SHOT_TICKS),
        None => {
            app.update();
            (1, app.world_mut().resource_mut::<crate::events::EventBus>().drain())
        }
    };
    if ticks >= MAX_SHOT_TICKS {
        return ScenarioResult::Fail {
            message: format!("shot did not settle within {MAX_SHOT_TICKS} ticks"),
        };
    }

    // Expectations
    let kinds: Vec<&str> = events.iter().map(|e| event_kind(&e.event)).collect();
    if let Err(e) = check_sequence(&def.expect.events, &kinds) {
        return ScenarioResult::Fail {
            message: format!("{e} (events seen: {kinds:?})"),
        };
    }
    if let Err(e) = check_forbidden(&def.expect.forbidden, &kinds) {
        return ScenarioResult::Fail { message: e.message };
    }
    if let Some(expect) = &def.expect.state
        && let Err(e) = check_state(expect, &mut app)
    {
        return ScenarioResult::Fail { message: e.message };
    }

    ScenarioResult::Pass { ticks }
}
