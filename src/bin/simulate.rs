//! Headless batch simulator
//!
//! Plays a full match with seeded random shots and prints a shot-by-shot
//! report. Doubles as a determinism smoke test: the same seed replays the
//! same match.
//!
//! Usage:
//!   cargo run --bin simulate                      # default seed, 200 shots max
//!   cargo run --bin simulate -- --seed 7
//!   cargo run --bin simulate -- --shots 50 --log

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;

use poolgame::{
    Ball, BallCategory, EventBus, EventLogConfig, EventLogger, GameState, HeadlessAppBuilder,
    MAX_SHOT_TICKS, Potted, constants::*, event_kind, table_counts, take_shot,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    let seed = arg_value(&args, "--seed").unwrap_or(1);
    let max_shots = arg_value(&args, "--shots").unwrap_or(200);
    let log_events = args.iter().any(|a| a == "--log");

    println!("Poolgame simulation (seed {seed}, up to {max_shots} shots)");
    println!("=====================================================\n");

    let mut logger = EventLogger::new(EventLogConfig {
        enabled: log_events,
        ..Default::default()
    });
    if log_events {
        logger.start_session();
    }

    let mut app = HeadlessAppBuilder::new().with_rack(seed).build();
    app.update();

    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let mut shots_taken = 0;

    for shot_number in 1..=max_shots {
        if app.world().resource::<GameState>().game_over {
            break;
        }

        let player = app.world().resource::<GameState>().current_player;
        let velocity = pick_shot(&mut app, &mut rng);
        let (ticks, events) = take_shot(&mut app, velocity, MAX_SHOT_TICKS);
        shots_taken = shot_number;

        let kinds: Vec<&str> = events.iter().map(|e| event_kind(&e.event)).collect();
        let (red, yellow, black) = table_counts(&mut app);
        println!(
            "shot {shot_number:3} {player}  {:4} ticks  [{}]  reds {red} yellows {yellow} black {black}",
            ticks,
            kinds.join(", "),
        );

        for event in &events {
            logger.log(event.time_ms, &event.event);
        }
        logger.flush();
        app.world_mut().resource_mut::<EventBus>().clear_processed();
    }

    println!("\n=====================================================");
    let state = app.world().resource::<GameState>();
    match state.winner {
        Some(winner) => println!("{winner} wins after {shots_taken} shots"),
        None => println!("No winner after {shots_taken} shots"),
    }
    let (red, yellow, black) = table_counts(&mut app);
    println!("Final table: {red} reds, {yellow} yellows, black {}", if black > 0 { "up" } else { "down" });
}

/// Aim at a random unpotted non-cue ball with random power, with a little
/// angular scatter so play does not loop
fn pick_shot(app: &mut App, rng: &mut StdRng) -> Vec2 {
    let mut cue_pos = CUE_SPAWN;
    let mut targets = Vec::new();
    let mut query = app
        .world_mut()
        .query_filtered::<(&BallCategory, &Transform, &Potted), With<Ball>>();
    for (category, transform, potted) in query.iter(app.world()) {
        if potted.0 {
            continue;
        }
        if *category == BallCategory::Cue {
            cue_pos = transform.translation.truncate();
        } else {
            targets.push(transform.translation.truncate());
        }
    }
    if targets.is_empty() {
        return Vec2::new(SHOT_MAX_SPEED / 4.0, 0.0);
    }

    let target = targets[rng.gen_range(0..targets.len())];
    let direction = (target - cue_pos).normalize_or_zero();
    let scatter = rng.gen_range(-0.08..0.08_f32);
    let (sin, cos) = scatter.sin_cos();
    let aimed = Vec2::new(
        direction.x * cos - direction.y * sin,
        direction.x * sin + direction.y * cos,
    );
    aimed * rng.gen_range(900.0..SHOT_MAX_SPEED)
}

fn arg_value(args: &[String], name: &str) -> Option<u64> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
