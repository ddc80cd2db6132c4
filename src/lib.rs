//! Poolgame - a two-player billiards match built with Bevy
//!
//! The core is a fixed tick chain over plain ball entities: integrate,
//! bounce off rails, resolve ball pairs, detect pockets, then adjudicate
//! the shot once everything has settled. Rendering and input live at the
//! edges; the whole game runs headless for simulation and testing.

// Core modules
pub mod constants;
pub mod events;
pub mod helpers;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod input;
pub mod rules;
pub mod shooting;
pub mod table;
pub mod ui;

// Re-export commonly used types for convenience
pub use ball::{
    Ball, BallCategory, BallGroup, Potted, Velocity, integrate_balls, rail_collisions,
    resolve_ball_collisions,
};
pub use constants::*;
pub use events::{
    BusEvent, EventBus, EventLogConfig, EventLogger, FoulReason, GameEvent, PlayerId, event_kind,
    flush_event_log, update_event_bus_time,
};
pub use helpers::{ball_color, cursor_to_world};
pub use input::{AimState, capture_aim, handle_commands};
pub use rules::{
    GameState, Ownership, ShotEvents, ShotPhase, adjudicate_shot, check_settled,
    remaining_in_group,
};
pub use shooting::{PendingShot, aim_velocity, strike_cue};
pub use simulation::{HeadlessAppBuilder, MAX_SHOT_TICKS, run_until_idle, table_counts, take_shot};
pub use table::{
    Pocket, RestartRequested, Table, check_pockets, handle_restart, rack_categories,
    rack_positions, spawn_ball, spawn_cue_ball, spawn_rack,
};
pub use tuning::{GameplayTuning, PhysicsTweaks, apply_global_tuning};
pub use ui::{
    BallCountText, Banner, MessageBanner, TurnText, draw_aim_line, update_ball_counts,
    update_banner, update_turn_text,
};
