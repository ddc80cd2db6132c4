//! Poolgame - a two-player billiards match built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::camera::ScalingMode;
use bevy::prelude::*;

use poolgame::{
    AimState, Banner, EventBus, EventLogConfig, EventLogger, GameEvent, GameState, PendingShot,
    PhysicsTweaks, PlayerId, RestartRequested, ShotEvents, ShotPhase, Table, ball, constants::*,
    events, input, rules, shooting, table, tuning, ui,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: bevy::window::WindowResolution::new(1280, 720)
                    .with_scale_factor_override(1.0),
                title: "Poolgame".into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.10, 0.10, 0.12)))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE as f64))
        .insert_resource(Table::standard())
        .init_resource::<GameState>()
        .init_resource::<ShotEvents>()
        .init_resource::<ShotPhase>()
        .init_resource::<PendingShot>()
        .init_resource::<AimState>()
        .init_resource::<RestartRequested>()
        .init_resource::<Banner>()
        .init_resource::<PhysicsTweaks>()
        .insert_resource(EventBus::new())
        .insert_resource(EventLogger::new(EventLogConfig::default()))
        .add_systems(Startup, setup)
        // Input runs in Update so no press is missed between ticks; the
        // banner must read the bus after commands emit and before the
        // logger drains it
        .add_systems(
            Update,
            (
                input::capture_aim,
                input::handle_commands,
                events::update_event_bus_time,
                ui::update_banner,
                events::flush_event_log,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (ui::update_turn_text, ui::update_ball_counts, ui::draw_aim_line),
        )
        // The core tick chain
        .add_systems(
            FixedUpdate,
            (
                table::handle_restart,
                shooting::strike_cue,
                ball::integrate_balls,
                ball::rail_collisions,
                ball::resolve_ball_collisions,
                table::check_pockets,
                rules::check_settled,
                rules::adjudicate_shot,
            )
                .chain(),
        )
        .run();
}

/// Setup the game world: camera, table, balls, HUD
fn setup(
    mut commands: Commands,
    table: Res<Table>,
    mut tweaks: ResMut<PhysicsTweaks>,
    mut bus: ResMut<EventBus>,
    mut logger: ResMut<EventLogger>,
) {
    tuning::apply_global_tuning(&mut tweaks);
    logger.start_session();

    // Camera - orthographic, shows the whole table plus a margin
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: TABLE_HEIGHT + 2.0 * VIEW_MARGIN,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));

    // Cloth
    commands.spawn((
        Sprite::from_color(CLOTH_COLOR, Vec2::new(table.width, table.height)),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    // Rails
    let half_w = table.width / 2.0;
    let half_h = table.height / 2.0;
    let rail = table.rail;
    let horizontal = Vec2::new(table.width, rail);
    let vertical = Vec2::new(rail, table.height - 2.0 * rail);
    commands.spawn((
        Sprite::from_color(RAIL_COLOR, horizontal),
        Transform::from_xyz(0.0, half_h - rail / 2.0, 0.0),
    ));
    commands.spawn((
        Sprite::from_color(RAIL_COLOR, horizontal),
        Transform::from_xyz(0.0, -half_h + rail / 2.0, 0.0),
    ));
    commands.spawn((
        Sprite::from_color(RAIL_COLOR, vertical),
        Transform::from_xyz(-half_w + rail / 2.0, 0.0, 0.0),
    ));
    commands.spawn((
        Sprite::from_color(RAIL_COLOR, vertical),
        Transform::from_xyz(half_w - rail / 2.0, 0.0, 0.0),
    ));

    // Pocket mouths
    for pocket in &table.pockets {
        commands.spawn((
            Sprite::from_color(POCKET_COLOR, Vec2::splat(pocket.radius * 2.0)),
            Transform::from_xyz(pocket.center.x, pocket.center.y, 0.5),
        ));
    }

    // Balls
    let mut rng = rand::thread_rng();
    table::spawn_cue_ball(&mut commands);
    table::spawn_rack(&mut commands, &mut rng);
    bus.emit(GameEvent::RackStart);

    // Banner - transient announcements above the table
    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(TEXT_ACCENT),
        Transform::from_xyz(0.0, half_h + VIEW_MARGIN / 2.0, 1.0),
        ui::MessageBanner,
    ));

    // Turn indicator below the table
    commands.spawn((
        Text2d::new("Turn: Player 1"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(TEXT_PRIMARY),
        Transform::from_xyz(0.0, -half_h - VIEW_MARGIN / 2.0, 1.0),
        ui::TurnText,
    ));

    // Per-player ball counts in the lower corners
    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Left),
        TextColor(TEXT_PRIMARY),
        Transform::from_xyz(-half_w + 120.0, -half_h - VIEW_MARGIN / 2.0, 1.0),
        ui::BallCountText(PlayerId::One),
    ));
    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Right),
        TextColor(TEXT_PRIMARY),
        Transform::from_xyz(half_w - 120.0, -half_h - VIEW_MARGIN / 2.0, 1.0),
        ui::BallCountText(PlayerId::Two),
    ));
}
