//! Table geometry, rack construction, and restart handling

pub mod pockets;

pub use pockets::check_pockets;

use bevy::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::ball::{Ball, BallCategory, Potted, Velocity};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::helpers::ball_color;
use crate::rules::{GameState, ShotEvents, ShotPhase};

/// A pocket: capture center and radius
#[derive(Debug, Clone, Copy)]
pub struct Pocket {
    pub center: Vec2,
    pub radius: f32,
}

/// Static table geometry, immutable after construction
#[derive(Resource, Debug, Clone)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub rail: f32,
    pub pockets: [Pocket; POCKET_COUNT],
}

impl Table {
    /// The standard table: four corner pockets plus two side pockets, all
    /// centered on the rail line
    pub fn standard() -> Self {
        let half_w = TABLE_WIDTH / 2.0;
        let half_h = TABLE_HEIGHT / 2.0;
        let x = half_w - RAIL_THICKNESS;
        let y = half_h - RAIL_THICKNESS;
        let pocket = |center: Vec2| Pocket {
            center,
            radius: POCKET_RADIUS,
        };
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            rail: RAIL_THICKNESS,
            pockets: [
                pocket(Vec2::new(-x, y)),
                pocket(Vec2::new(0.0, y)),
                pocket(Vec2::new(x, y)),
                pocket(Vec2::new(-x, -y)),
                pocket(Vec2::new(0.0, -y)),
                pocket(Vec2::new(x, -y)),
            ],
        }
    }

    pub fn play_left(&self) -> f32 {
        -self.width / 2.0 + self.rail
    }

    pub fn play_right(&self) -> f32 {
        self.width / 2.0 - self.rail
    }

    pub fn play_bottom(&self) -> f32 {
        -self.height / 2.0 + self.rail
    }

    pub fn play_top(&self) -> f32 {
        self.height / 2.0 - self.rail
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::standard()
    }
}

/// The 15 rack slot positions: a 5-row triangle growing to the right from
/// the apex, rows offset so neighboring balls just clear each other
pub fn rack_positions() -> Vec<Vec2> {
    let mut positions = Vec::with_capacity(15);
    for row in 0..RACK_ROWS {
        for i in 0..=row {
            let x = RACK_APEX.x + row as f32 * RACK_GAP;
            let y = RACK_APEX.y - row as f32 * BALL_RADIUS + i as f32 * BALL_RADIUS * 2.0;
            positions.push(Vec2::new(x, y));
        }
    }
    positions
}

/// Assign categories to the 15 rack slots: the black goes to the fixed
/// center slot, the rest are a shuffled bag of seven reds and seven yellows
pub fn rack_categories(rng: &mut impl Rng) -> Vec<BallCategory> {
    let mut bag: Vec<BallCategory> = std::iter::repeat_n(BallCategory::Red, RED_BALL_COUNT)
        .chain(std::iter::repeat_n(BallCategory::Yellow, YELLOW_BALL_COUNT))
        .collect();
    bag.shuffle(rng);

    let mut categories = Vec::with_capacity(15);
    let mut bag_iter = bag.into_iter();
    for slot in 0..15 {
        if slot == 7 {
            categories.push(BallCategory::Black);
        } else {
            categories.push(bag_iter.next().expect("bag holds 14 object balls"));
        }
    }
    categories
}

/// Spawn one ball entity
pub fn spawn_ball(commands: &mut Commands, category: BallCategory, position: Vec2) -> Entity {
    commands
        .spawn((
            Sprite::from_color(ball_color(category), Vec2::splat(BALL_RADIUS * 2.0)),
            Transform::from_xyz(position.x, position.y, 1.0),
            Ball,
            category,
            Velocity::default(),
            Potted(false),
        ))
        .id()
}

/// Spawn the cue ball on its spot
pub fn spawn_cue_ball(commands: &mut Commands) -> Entity {
    spawn_ball(commands, BallCategory::Cue, CUE_SPAWN)
}

/// Spawn the full rack of 15 object balls with randomized group placement
pub fn spawn_rack(commands: &mut Commands, rng: &mut impl Rng) {
    let positions = rack_positions();
    let categories = rack_categories(rng);
    for (position, category) in positions.into_iter().zip(categories) {
        spawn_ball(commands, category, position);
    }
}

/// Set when a restart has been requested; consumed at the top of the next
/// tick. Restart is always accepted, even mid-shot or after game over.
#[derive(Resource, Default)]
pub struct RestartRequested(pub bool);

/// Tear down the current match and rack a fresh one
pub fn handle_restart(
    mut commands: Commands,
    mut restart: ResMut<RestartRequested>,
    mut state: ResMut<GameState>,
    mut shot_events: ResMut<ShotEvents>,
    mut phase: ResMut<ShotPhase>,
    mut bus: ResMut<EventBus>,
    balls: Query<Entity, With<Ball>>,
) {
    if !restart.0 {
        return;
    }
    restart.0 = false;

    for entity in &balls {
        commands.entity(entity).despawn();
    }

    let mut rng = rand::thread_rng();
    spawn_cue_ball(&mut commands);
    spawn_rack(&mut commands, &mut rng);

    *state = GameState::default();
    shot_events.clear();
    *phase = ShotPhase::Idle;
    bus.emit(GameEvent::RackStart);
    info!("Table racked; {} to break", state.current_player);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pocket_layout() {
        let table = Table::standard();
        assert_eq!(table.pockets.len(), POCKET_COUNT);
        // Corner pockets sit on the rail corners, side pockets at mid-width
        assert!(table.pockets.iter().any(|p| p.center.x == 0.0));
        let corner_x = TABLE_WIDTH / 2.0 - RAIL_THICKNESS;
        assert_eq!(
            table
                .pockets
                .iter()
                .filter(|p| p.center.x.abs() == corner_x)
                .count(),
            4
        );
        for pocket in &table.pockets {
            assert_eq!(pocket.radius, POCKET_RADIUS);
        }
    }

    #[test]
    fn test_rack_has_fifteen_collision_free_slots() {
        let positions = rack_positions();
        assert_eq!(positions.len(), 15);
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                let dist = a.distance(*b);
                assert!(
                    dist >= BALL_RADIUS * 2.0,
                    "rack slots {a} and {b} overlap (dist {dist})"
                );
            }
        }
        // The whole rack fits inside the play area
        for p in &positions {
            assert!(p.x + BALL_RADIUS < PLAY_RIGHT);
            assert!(p.y.abs() + BALL_RADIUS < PLAY_TOP);
        }
    }

    #[test]
    fn test_rack_categories_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let categories = rack_categories(&mut rng);
        assert_eq!(categories.len(), 15);
        assert_eq!(categories[7], BallCategory::Black);
        let reds = categories
            .iter()
            .filter(|c| **c == BallCategory::Red)
            .count();
        let yellows = categories
            .iter()
            .filter(|c| **c == BallCategory::Yellow)
            .count();
        assert_eq!(reds, RED_BALL_COUNT);
        assert_eq!(yellows, YELLOW_BALL_COUNT);
    }

    #[test]
    fn test_rack_shuffle_is_seed_deterministic() {
        let a = rack_categories(&mut StdRng::seed_from_u64(42));
        let b = rack_categories(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cue_spawn_clear_of_rack() {
        for p in rack_positions() {
            assert!(p.distance(CUE_SPAWN) > BALL_RADIUS * 2.0);
        }
    }
}
