//! Shot rule engine - turn state machine, fouls, and win/loss
//!
//! A shot accumulates events (pots, scratch, first contact) into
//! `ShotEvents` while the balls are moving; once every unpotted ball has
//! settled the shot is adjudicated in a single pass with a strict rule
//! precedence, and only then is `GameState` allowed to change.

use bevy::prelude::*;

use crate::ball::{Ball, BallCategory, BallGroup, Potted, Velocity};
use crate::constants::*;
use crate::events::{EventBus, FoulReason, GameEvent, PlayerId};
use crate::tuning::PhysicsTweaks;

/// Turn state machine. `Adjudicating` lasts exactly one tick: it is set by
/// `check_settled` and consumed by `adjudicate_shot` in the same chain.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShotPhase {
    #[default]
    Idle,
    InMotion,
    Adjudicating,
}

/// Per-shot event accumulator. Cleared when a shot starts and after it is
/// adjudicated.
#[derive(Resource, Debug, Default)]
pub struct ShotEvents {
    /// Object balls potted this shot, in pot order
    pub potted: Vec<BallCategory>,
    /// Cue ball was pocketed
    pub scratch: bool,
    /// Black ball was pocketed
    pub black_potted: bool,
    /// First non-cue ball the cue ball touched this shot
    pub first_contact: Option<BallCategory>,
}

impl ShotEvents {
    pub fn clear(&mut self) {
        self.potted.clear();
        self.scratch = false;
        self.black_potted = false;
        self.first_contact = None;
    }
}

/// Object-ball group assignment per player. Once any assignment happens both
/// players get complementary groups and they are never reassigned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    one: Option<BallGroup>,
    two: Option<BallGroup>,
}

impl Ownership {
    pub fn get(&self, player: PlayerId) -> Option<BallGroup> {
        match player {
            PlayerId::One => self.one,
            PlayerId::Two => self.two,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.one.is_some()
    }

    /// Assign `group` to `player` and the opposite group to the opponent.
    /// Does nothing if groups were already assigned.
    pub fn assign(&mut self, player: PlayerId, group: BallGroup) {
        if self.is_assigned() {
            return;
        }
        match player {
            PlayerId::One => {
                self.one = Some(group);
                self.two = Some(group.opposite());
            }
            PlayerId::Two => {
                self.two = Some(group);
                self.one = Some(group.opposite());
            }
        }
    }
}

/// Match state, mutated only between shots by the rule engine
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub current_player: PlayerId,
    pub ownership: Ownership,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_player: PlayerId::One,
            ownership: Ownership::default(),
            game_over: false,
            winner: None,
        }
    }
}

/// Count unpotted balls of a group, for the win check and the scoreboard
pub fn remaining_in_group<'a, I>(balls: I, group: BallGroup) -> usize
where
    I: IntoIterator<Item = (&'a BallCategory, &'a Potted)>,
{
    balls
        .into_iter()
        .filter(|(category, potted)| !potted.0 && category.group() == Some(group))
        .count()
}

/// Flip to `Adjudicating` once the whole shot has settled: every unpotted
/// ball below the stillness threshold simultaneously, not per-ball.
pub fn check_settled(
    tweaks: Res<PhysicsTweaks>,
    mut phase: ResMut<ShotPhase>,
    balls: Query<(&Velocity, &Potted), With<Ball>>,
) {
    if *phase != ShotPhase::InMotion {
        return;
    }
    let all_still = balls
        .iter()
        .all(|(velocity, potted)| potted.0 || velocity.0.length() < tweaks.stop_epsilon);
    if all_still {
        *phase = ShotPhase::Adjudicating;
    }
}

/// Evaluate the accumulated `ShotEvents` once and update `GameState`.
///
/// Rule precedence (first match wins):
/// 1. black potted - win if the potter's group is cleared, otherwise loss
/// 2. wrong ball contacted first - foul
/// 3. no contact at all - foul
/// 4. only opponent's balls potted - foul
/// 5. scratch - foul
/// 6. potted one of your own - continue; otherwise turn passes
///
/// Every foul switches the turn and puts the cue ball back on its spot.
pub fn adjudicate_shot(
    mut phase: ResMut<ShotPhase>,
    mut state: ResMut<GameState>,
    mut shot_events: ResMut<ShotEvents>,
    mut bus: ResMut<EventBus>,
    mut balls: Query<(&BallCategory, &mut Transform, &mut Velocity, &mut Potted), With<Ball>>,
) {
    if *phase != ShotPhase::Adjudicating {
        return;
    }
    *phase = ShotPhase::Idle;

    // Group assignment side effect: the first object ball potted while no
    // groups exist decides ownership, even if the shot ends up a foul.
    if !state.ownership.is_assigned()
        && let Some(group) = shot_events.potted.iter().find_map(|c| c.group())
    {
        let potter = state.current_player;
        state.ownership.assign(potter, group);
        bus.emit(GameEvent::GroupsAssigned {
            player: potter,
            group,
        });
        info!("{} is now {}", potter, group.name());
    }

    let potter = state.current_player;
    let my_group = state.ownership.get(potter);

    // 1. Black potted ends the game either way
    if shot_events.black_potted {
        let cleared = my_group
            .map(|group| remaining_in_group(balls.iter().map(|(c, _, _, p)| (c, p)), group) == 0)
            .unwrap_or(false);
        let (winner, foul) = if cleared {
            (potter, false)
        } else {
            (potter.other(), true)
        };
        state.game_over = true;
        state.winner = Some(winner);
        bus.emit(GameEvent::GameOver { winner, foul });
        info!("Game over: {} wins (foul: {})", winner, foul);
        shot_events.clear();
        return;
    }

    // 2. Wrong ball contacted first
    if let (Some(group), Some(contact)) = (my_group, shot_events.first_contact)
        && contact != BallCategory::Black
        && contact.group() != Some(group)
    {
        end_with_foul(FoulReason::WrongBallFirst, &mut state, &mut bus, &mut balls);
        shot_events.clear();
        return;
    }

    // 3. Missed everything (a scratch is handled by rule 5 instead)
    if shot_events.first_contact.is_none() && !shot_events.scratch {
        end_with_foul(FoulReason::NoContact, &mut state, &mut bus, &mut balls);
        shot_events.clear();
        return;
    }

    // 4. Potted only opponent balls
    if let Some(group) = my_group
        && !shot_events.potted.is_empty()
        && shot_events
            .potted
            .iter()
            .all(|c| c.group() == Some(group.opposite()))
    {
        end_with_foul(
            FoulReason::OnlyOpponentBalls,
            &mut state,
            &mut bus,
            &mut balls,
        );
        shot_events.clear();
        return;
    }

    // 5. Scratch
    if shot_events.scratch {
        end_with_foul(FoulReason::Scratch, &mut state, &mut bus, &mut balls);
        shot_events.clear();
        return;
    }

    // 6. Default: potting one of your own keeps the table. Before groups are
    // assigned, any pot at all does.
    let potted_mine = match my_group {
        Some(group) => shot_events
            .potted
            .iter()
            .any(|c| c.group() == Some(group)),
        None => !shot_events.potted.is_empty(),
    };
    if potted_mine {
        bus.emit(GameEvent::PlayerContinues { player: potter });
    } else {
        switch_turn(&mut state, &mut bus);
    }
    shot_events.clear();
}

fn switch_turn(state: &mut GameState, bus: &mut EventBus) {
    state.current_player = state.current_player.other();
    bus.emit(GameEvent::TurnChange {
        player: state.current_player,
    });
}

/// Foul handling shared by rules 2-5: announce, reset the cue ball to its
/// spot (ball in hand is uniform across fouls here), pass the turn.
fn end_with_foul(
    reason: FoulReason,
    state: &mut GameState,
    bus: &mut EventBus,
    balls: &mut Query<(&BallCategory, &mut Transform, &mut Velocity, &mut Potted), With<Ball>>,
) {
    let offender = state.current_player;
    bus.emit(GameEvent::Foul {
        player: offender,
        reason,
    });
    info!("Foul by {}: {:?}", offender, reason);
    reset_cue_ball(balls);
    switch_turn(state, bus);
}

/// Put the cue ball back on its starting spot, stationary and back in play
pub fn reset_cue_ball(
    balls: &mut Query<(&BallCategory, &mut Transform, &mut Velocity, &mut Potted), With<Ball>>,
) {
    for (category, mut transform, mut velocity, mut potted) in balls.iter_mut() {
        if *category == BallCategory::Cue {
            transform.translation.x = CUE_SPAWN.x;
            transform.translation.y = CUE_SPAWN.y;
            velocity.0 = Vec2::ZERO;
            potted.0 = false;
        }
    }
}
