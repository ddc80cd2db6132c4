//! Scenario outcome assertions

use bevy::prelude::*;

use crate::ball::{Ball, BallCategory, BallGroup, Potted};
use crate::constants::*;
use crate::events::PlayerId;
use crate::rules::{GameState, remaining_in_group};
use crate::testing::parser::{StateExpect, parse_group};

/// A failed expectation with a human-readable message
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Check that `expected` event kinds appear in `actual` in order; unrelated
/// events may interleave freely.
pub fn check_sequence(expected: &[String], actual: &[&str]) -> Result<(), AssertionError> {
    let mut cursor = 0;
    for kind in expected {
        match actual[cursor..].iter().position(|a| a == kind) {
            Some(offset) => cursor += offset + 1,
            None => {
                return Err(AssertionError::new(format!(
                    "expected event '{kind}' not found (in order) in {actual:?}"
                )));
            }
        }
    }
    Ok(())
}

/// Check that none of the `forbidden` event kinds were emitted
pub fn check_forbidden(forbidden: &[String], actual: &[&str]) -> Result<(), AssertionError> {
    for kind in forbidden {
        if actual.iter().any(|a| a == kind) {
            return Err(AssertionError::new(format!(
                "forbidden event '{kind}' was emitted: {actual:?}"
            )));
        }
    }
    Ok(())
}

/// Check post-shot state expectations against the app world
pub fn check_state(expect: &StateExpect, app: &mut App) -> Result<(), AssertionError> {
    let state = *app.world().resource::<GameState>();

    if let Some(n) = expect.current_player {
        let expected = PlayerId::from_number(n)
            .ok_or_else(|| AssertionError::new(format!("bad player number {n}")))?;
        if state.current_player != expected {
            return Err(AssertionError::new(format!(
                "current_player is {}, expected {}",
                state.current_player, expected
            )));
        }
    }

    if let Some(expected) = expect.game_over
        && state.game_over != expected
    {
        return Err(AssertionError::new(format!(
            "game_over is {}, expected {}",
            state.game_over, expected
        )));
    }

    if let Some(n) = expect.winner {
        let expected = PlayerId::from_number(n)
            .ok_or_else(|| AssertionError::new(format!("bad player number {n}")))?;
        if state.winner != Some(expected) {
            return Err(AssertionError::new(format!(
                "winner is {:?}, expected {}",
                state.winner, expected
            )));
        }
    }

    for (label, expected_name, player) in [
        ("player1_group", &expect.player1_group, PlayerId::One),
        ("player2_group", &expect.player2_group, PlayerId::Two),
    ] {
        if let Some(name) = expected_name {
            let expected = parse_group(name)
                .map_err(|e| AssertionError::new(format!("{label}: {e}")))?;
            if state.ownership.get(player) != Some(expected) {
                return Err(AssertionError::new(format!(
                    "{label} is {:?}, expected {:?}",
                    state.ownership.get(player),
                    expected
                )));
            }
        }
    }

    let mut balls = app
        .world_mut()
        .query_filtered::<(&BallCategory, &Transform, &Potted), With<Ball>>();

    if let Some(expected) = expect.cue_at_spawn {
        let cue = balls
            .iter(app.world())
            .find(|(c, _, _)| **c == BallCategory::Cue)
            .ok_or_else(|| AssertionError::new("no cue ball on the table"))?;
        let at_spawn = !cue.2.0 && cue.1.translation.truncate().distance(CUE_SPAWN) < 0.5;
        if at_spawn != expected {
            return Err(AssertionError::new(format!(
                "cue_at_spawn is {at_spawn}, expected {expected} (cue at {:?})",
                cue.1.translation.truncate()
            )));
        }
    }

    for (label, expected, group) in [
        ("red_remaining", expect.red_remaining, BallGroup::Red),
        ("yellow_remaining", expect.yellow_remaining, BallGroup::Yellow),
    ] {
        if let Some(expected) = expected {
            let remaining = remaining_in_group(
                balls.iter(app.world()).map(|(c, _, p)| (c, p)),
                group,
            );
            if remaining != expected {
                return Err(AssertionError::new(format!(
                    "{label} is {remaining}, expected {expected}"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_allows_interleaving() {
        let expected = vec!["shot_taken".to_string(), "turn_change".to_string()];
        let actual = ["shot_taken", "ball_potted", "foul_scratch", "turn_change"];
        assert!(check_sequence(&expected, &actual).is_ok());
    }

    #[test]
    fn test_sequence_rejects_wrong_order() {
        let expected = vec!["turn_change".to_string(), "shot_taken".to_string()];
        let actual = ["shot_taken", "turn_change"];
        assert!(check_sequence(&expected, &actual).is_err());
    }

    #[test]
    fn test_sequence_rejects_missing_event() {
        let expected = vec!["game_over".to_string()];
        let actual = ["shot_taken", "turn_change"];
        assert!(check_sequence(&expected, &actual).is_err());
    }
}
