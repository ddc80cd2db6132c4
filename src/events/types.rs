//! Event type definitions for announcements and the session log

use serde::{Deserialize, Serialize};

use crate::ball::{BallCategory, BallGroup};

/// Player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The opponent
    pub fn other(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<PlayerId> {
        match n {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Reason a shot was ruled a foul
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoulReason {
    /// Cue ball contacted an opponent ball before any of the potter's own
    WrongBallFirst,
    /// Cue ball touched nothing at all
    NoContact,
    /// Every ball potted this shot belonged to the opponent
    OnlyOpponentBalls,
    /// Cue ball was pocketed
    Scratch,
}

/// All game events that can be announced and logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },
    /// Fresh rack placed on the table (initial setup and every restart)
    RackStart,
    /// Cue ball struck
    ShotTaken { player: PlayerId, speed: f32 },
    /// Any ball dropped into a pocket
    BallPotted { category: BallCategory },
    /// First object ball potted with no groups assigned yet
    GroupsAssigned { player: PlayerId, group: BallGroup },
    /// Shot ruled a foul
    Foul { player: PlayerId, reason: FoulReason },
    /// Turn passed to the other player
    TurnChange { player: PlayerId },
    /// Potter keeps the table
    PlayerContinues { player: PlayerId },
    /// Black ball potted; match is over
    GameOver { winner: PlayerId, foul: bool },
    /// Session terminated by the player
    SessionEnd,
}

impl GameEvent {
    /// Human-readable banner text, if this event is announced to the players
    pub fn describe(&self) -> Option<String> {
        match self {
            GameEvent::Foul { player, reason } => Some(match reason {
                FoulReason::WrongBallFirst => "Foul! Wrong ball first.".to_string(),
                FoulReason::NoContact => "Foul! Missed all balls.".to_string(),
                FoulReason::OnlyOpponentBalls => "Foul! Only opponent's balls potted.".to_string(),
                FoulReason::Scratch => {
                    format!("Scratch! Ball in hand for {}.", player.other())
                }
            }),
            GameEvent::TurnChange { player } => Some(format!("Turn: {player}")),
            GameEvent::PlayerContinues { player } => Some(format!("{player} continues.")),
            GameEvent::GameOver { winner, foul } => Some(if *foul {
                format!("{winner} wins! Black potted early by {}.", winner.other())
            } else {
                format!("{winner} wins!")
            }),
            _ => None,
        }
    }
}

/// Short machine-readable kind tag, used by the scenario runner to match
/// expected event sequences
pub fn event_kind(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::SessionStart { .. } => "session_start",
        GameEvent::RackStart => "rack_start",
        GameEvent::ShotTaken { .. } => "shot_taken",
        GameEvent::BallPotted { .. } => "ball_potted",
        GameEvent::GroupsAssigned { .. } => "groups_assigned",
        GameEvent::Foul { reason, .. } => match reason {
            FoulReason::WrongBallFirst => "foul_wrong_ball_first",
            FoulReason::NoContact => "foul_no_contact",
            FoulReason::OnlyOpponentBalls => "foul_opponent_balls",
            FoulReason::Scratch => "foul_scratch",
        },
        GameEvent::TurnChange { .. } => "turn_change",
        GameEvent::PlayerContinues { .. } => "player_continues",
        GameEvent::GameOver { .. } => "game_over",
        GameEvent::SessionEnd => "session_end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
    }

    #[test]
    fn test_scratch_names_incoming_player() {
        let event = GameEvent::Foul {
            player: PlayerId::One,
            reason: FoulReason::Scratch,
        };
        assert_eq!(
            event.describe().unwrap(),
            "Scratch! Ball in hand for Player 2."
        );
    }

    #[test]
    fn test_silent_events_have_no_banner() {
        assert!(GameEvent::RackStart.describe().is_none());
        assert!(
            GameEvent::BallPotted {
                category: BallCategory::Red
            }
            .describe()
            .is_none()
        );
    }
}
