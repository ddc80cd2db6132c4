//! Ball-related components

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker for ball entities
#[derive(Component)]
pub struct Ball;

/// Linear velocity in px/s
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// True once the ball has dropped into a pocket. A potted ball keeps its
/// entity but is skipped by every physics, collision, and pocket system
/// until explicitly reset (cue ball after a scratch).
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Potted(pub bool);

/// Object-ball group a player can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallGroup {
    Red,
    Yellow,
}

impl BallGroup {
    /// The group the other player gets
    pub fn opposite(&self) -> BallGroup {
        match self {
            BallGroup::Red => BallGroup::Yellow,
            BallGroup::Yellow => BallGroup::Red,
        }
    }

    /// Name for display
    pub fn name(&self) -> &'static str {
        match self {
            BallGroup::Red => "red",
            BallGroup::Yellow => "yellow",
        }
    }
}

/// What kind of ball this is
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallCategory {
    Cue,
    Black,
    Red,
    Yellow,
}

impl BallCategory {
    /// The ownable group this ball belongs to (None for cue/black)
    pub fn group(&self) -> Option<BallGroup> {
        match self {
            BallCategory::Red => Some(BallGroup::Red),
            BallCategory::Yellow => Some(BallGroup::Yellow),
            BallCategory::Cue | BallCategory::Black => None,
        }
    }

    pub fn is_object_ball(&self) -> bool {
        self.group().is_some()
    }

    pub fn name(&self) -> &'static str {
        match self {
            BallCategory::Cue => "cue",
            BallCategory::Black => "black",
            BallCategory::Red => "red",
            BallCategory::Yellow => "yellow",
        }
    }
}

impl From<BallGroup> for BallCategory {
    fn from(group: BallGroup) -> Self {
        match group {
            BallGroup::Red => BallCategory::Red,
            BallGroup::Yellow => BallCategory::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_mapping() {
        assert_eq!(BallCategory::Red.group(), Some(BallGroup::Red));
        assert_eq!(BallCategory::Yellow.group(), Some(BallGroup::Yellow));
        assert_eq!(BallCategory::Cue.group(), None);
        assert_eq!(BallCategory::Black.group(), None);
    }

    #[test]
    fn test_opposite_groups() {
        assert_eq!(BallGroup::Red.opposite(), BallGroup::Yellow);
        assert_eq!(BallGroup::Yellow.opposite(), BallGroup::Red);
    }
}
