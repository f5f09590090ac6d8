//! Lottery entities and draw phases
//!
//! Balls refer to their owner by id and the session refers to the showcase
//! ball by id; nothing holds a reference into the pool.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Hsl;

/// Stable participant identifier (never reused within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

/// Stable ball identifier (never reused within a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u64);

/// Current phase of the draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawPhase {
    /// Between rounds, waiting for start
    #[default]
    Idle,
    /// Balls churn fast before a winner is picked
    Rolling,
    /// Winning ball flies to the center and grows
    Showcase,
    /// Winner announced, confetti falling
    Reveal,
}

impl DrawPhase {
    /// Whether this phase carries a showcase ball
    pub fn has_showcase(self) -> bool {
        matches!(self, DrawPhase::Showcase | DrawPhase::Reveal)
    }
}

/// Rectangular arena, origin top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// A registered entrant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Number of balls this participant holds
    pub weight: u32,
    pub color: Hsl,
}

/// One weighted unit of chance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pool-wide value, stored per ball so the showcase ball can diverge
    pub radius: f32,
    pub color: Hsl,
    pub owner: ParticipantId,
    pub owner_name: String,
}

/// A confetti particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in reference frames
    pub life: f32,
    pub color: Hsl,
    pub size: f32,
}

impl Particle {
    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_phases() {
        assert!(!DrawPhase::Idle.has_showcase());
        assert!(!DrawPhase::Rolling.has_showcase());
        assert!(DrawPhase::Showcase.has_showcase());
        assert!(DrawPhase::Reveal.has_showcase());
    }

    #[test]
    fn test_arena_center() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.center(), Vec2::new(400.0, 300.0));
        assert_eq!(arena.min_side(), 600.0);
    }
}
