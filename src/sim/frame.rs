//! Read-only frame snapshots for renderers and page glue

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Arena, Ball, BallId, DrawPhase, Particle, ParticipantId};
use crate::color::Hsl;

/// One ball as drawn this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: BallId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Hsl,
    pub owner: ParticipantId,
    /// This is the selected winning ball
    pub showcase: bool,
}

impl BallSnapshot {
    pub fn capture(ball: &Ball, showcase: bool) -> Self {
        Self {
            id: ball.id,
            pos: ball.pos,
            radius: ball.radius,
            color: ball.color,
            owner: ball.owner,
            showcase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub pos: Vec2,
    pub size: f32,
    pub color: Hsl,
}

impl From<&Particle> for ParticleSnapshot {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            color: p.color,
        }
    }
}

/// The selected ball plus what the overlay needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseView {
    pub ball: BallSnapshot,
    pub owner_name: String,
    /// Winner identity is public (Reveal phase)
    pub revealed: bool,
}

/// Placeholder message for an empty arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Nobody has registered yet
    AwaitingEntries,
    /// Every ball has been drawn
    PoolExhausted,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    pub phase: DrawPhase,
    pub arena: Arena,
    /// Pool order; the showcase ball is included and flagged
    pub balls: Vec<BallSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    pub showcase: Option<ShowcaseView>,
    pub participant_count: usize,
    pub ball_count: usize,
    pub winner_count: usize,
    pub notice: Option<Notice>,
    /// Session clock (ms)
    pub clock_ms: f64,
}

impl FrameState {
    /// Balls other than the showcase ball
    pub fn background_balls(&self) -> impl Iterator<Item = &BallSnapshot> {
        self.balls.iter().filter(|b| !b.showcase)
    }

    /// Background balls are dimmed while a winner is on stage
    pub fn background_dimmed(&self) -> bool {
        self.phase.has_showcase()
    }
}
