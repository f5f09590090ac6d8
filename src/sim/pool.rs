//! Entity pool: participants and their balls
//!
//! A participant with weight `w` owns exactly `w` balls from registration until
//! it is removed, and removal takes all of them in one step.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Ball, BallId, Participant, ParticipantId};
use crate::color::Hsl;
use crate::config::LotteryConfig;
use crate::error::ValidationError;

/// Random coordinate in `[inset, extent - inset)`, or the midpoint if the arena is too small
fn spawn_coord<R: Rng>(rng: &mut R, extent: f32, inset: f32) -> f32 {
    let span = extent - 2.0 * inset;
    if span > 0.0 {
        inset + rng.random::<f32>() * span
    } else {
        extent / 2.0
    }
}

/// Symmetric random value in `[-span/2, span/2)`
pub(crate) fn symmetric<R: Rng>(rng: &mut R, span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * span
}

/// Owns participant and ball records
#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    /// Registration order
    participants: Vec<Participant>,
    balls: Vec<Ball>,
    /// Ball excluded from pool-wide radius changes (the showcase ball)
    pinned: Option<BallId>,
    next_id: u64,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_entity_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Register a participant and spawn one ball per unit of weight
    pub fn add_participant<R: Rng>(
        &mut self,
        name: &str,
        weight: u32,
        config: &LotteryConfig,
        arena: Arena,
        rng: &mut R,
    ) -> Result<ParticipantId, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if weight == 0 {
            return Err(ValidationError::ZeroWeight);
        }
        if weight > config.max_weight {
            return Err(ValidationError::WeightTooLarge {
                weight,
                max: config.max_weight,
            });
        }

        let id = ParticipantId(self.next_entity_id());
        let color = Hsl::participant(rng.random_range(0..360) as f32);
        let radius = config.radius_for(self.balls.len());

        self.balls.reserve(weight as usize);
        for _ in 0..weight {
            let ball_id = BallId(self.next_entity_id());
            self.balls.push(Ball {
                id: ball_id,
                pos: Vec2::new(
                    spawn_coord(rng, arena.width, config.spawn_inset),
                    spawn_coord(rng, arena.height, config.spawn_inset),
                ),
                vel: Vec2::new(
                    symmetric(rng, config.ball_spawn_speed),
                    symmetric(rng, config.ball_spawn_speed),
                ),
                radius,
                color,
                owner: id,
                owner_name: name.to_string(),
            });
        }

        self.participants.push(Participant {
            id,
            name: name.to_string(),
            weight,
            color,
        });
        self.resize_balls(config);

        log::info!("Registered {} (weight {}), pool now {} balls", name, weight, self.balls.len());
        Ok(id)
    }

    /// Remove a participant and every ball it owns. Returns false if absent.
    pub fn remove_participant(&mut self, id: ParticipantId, config: &LotteryConfig) -> bool {
        let Some(index) = self.participants.iter().position(|p| p.id == id) else {
            return false;
        };
        let removed = self.participants.remove(index);
        self.balls.retain(|b| b.owner != id);
        if self.pinned.is_some_and(|pin| self.ball(pin).is_none()) {
            self.pinned = None;
        }
        self.resize_balls(config);

        log::info!("Removed {}, pool now {} balls", removed.name, self.balls.len());
        true
    }

    /// Drop every participant and ball. The id counter keeps running so ids
    /// handed out before the clear never match a later registration.
    pub fn clear(&mut self) {
        self.participants.clear();
        self.balls.clear();
        self.pinned = None;
    }

    /// Apply the pool-wide radius to every ball except the pinned one
    pub fn resize_balls(&mut self, config: &LotteryConfig) {
        let radius = config.radius_for(self.balls.len());
        let pinned = self.pinned;
        for ball in self.balls.iter_mut().filter(|b| Some(b.id) != pinned) {
            ball.radius = radius;
        }
        log::debug!("Ball radius {} for {} balls", radius, self.balls.len());
    }

    /// Exempt a ball from radius recomputes (or clear the exemption)
    pub fn pin(&mut self, ball: Option<BallId>) {
        self.pinned = ball;
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Balls owned by a participant
    pub fn balls_of(&self, id: ParticipantId) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(move |b| b.owner == id)
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}
