//! Lottery configuration
//!
//! Defaults reproduce the classic draw: 3s of rolling, a half-second showcase,
//! 3s of reveal. Every field can be overridden from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LotteryError, LotteryResult};
use crate::sim::DrawPhase;

/// Ball speed multiplier for each phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedMultipliers {
    pub idle: f32,
    pub rolling: f32,
    pub showcase: f32,
    pub reveal: f32,
}

impl Default for SpeedMultipliers {
    fn default() -> Self {
        Self {
            idle: SPEED_IDLE,
            rolling: SPEED_ROLLING,
            showcase: SPEED_SHOWCASE,
            reveal: SPEED_REVEAL,
        }
    }
}

impl SpeedMultipliers {
    pub fn for_phase(&self, phase: DrawPhase) -> f32 {
        match phase {
            DrawPhase::Idle => self.idle,
            DrawPhase::Rolling => self.rolling,
            DrawPhase::Showcase => self.showcase,
            DrawPhase::Reveal => self.reveal,
        }
    }
}

/// Confetti burst parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Downward acceleration per reference frame
    pub gravity: f32,
    /// Velocity span per axis, centered on zero
    pub speed: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub size_min: f32,
    pub size_max: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            gravity: PARTICLE_GRAVITY,
            speed: PARTICLE_SPEED,
            life_min: 100.0,
            life_max: 150.0,
            size_min: 2.0,
            size_max: 7.0,
        }
    }
}

/// One row of the radius table: pools smaller than `below` balls use `radius`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusStep {
    pub below: usize,
    pub radius: f32,
}

/// Full lottery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    /// Largest accepted per-participant weight
    pub max_weight: u32,

    // === Phase timing ===
    pub rolling_timeout_ms: f64,
    pub reveal_timeout_ms: f64,
    /// Showcase length in reference frames
    pub showcase_ticks: f32,
    pub reference_frame_ms: f32,
    /// Physics clamp for long frames (the phase clock is never clamped)
    pub max_frame_ms: f32,

    // === Motion ===
    pub speeds: SpeedMultipliers,
    pub ball_spawn_speed: f32,
    pub spawn_inset: f32,
    pub showcase_lerp: f32,
    pub showcase_size_fraction: f32,

    // === Ball sizing ===
    /// Ascending by `below`; pools past the last row use `min_radius`
    pub radius_steps: Vec<RadiusStep>,
    pub min_radius: f32,

    pub particles: ParticleConfig,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            max_weight: MAX_WEIGHT,

            rolling_timeout_ms: ROLLING_TIMEOUT_MS,
            reveal_timeout_ms: REVEAL_TIMEOUT_MS,
            showcase_ticks: SHOWCASE_TICKS,
            reference_frame_ms: REFERENCE_FRAME_MS,
            max_frame_ms: MAX_FRAME_MS,

            speeds: SpeedMultipliers::default(),
            ball_spawn_speed: BALL_SPAWN_SPEED,
            spawn_inset: BALL_SPAWN_INSET,
            showcase_lerp: SHOWCASE_LERP,
            showcase_size_fraction: SHOWCASE_SIZE_FRACTION,

            radius_steps: vec![
                RadiusStep { below: 50, radius: 12.0 },
                RadiusStep { below: 200, radius: 10.0 },
                RadiusStep { below: 500, radius: 8.0 },
                RadiusStep { below: 1000, radius: 6.0 },
            ],
            min_radius: 5.0,

            particles: ParticleConfig::default(),

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
        }
    }
}

impl LotteryConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> LotteryResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LotteryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> LotteryResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LotteryError::Config(e.to_string()))
    }

    /// Reject values the state machine cannot run with
    pub fn validate(&self) -> LotteryResult<()> {
        let fail = |msg: &str| Err(LotteryError::Config(msg.to_string()));

        if self.max_weight == 0 {
            return fail("max_weight must be at least 1");
        }
        if !(self.reference_frame_ms > 0.0) {
            return fail("reference_frame_ms must be positive");
        }
        if !(self.max_frame_ms > 0.0) {
            return fail("max_frame_ms must be positive");
        }
        // NaN never compares due, so it would stall the draw
        if !(self.rolling_timeout_ms >= 0.0 && self.reveal_timeout_ms >= 0.0) {
            return fail("phase timeouts must be non-negative numbers");
        }
        if !(self.showcase_ticks >= 0.0) {
            return fail("showcase_ticks must be a non-negative number");
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return fail("arena dimensions must be positive");
        }
        if self.particles.life_min > self.particles.life_max
            || self.particles.size_min > self.particles.size_max
        {
            return fail("particle ranges must have min <= max");
        }
        if self
            .radius_steps
            .windows(2)
            .any(|w| w[0].below >= w[1].below)
        {
            return fail("radius_steps must be strictly ascending");
        }
        Ok(())
    }

    /// Ball radius for a pool of `total_balls`
    pub fn radius_for(&self, total_balls: usize) -> f32 {
        self.radius_steps
            .iter()
            .find(|step| total_balls < step.below)
            .map(|step| step.radius)
            .unwrap_or(self.min_radius)
    }
}
