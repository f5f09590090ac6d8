//! Confetti burst spawned when a winner is revealed

use glam::Vec2;
use rand::Rng;

use super::pool::symmetric;
use super::state::Particle;
use crate::color::Hsl;
use crate::config::ParticleConfig;

/// Random value in `[min, max)`, or `min` for an empty range
fn in_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Emit a burst of particles at `origin`
pub fn create_particles<R: Rng>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    config: &ParticleConfig,
    rng: &mut R,
) {
    particles.reserve(config.count);
    for _ in 0..config.count {
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(symmetric(rng, config.speed), symmetric(rng, config.speed)),
            life: in_range(rng, config.life_min, config.life_max),
            color: Hsl::confetti(rng.random::<f32>() * 360.0),
            size: in_range(rng, config.size_min, config.size_max),
        });
    }
}
