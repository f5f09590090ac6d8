//! Frame integration: ball motion, wall reflection, showcase easing, confetti
//!
//! Motion is expressed per reference frame and scaled by the elapsed time of
//! each rendered frame, so speed does not depend on the display refresh rate.
//! Balls do not collide with each other.

use super::state::{Arena, Ball, BallId, DrawPhase, Particle};
use crate::config::LotteryConfig;

/// Dimensionless time-scale for a frame (1.0 at the reference interval)
pub fn time_scale(elapsed_ms: f64, config: &LotteryConfig) -> f32 {
    let elapsed = (elapsed_ms.max(0.0) as f32).min(config.max_frame_ms);
    elapsed / config.reference_frame_ms
}

/// Clamp a ball inside the arena, sending it away from any wall it crossed.
/// Returns true on contact.
pub fn reflect_walls(ball: &mut Ball, arena: Arena) -> bool {
    let mut hit = false;
    let r = ball.radius;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = ball.vel.x.abs();
        hit = true;
    } else if ball.pos.x + r > arena.width {
        ball.pos.x = arena.width - r;
        ball.vel.x = -ball.vel.x.abs();
        hit = true;
    }

    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
        hit = true;
    } else if ball.pos.y + r > arena.height {
        ball.pos.y = arena.height - r;
        ball.vel.y = -ball.vel.y.abs();
        hit = true;
    }

    hit
}

/// Free motion for one ball: `step` is speed multiplier times time-scale
pub fn advance_ball(ball: &mut Ball, step: f32, arena: Arena) {
    ball.pos += ball.vel * step;
    reflect_walls(ball, arena);
}

/// Ease the showcase ball toward the arena center and its enlarged size
pub fn ease_showcase(ball: &mut Ball, arena: Arena, config: &LotteryConfig, time_scale: f32) {
    let t = (config.showcase_lerp * time_scale).min(1.0);
    let target_radius = arena.min_side() * config.showcase_size_fraction;

    ball.pos += (arena.center() - ball.pos) * t;
    ball.radius += (target_radius - ball.radius) * t;
    ball.vel = glam::Vec2::ZERO;
}

/// Move every ball for this frame.
///
/// The showcase ball eases toward center during `Showcase` and stays put
/// during `Reveal`; everything else moves at the phase's speed.
pub fn integrate_balls(
    balls: &mut [Ball],
    showcase: Option<BallId>,
    phase: DrawPhase,
    arena: Arena,
    config: &LotteryConfig,
    time_scale: f32,
) {
    let step = config.speeds.for_phase(phase) * time_scale;

    for ball in balls.iter_mut() {
        if Some(ball.id) == showcase {
            match phase {
                DrawPhase::Showcase => ease_showcase(ball, arena, config, time_scale),
                _ => ball.vel = glam::Vec2::ZERO,
            }
            continue;
        }
        advance_ball(ball, step, arena);
    }
}

/// Advance confetti and drop expired particles
pub fn integrate_particles(particles: &mut Vec<Particle>, gravity: f32, time_scale: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * time_scale;
        p.vel.y += gravity * time_scale;
        p.life -= time_scale;
    }
    particles.retain(|p| !p.is_expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;
    use crate::sim::state::ParticipantId;
    use glam::Vec2;

    fn ball(id: u64, pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            id: BallId(id),
            pos,
            vel,
            radius: 10.0,
            color: Hsl::participant(0.0),
            owner: ParticipantId(1),
            owner_name: "Alice".to_string(),
        }
    }

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    #[test]
    fn test_time_scale() {
        let config = LotteryConfig::default();
        assert!((time_scale(16.6, &config) - 1.0).abs() < 1e-6);
        assert!((time_scale(33.2, &config) - 2.0).abs() < 1e-6);
        assert_eq!(time_scale(0.0, &config), 0.0);
        assert_eq!(time_scale(-5.0, &config), 0.0);
        // Clamped to max_frame_ms
        assert!((time_scale(10_000.0, &config) - 100.0 / 16.6).abs() < 1e-5);
    }

    #[test]
    fn test_left_wall_reflection() {
        let mut b = ball(1, Vec2::new(12.0, 300.0), Vec2::new(-5.0, 0.0));
        advance_ball(&mut b, 1.0, arena());
        assert_eq!(b.pos.x, b.radius);
        assert_eq!(b.vel.x, 5.0);
    }

    #[test]
    fn test_right_and_bottom_wall_reflection() {
        let mut b = ball(1, Vec2::new(788.0, 588.0), Vec2::new(4.0, 3.0));
        advance_ball(&mut b, 1.0, arena());
        assert_eq!(b.pos, Vec2::new(790.0, 590.0));
        assert_eq!(b.vel, Vec2::new(-4.0, -3.0));
    }

    #[test]
    fn test_no_reflection_inside() {
        let mut b = ball(1, Vec2::new(400.0, 300.0), Vec2::new(2.0, -1.0));
        advance_ball(&mut b, 2.0, arena());
        assert_eq!(b.pos, Vec2::new(404.0, 298.0));
        assert_eq!(b.vel, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_showcase_eases_toward_center() {
        let config = LotteryConfig::default();
        let mut b = ball(1, Vec2::new(100.0, 100.0), Vec2::new(3.0, 3.0));

        ease_showcase(&mut b, arena(), &config, 1.0);
        assert!((b.pos - Vec2::new(130.0, 120.0)).length() < 1e-3);
        assert!((b.radius - 24.0).abs() < 1e-4);
        assert_eq!(b.vel, Vec2::ZERO);

        for _ in 0..200 {
            ease_showcase(&mut b, arena(), &config, 1.0);
        }
        assert!((b.pos - arena().center()).length() < 0.01);
        assert!((b.radius - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_integrate_skips_showcase_ball() {
        let config = LotteryConfig::default();
        let mut balls = vec![
            ball(1, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0)),
            ball(2, Vec2::new(200.0, 200.0), Vec2::new(1.0, 0.0)),
        ];

        integrate_balls(&mut balls, Some(BallId(1)), DrawPhase::Reveal, arena(), &config, 1.0);
        assert_eq!(balls[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(balls[0].vel, Vec2::ZERO);
        assert!((balls[1].pos.x - (200.0 + config.speeds.reveal)).abs() < 1e-4);
    }

    #[test]
    fn test_phase_speed() {
        let config = LotteryConfig::default();
        let mut balls = vec![ball(1, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0))];
        integrate_balls(&mut balls, None, DrawPhase::Rolling, arena(), &config, 1.0);
        assert_eq!(balls[0].pos.x, 108.0);
    }

    #[test]
    fn test_particles_gravity_and_expiry() {
        let particle = |life: f32| Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life,
            color: Hsl::confetti(0.0),
            size: 3.0,
        };
        // Several expire in the same tick, interleaved with survivors
        let mut particles = vec![
            particle(0.5),
            particle(10.0),
            particle(1.0),
            particle(0.2),
            particle(20.0),
        ];

        integrate_particles(&mut particles, 0.2, 1.0);

        assert_eq!(particles.len(), 2);
        assert_eq!(particles[0].life, 9.0);
        assert_eq!(particles[1].life, 19.0);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(1.0, 0.0));
            assert!((p.vel.y - 0.2).abs() < 1e-6);
        }
    }
}
