//! Per-frame session advance
//!
//! Order within a frame: advance the clock, run due deferred transitions,
//! move balls, check the showcase threshold (which may spawn confetti), then
//! move confetti.

use super::frame::FrameState;
use super::physics::{integrate_balls, integrate_particles, time_scale};
use super::session::{AbandonReason, Session};
use super::state::DrawPhase;

impl Session {
    /// Advance the session by one rendered frame of `elapsed_ms` and snapshot it
    pub fn tick(&mut self, elapsed_ms: f64) -> FrameState {
        self.scheduler.advance(elapsed_ms);
        while let Some(action) = self.scheduler.pop_due() {
            self.run_deferred(action);
        }

        // The showcase ball must still resolve; a dangling id ends the round
        if self.phase.has_showcase() && self.showcase_ball().is_none() {
            self.abandon(AbandonReason::WinnerWithdrawn);
        }

        let ts = time_scale(elapsed_ms, &self.config);
        integrate_balls(
            self.pool.balls_mut(),
            self.showcase,
            self.phase,
            self.arena,
            &self.config,
            ts,
        );

        if self.phase == DrawPhase::Showcase {
            self.showcase_timer += ts;
            if self.showcase_timer > self.config.showcase_ticks {
                self.reveal();
            }
        }

        integrate_particles(&mut self.particles, self.config.particles.gravity, ts);

        self.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LotteryConfig;
    use crate::sim::session::LotteryEvent;

    const FRAME_MS: f64 = 16.6;

    fn session() -> Session {
        Session::with_seed(LotteryConfig::default(), 77).unwrap()
    }

    /// Tick at 60 Hz until the phase changes or `max_frames` pass
    fn run_until_phase_change(s: &mut Session, max_frames: usize) -> usize {
        let start = s.phase();
        for frame in 1..=max_frames {
            s.tick(FRAME_MS);
            if s.phase() != start {
                return frame;
            }
        }
        max_frames
    }

    #[test]
    fn test_idle_balls_drift() {
        let mut s = session();
        s.add_participant("Alice", 5).unwrap();
        let before: Vec<_> = s.pool().balls().iter().map(|b| b.pos).collect();
        s.tick(FRAME_MS);
        let moved = s
            .pool()
            .balls()
            .iter()
            .zip(before.iter())
            .filter(|(b, p)| b.pos != **p)
            .count();
        assert!(moved > 0);
        assert_eq!(s.phase(), DrawPhase::Idle);
    }

    #[test]
    fn test_rolling_lasts_timeout() {
        let mut s = session();
        s.add_participant("Alice", 3).unwrap();
        s.start_draw().unwrap();

        s.tick(2999.0);
        assert_eq!(s.phase(), DrawPhase::Rolling);
        assert!(s.showcase_ball().is_none());

        s.tick(1.0);
        assert_eq!(s.phase(), DrawPhase::Showcase);
        assert!(s.showcase_ball().is_some());
    }

    #[test]
    fn test_showcase_threshold() {
        let mut s = session();
        s.add_participant("Alice", 3).unwrap();
        s.start_draw().unwrap();
        run_until_phase_change(&mut s, 400);
        assert_eq!(s.phase(), DrawPhase::Showcase);
        // The frame that selects the winner already counts toward the showcase
        assert_eq!(s.showcase_timer(), 1.0);

        // Timer must exceed 30 reference frames
        let frames = run_until_phase_change(&mut s, 100);
        assert_eq!(frames, 30);
        assert_eq!(s.phase(), DrawPhase::Reveal);
        assert_eq!(s.particles().len(), s.config().particles.count);
    }

    #[test]
    fn test_showcase_ball_grows_and_centers() {
        let mut s = session();
        s.add_participant("Alice", 10).unwrap();
        s.start_draw().unwrap();
        s.tick(3000.0);

        let start = s.showcase_ball().unwrap().clone();
        s.tick(FRAME_MS);
        let after = s.showcase_ball().unwrap();
        let center = s.arena().center();

        assert!(after.radius > start.radius);
        assert!((after.pos - center).length() < (start.pos - center).length() + 1e-3);
        assert_eq!(after.vel, glam::Vec2::ZERO);
    }

    #[test]
    fn test_confetti_expires() {
        let mut s = session();
        s.add_participant("Alice", 1).unwrap();
        s.start_draw().unwrap();
        s.tick(3000.0);
        run_until_phase_change(&mut s, 100);
        assert!(!s.particles().is_empty());

        // Max life is 150 reference frames; reveal lasts ~180
        for _ in 0..160 {
            s.tick(FRAME_MS);
        }
        assert!(s.particles().is_empty());
    }

    #[test]
    fn test_long_frame_fires_rolling_timeout() {
        let mut s = session();
        s.add_participant("Alice", 2).unwrap();
        s.start_draw().unwrap();
        // A stalled tab delivers one huge frame; the phase clock is not clamped
        s.tick(10_000.0);
        assert_eq!(s.phase(), DrawPhase::Showcase);
    }

    #[test]
    fn test_pool_emptied_while_rolling() {
        let mut s = session();
        let a = s.add_participant("Alice", 2).unwrap();
        s.start_draw().unwrap();
        s.remove_participant(a);
        s.drain_events();

        s.tick(3000.0);
        assert_eq!(s.phase(), DrawPhase::Idle);
        let events = s.drain_events();
        assert!(events.contains(&LotteryEvent::DrawAbandoned {
            reason: AbandonReason::PoolEmptied
        }));
    }

    #[test]
    fn test_winner_withdrawn_during_showcase() {
        let mut s = session();
        s.add_participant("Alice", 2).unwrap();
        s.add_participant("Bob", 2).unwrap();
        s.start_draw().unwrap();
        s.tick(3000.0);
        let winner = s.showcase_ball().unwrap().owner;

        assert!(s.remove_participant(winner));
        assert_eq!(s.phase(), DrawPhase::Idle);
        assert!(s.showcase_ball().is_none());

        // Nothing is revealed afterwards
        for _ in 0..300 {
            s.tick(FRAME_MS);
        }
        assert!(s.winners().is_empty());
        assert_eq!(s.pool().participant_count(), 1);
    }

    #[test]
    fn test_frame_flags_showcase_ball() {
        let mut s = session();
        s.add_participant("Alice", 4).unwrap();
        s.start_draw().unwrap();
        let frame = s.tick(3000.0);

        assert_eq!(frame.balls.iter().filter(|b| b.showcase).count(), 1);
        assert_eq!(frame.background_balls().count(), 3);
        let view = frame.showcase.as_ref().unwrap();
        assert_eq!(view.owner_name, "Alice");
        assert!(!view.revealed);
        assert!(frame.background_dimmed());
    }
}
