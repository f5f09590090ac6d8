//! Draw session: the single owner of pool, phase, timers and confetti
//!
//! Lifecycle: Idle -> Rolling -> Showcase -> Reveal -> Idle. Rolling and
//! Reveal end on deferred transitions in the scheduler; Showcase ends when
//! its frame counter crosses the threshold inside `tick`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::frame::{BallSnapshot, FrameState, Notice, ParticleSnapshot, ShowcaseView};
use super::particles::create_particles;
use super::pool::EntityPool;
use super::schedule::{DeferredAction, Scheduler};
use super::select::select_winner;
use super::state::{Arena, Ball, BallId, DrawPhase, Particle, ParticipantId};
use crate::config::LotteryConfig;
use crate::error::{LotteryError, LotteryResult};
use crate::winners::{WinnerEntry, Winners};

/// Why a round ended without a winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbandonReason {
    /// Every ball was removed while rolling
    PoolEmptied,
    /// The selected ball's owner was removed before the reveal
    WinnerWithdrawn,
}

/// Notifications for collaborators, drained with [`Session::drain_events`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LotteryEvent {
    ParticipantsChanged { participants: usize, balls: usize },
    PhaseChanged { from: DrawPhase, to: DrawPhase },
    WinnerSelected { ball: BallId, participant: ParticipantId },
    /// Fired exactly once per entry into Reveal
    WinnerRevealed(WinnerEntry),
    DrawAbandoned { reason: AbandonReason },
    Reset,
}

/// A complete, independent lottery
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) config: LotteryConfig,
    pub(super) arena: Arena,
    pub(super) pool: EntityPool,
    pub(super) particles: Vec<Particle>,
    pub(super) phase: DrawPhase,
    /// Resolved against the pool on every use
    pub(super) showcase: Option<BallId>,
    /// Reference frames spent in Showcase
    pub(super) showcase_timer: f32,
    pub(super) scheduler: Scheduler,
    winners: Winners,
    events: Vec<LotteryEvent>,
    /// Positions, velocities, colors, confetti
    pub(super) rng: Pcg32,
    /// Winner selection only
    draw_rng: StdRng,
}

impl Session {
    /// Create a session with OS-seeded randomness
    pub fn new(config: LotteryConfig) -> LotteryResult<Self> {
        let mut draw_rng =
            StdRng::try_from_os_rng().map_err(|e| LotteryError::Entropy(e.to_string()))?;
        let rng = Pcg32::from_rng(&mut draw_rng);
        Self::build(config, rng, draw_rng)
    }

    /// Create a fully deterministic session (tests, replays)
    pub fn with_seed(config: LotteryConfig, seed: u64) -> LotteryResult<Self> {
        let rng = Pcg32::seed_from_u64(seed);
        let draw_rng = StdRng::seed_from_u64(seed.rotate_left(32) ^ 0x5EED_BA11);
        Self::build(config, rng, draw_rng)
    }

    fn build(config: LotteryConfig, rng: Pcg32, draw_rng: StdRng) -> LotteryResult<Self> {
        config.validate()?;
        let arena = Arena::new(config.arena_width, config.arena_height);
        Ok(Self {
            config,
            arena,
            pool: EntityPool::new(),
            particles: Vec::new(),
            phase: DrawPhase::Idle,
            showcase: None,
            showcase_timer: 0.0,
            scheduler: Scheduler::new(),
            winners: Winners::new(),
            events: Vec::new(),
            rng,
            draw_rng,
        })
    }

    // === Pool edits ===

    /// Register a participant with `weight` balls
    pub fn add_participant(&mut self, name: &str, weight: u32) -> LotteryResult<ParticipantId> {
        let id = self
            .pool
            .add_participant(name, weight, &self.config, self.arena, &mut self.rng)?;
        self.participants_changed();
        Ok(id)
    }

    /// Remove a participant and its balls; false if it was not registered
    pub fn remove_participant(&mut self, id: ParticipantId) -> bool {
        let owned_showcase = self.showcase_ball().is_some_and(|b| b.owner == id);
        if !self.pool.remove_participant(id, &self.config) {
            return false;
        }
        self.participants_changed();

        if owned_showcase {
            match self.phase {
                DrawPhase::Showcase => self.abandon(AbandonReason::WinnerWithdrawn),
                DrawPhase::Reveal => {
                    // Already announced; the removal completes the round early
                    self.scheduler.invalidate();
                    self.enter(DrawPhase::Idle);
                }
                _ => {}
            }
        }
        true
    }

    /// Return to a fresh Idle session; pending transitions go stale
    pub fn reset(&mut self) {
        self.scheduler.invalidate();
        self.pool.clear();
        self.particles.clear();
        self.winners.clear();

        log::info!("Session reset (epoch {})", self.scheduler.epoch());
        self.events.push(LotteryEvent::Reset);
        self.enter(DrawPhase::Idle);
        self.participants_changed();
    }

    /// Resize the arena (host window resize). Balls outside are pulled back by the walls.
    pub fn set_arena(&mut self, arena: Arena) -> LotteryResult<()> {
        if !(arena.width > 0.0 && arena.height > 0.0) {
            return Err(LotteryError::Config(format!(
                "arena must be positive, got {}x{}",
                arena.width, arena.height
            )));
        }
        self.arena = arena;
        Ok(())
    }

    // === Draw lifecycle ===

    /// Begin a draw. Only legal from Idle with a non-empty pool.
    pub fn start_draw(&mut self) -> LotteryResult<()> {
        if self.pool.is_empty() {
            log::info!("Draw refused: the pool is empty");
            return Err(LotteryError::EmptyPool);
        }
        if self.phase != DrawPhase::Idle {
            return Err(LotteryError::InvalidState { phase: self.phase });
        }

        self.showcase = None;
        self.enter(DrawPhase::Rolling);
        self.scheduler
            .schedule(self.config.rolling_timeout_ms, DeferredAction::SelectWinner);
        log::info!("Draw started over {} balls", self.pool.ball_count());
        Ok(())
    }

    /// Run a deferred transition that came due
    pub(super) fn run_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::SelectWinner => self.select(),
            DeferredAction::RetireWinner => self.retire(),
        }
    }

    /// Rolling -> Showcase
    fn select(&mut self) {
        if self.phase != DrawPhase::Rolling {
            log::debug!("SelectWinner ignored in {:?}", self.phase);
            return;
        }
        match select_winner(self.pool.balls(), &mut self.draw_rng) {
            Ok(id) => {
                let participant = self.pool.ball(id).map(|b| b.owner);
                self.showcase = Some(id);
                self.pool.pin(Some(id));
                self.showcase_timer = 0.0;
                if let Some(participant) = participant {
                    self.events
                        .push(LotteryEvent::WinnerSelected { ball: id, participant });
                }
                self.enter(DrawPhase::Showcase);
            }
            Err(_) => self.abandon(AbandonReason::PoolEmptied),
        }
    }

    /// Showcase -> Reveal: announce, burst confetti, schedule retirement
    pub(super) fn reveal(&mut self) {
        let Some(ball) = self.showcase_ball() else {
            self.abandon(AbandonReason::WinnerWithdrawn);
            return;
        };
        let (owner, name, color, origin) = (ball.owner, ball.owner_name.clone(), ball.color, ball.pos);
        let weight = self.pool.participant(owner).map(|p| p.weight).unwrap_or(0);

        let entry = self
            .winners
            .record(owner, &name, color, weight, self.scheduler.now_ms())
            .clone();
        log::info!("Winner #{}: {}", entry.rank, entry.name);

        create_particles(&mut self.particles, origin, &self.config.particles, &mut self.rng);
        self.enter(DrawPhase::Reveal);
        self.events.push(LotteryEvent::WinnerRevealed(entry));
        self.scheduler
            .schedule(self.config.reveal_timeout_ms, DeferredAction::RetireWinner);
    }

    /// Reveal -> Idle: the winner leaves the pool with all its balls
    fn retire(&mut self) {
        if self.phase != DrawPhase::Reveal {
            log::debug!("RetireWinner ignored in {:?}", self.phase);
            return;
        }
        let owner = self.showcase_ball().map(|b| b.owner);
        self.pool.pin(None);
        if let Some(owner) = owner {
            if self.pool.remove_participant(owner, &self.config) {
                self.participants_changed();
            }
        }
        self.enter(DrawPhase::Idle);
    }

    /// End the round without a winner
    pub(super) fn abandon(&mut self, reason: AbandonReason) {
        log::warn!("Draw abandoned in {:?}: {:?}", self.phase, reason);
        self.scheduler.invalidate();
        self.events.push(LotteryEvent::DrawAbandoned { reason });
        self.enter(DrawPhase::Idle);
    }

    fn enter(&mut self, phase: DrawPhase) {
        let from = self.phase;
        self.phase = phase;
        if phase == DrawPhase::Idle {
            self.showcase = None;
            self.showcase_timer = 0.0;
            self.pool.pin(None);
            self.pool.resize_balls(&self.config);
        }
        if from != phase {
            self.events.push(LotteryEvent::PhaseChanged { from, to: phase });
        }
    }

    fn participants_changed(&mut self) {
        self.events.push(LotteryEvent::ParticipantsChanged {
            participants: self.pool.participant_count(),
            balls: self.pool.ball_count(),
        });
    }

    // === Read access ===

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn winners(&self) -> &Winners {
        &self.winners
    }

    /// Selected ball, if it is still in the pool
    pub fn showcase_ball(&self) -> Option<&Ball> {
        self.showcase.and_then(|id| self.pool.ball(id))
    }

    pub fn showcase_timer(&self) -> f32 {
        self.showcase_timer
    }

    /// Session clock (ms of frame time delivered so far)
    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Due time of the pending phase timeout, if any
    pub fn pending_deadline_ms(&self) -> Option<f64> {
        self.scheduler.next_live().map(|d| d.due_ms)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<LotteryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot the current frame without advancing time
    pub fn frame(&self) -> FrameState {
        let showcase_id = self.showcase;
        let balls: Vec<BallSnapshot> = self
            .pool
            .balls()
            .iter()
            .map(|b| BallSnapshot::capture(b, Some(b.id) == showcase_id))
            .collect();

        let showcase = self.showcase_ball().map(|ball| ShowcaseView {
            ball: BallSnapshot::capture(ball, true),
            owner_name: ball.owner_name.clone(),
            revealed: self.phase == DrawPhase::Reveal,
        });

        let notice = if !self.pool.is_empty() || self.phase != DrawPhase::Idle {
            None
        } else if self.winners.is_empty() {
            Some(Notice::AwaitingEntries)
        } else {
            Some(Notice::PoolExhausted)
        };

        FrameState {
            phase: self.phase,
            arena: self.arena,
            balls,
            particles: self.particles.iter().map(ParticleSnapshot::from).collect(),
            showcase,
            participant_count: self.pool.participant_count(),
            ball_count: self.pool.ball_count(),
            winner_count: self.winners.len(),
            notice,
            clock_ms: self.scheduler.now_ms(),
        }
    }
}
