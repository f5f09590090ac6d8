//! Lottery simulation
//!
//! Everything that decides what happens lives here, independent of any
//! renderer or platform:
//! - Winner selection draws from a cryptographically secure RNG
//! - Motion and confetti use a seeded PCG stream
//! - Phase timeouts run on the session clock, never wall time

pub mod frame;
pub mod particles;
pub mod physics;
pub mod pool;
pub mod schedule;
pub mod select;
pub mod session;
pub mod state;
pub mod tick;

pub use frame::{BallSnapshot, FrameState, Notice, ParticleSnapshot, ShowcaseView};
pub use particles::create_particles;
pub use physics::{integrate_balls, integrate_particles, reflect_walls, time_scale};
pub use pool::EntityPool;
pub use schedule::{DeferredAction, Scheduler};
pub use select::select_winner;
pub use session::{AbandonReason, LotteryEvent, Session};
pub use state::{Arena, Ball, BallId, DrawPhase, Participant, ParticipantId, Particle};
