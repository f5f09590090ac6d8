//! Ball Lottery - a weighted elimination draw over a bouncing pool of balls
//!
//! Core modules:
//! - `sim`: Entity pool, draw selector, physics and the draw state machine
//! - `renderer`: Frame tessellation and the WebGPU pipeline
//! - `config`: Tunable constants (timeouts, speeds, particle bursts)
//! - `winners`: Ranked history of revealed winners

pub mod color;
pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;
pub mod winners;

pub use color::Hsl;
pub use config::LotteryConfig;
pub use error::{LotteryError, LotteryResult, ValidationError};
pub use sim::{DrawPhase, FrameState, LotteryEvent, ParticipantId, Session};
pub use winners::{WinnerEntry, Winners};

/// Default tuning constants
pub mod consts {
    /// Largest weight a single participant may register with
    pub const MAX_WEIGHT: u32 = 999;

    /// Wall-clock duration of the rolling phase (ms)
    pub const ROLLING_TIMEOUT_MS: f64 = 3000.0;
    /// Wall-clock duration of the reveal phase (ms)
    pub const REVEAL_TIMEOUT_MS: f64 = 3000.0;
    /// Showcase length in reference frames (~0.5s at 60 Hz)
    pub const SHOWCASE_TICKS: f32 = 30.0;

    /// Frame interval that maps to a time-scale of 1.0
    pub const REFERENCE_FRAME_MS: f32 = 16.6;
    /// Longest frame fed to the integrator (keeps a stalled tab from teleporting balls)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Per-phase speed multipliers
    pub const SPEED_IDLE: f32 = 1.0;
    pub const SPEED_ROLLING: f32 = 8.0;
    pub const SPEED_SHOWCASE: f32 = 0.5;
    pub const SPEED_REVEAL: f32 = 0.2;

    /// Ball spawn: velocity span per axis and inset from the arena edge
    pub const BALL_SPAWN_SPEED: f32 = 5.0;
    pub const BALL_SPAWN_INSET: f32 = 10.0;

    /// Showcase interpolation: fraction of the remaining gap closed per reference frame
    pub const SHOWCASE_LERP: f32 = 0.1;
    /// Showcase ball grows toward this fraction of the arena's shorter side
    pub const SHOWCASE_SIZE_FRACTION: f32 = 0.25;

    /// Confetti burst
    pub const PARTICLE_COUNT: usize = 100;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    pub const PARTICLE_SPEED: f32 = 15.0;

    /// Default arena (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
}
