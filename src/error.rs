//! Lottery error types
//!
//! Every error here is recoverable: operations validate before they mutate.

use thiserror::Error;

use crate::sim::DrawPhase;

/// Why a registration was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name was empty after trimming.
    #[error("participant name must not be empty")]
    EmptyName,

    /// Weight must be at least one ball.
    #[error("weight must be a positive integer")]
    ZeroWeight,

    /// Weight exceeds the configured maximum.
    #[error("weight {weight} exceeds the maximum of {max}")]
    WeightTooLarge {
        /// Requested weight.
        weight: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// Errors surfaced by the lottery session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LotteryError {
    /// Bad name or weight on registration.
    #[error("invalid participant: {0}")]
    Validation(#[from] ValidationError),

    /// A draw was requested with no balls left.
    #[error("the pool has no balls left")]
    EmptyPool,

    /// A draw was requested while another one is running.
    #[error("cannot start a draw while {phase:?}")]
    InvalidState {
        /// Phase the session was in.
        phase: DrawPhase,
    },

    /// Configuration rejected by validation or parsing.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The OS entropy source could not seed the draw RNG.
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
}

/// Result type for lottery operations.
pub type LotteryResult<T> = Result<T, LotteryError>;

impl LotteryError {
    /// Short heading for a user-facing notice; the `Display` text is the body
    pub fn title(&self) -> &'static str {
        match self {
            LotteryError::Validation(ValidationError::WeightTooLarge { .. }) => "Weight too large",
            LotteryError::Validation(_) => "Invalid entry",
            LotteryError::EmptyPool | LotteryError::InvalidState { .. } => "Cannot start",
            LotteryError::Config(_) => "Invalid configuration",
            LotteryError::Entropy(_) => "Randomness unavailable",
        }
    }
}
