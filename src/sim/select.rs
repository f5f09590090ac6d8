//! Weighted draw
//!
//! Every ball is one equal chance, so a uniform pick over balls is a pick over
//! participants weighted by ball count. The RNG must be cryptographically
//! strong; `CryptoRng` enforces that at the type level.

use rand::{CryptoRng, Rng};

use super::state::{Ball, BallId};
use crate::error::{LotteryError, LotteryResult};

/// Pick one ball uniformly at random
pub fn select_winner<R: CryptoRng>(balls: &[Ball], rng: &mut R) -> LotteryResult<BallId> {
    if balls.is_empty() {
        return Err(LotteryError::EmptyPool);
    }
    let index = rng.random_range(0..balls.len());
    Ok(balls[index].id)
}
