//! Opponent paddle controller
//!
//! A first-order tracking filter chases the ball's vertical position; the
//! gain rises with difficulty. Occasional random jolts simulate imperfect
//! tracking and get rarer as difficulty rises.

use rand::Rng;

use super::state::{Difficulty, Paddle};
use crate::consts::OPPONENT_ERROR_MAGNITUDE;

/// Move `y` toward the position that centers the paddle on `ball_y`.
///
/// `dt` is measured in reference frames; the gain saturates at 1 so a long
/// frame can never overshoot the target.
pub fn track(y: f32, ball_y: f32, paddle_height: f32, difficulty: Difficulty, dt: f32) -> f32 {
    let target = ball_y - paddle_height / 2.0;
    let gain = (difficulty.tracking_gain() * dt).min(1.0);
    y + (target - y) * gain
}

/// Roll for a tracking error this frame
pub fn tracking_error<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, dt: f32) -> Option<f32> {
    let chance = (difficulty.error_chance() * dt).clamp(0.0, 1.0) as f64;
    if rng.random_bool(chance) {
        Some(rng.random_range(-OPPONENT_ERROR_MAGNITUDE..OPPONENT_ERROR_MAGNITUDE))
    } else {
        None
    }
}

/// New opponent y for this frame. The caller clamps the result.
pub fn steer<R: Rng + ?Sized>(
    paddle: &Paddle,
    ball_y: f32,
    difficulty: Difficulty,
    rng: &mut R,
    dt: f32,
) -> f32 {
    let y = track(paddle.y, ball_y, paddle.height, difficulty, dt);
    match tracking_error(rng, difficulty, dt) {
        Some(jolt) => {
            log::trace!("Opponent tracking error {:+.1}", jolt);
            y + jolt
        }
        None => y,
    }
}
