//! Simulation tick
//!
//! One call advances the match by `dt` reference frames and reports what
//! happened as a list of [`GameEvent`]s. Sound and HUD updates are the
//! caller's business.

use super::collision::{deflect, defending_side, exit_side, hits_paddle, wall_bounce};
use super::opponent;
use super::phase::MatchAction;
use super::state::{GameEvent, GameState, Side};
use crate::consts::SPEED_INCREMENT;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Up key held
    pub up: bool,
    /// Down key held
    pub down: bool,
}

/// Advance the game state. Does nothing outside [`MatchPhase::Playing`].
///
/// [`MatchPhase::Playing`]: super::state::MatchPhase::Playing
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    state.time_ticks += 1;
    state.stats.ticks += 1;

    // Player paddle; holding both keys cancels out
    if input.up {
        state.player.y -= state.player.speed * dt;
    }
    if input.down {
        state.player.y += state.player.speed * dt;
    }
    let height = state.height;
    state.player.clamp_to(height);
    state.opponent.clamp_to(height);

    // Opponent paddle
    let ball_y = state.ball.pos.y;
    let difficulty = state.difficulty;
    let paddle = state.opponent.clone();
    state.opponent.y = opponent::steer(&paddle, ball_y, difficulty, state.rng(), dt);
    state.opponent.clamp_to(height);

    // Ball
    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;
    wall_bounce(ball, height);

    let side = defending_side(state.ball.pos.x, state.width);
    let paddle = state.paddle(side);
    if hits_paddle(&state.ball, paddle) {
        let direction = match side {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        };
        let bounce = deflect(state.ball.pos.y, state.ball.speed, paddle, direction);
        state.ball.vel = bounce.vel;
        state.ball.speed += SPEED_INCREMENT;
        state.stats.record_hit();
        log::trace!(
            "{} paddle hit at {:+.2}, speed now {:.1}",
            side.as_str(),
            bounce.collide_point,
            state.ball.speed
        );
        events.push(GameEvent::PaddleHit {
            side,
            speed: state.ball.speed,
        });
    }

    // Scoring
    if let Some(scorer) = exit_side(&state.ball, state.width) {
        state.score.increment(scorer);
        state.stats.end_rally();
        log::debug!(
            "{} scores ({}-{})",
            scorer.as_str(),
            state.score.player,
            state.score.opponent
        );
        events.push(GameEvent::Scored {
            scorer,
            score: state.score,
        });
        state.reset_ball();

        if state.score.is_decided() && state.apply(MatchAction::Finish).success {
            if let Some(winner) = state.winner {
                events.push(GameEvent::MatchOver { winner });
            }
        }
    }

    events
}
