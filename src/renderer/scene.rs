//! Scene assembly
//!
//! Turns a `GameState` into one triangle list. Pure read; the background is
//! the pass's clear color, so it contributes no geometry.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::rgba;
use crate::sim::GameState;

/// Segments used for the ball outline
const BALL_SEGMENTS: u32 = 24;

/// Build every vertex for the current frame, back to front
pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut vertices = shapes::dashed_line(
        state.width / 2.0,
        state.height,
        DIVIDER_WIDTH,
        DIVIDER_DASH,
        DIVIDER_PERIOD,
        colors::DIVIDER,
    );

    vertices.extend(shapes::number(
        state.score.player,
        state.width / 4.0,
        SCORE_TOP,
        SCORE_DIGIT_HEIGHT,
        rgba(state.player.color),
    ));
    vertices.extend(shapes::number(
        state.score.opponent,
        3.0 * state.width / 4.0,
        SCORE_TOP,
        SCORE_DIGIT_HEIGHT,
        rgba(state.opponent.color),
    ));

    for paddle in [&state.player, &state.opponent] {
        vertices.extend(shapes::rect(
            paddle.x,
            paddle.y,
            paddle.width,
            paddle.height,
            rgba(paddle.color),
        ));
    }

    let ball = &state.ball;
    vertices.extend(shapes::circle(
        ball.pos,
        ball.radius,
        rgba(ball.color),
        BALL_SEGMENTS,
    ));

    vertices
}
