//! Collision detection and response on the rectangular table
//!
//! Deliberately simple: one Euler step per tick, reflection without
//! position correction, and a center-point-in-span test against paddles.
//! Fast balls can clip paddle corners or overshoot a wall by a few pixels.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::MAX_BOUNCE_ANGLE;

/// Result of a paddle deflection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deflection {
    /// Normalized hit offset in [-1, 1]; negative is above center
    pub collide_point: f32,
    /// Bounce angle in radians, same sign as `collide_point`
    pub angle: f32,
    /// New velocity, with magnitude equal to the pre-hit speed
    pub vel: Vec2,
}

/// Ball touching the top or bottom wall
pub fn touches_wall(ball: &Ball, surface_height: f32) -> bool {
    ball.pos.y + ball.radius > surface_height || ball.pos.y - ball.radius < 0.0
}

/// Reflect off the top/bottom wall if touching one. Returns true on bounce.
pub fn wall_bounce(ball: &mut Ball, surface_height: f32) -> bool {
    if touches_wall(ball, surface_height) {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Paddle defending the half of the table the ball is in
pub fn defending_side(ball_x: f32, surface_width: f32) -> Side {
    if ball_x < surface_width / 2.0 {
        Side::Player
    } else {
        Side::Opponent
    }
}

/// Ball overlaps the paddle horizontally and its center lies within the
/// paddle's vertical span
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x - ball.radius < paddle.x + paddle.width
        && ball.pos.x + ball.radius > paddle.x
        && ball.pos.y > paddle.y
        && ball.pos.y < paddle.y + paddle.height
}

/// Outgoing velocity for a ball struck by `paddle`.
///
/// Hitting further from the center bounces at a steeper angle, up to
/// `MAX_BOUNCE_ANGLE` at the edges. `direction` is +1 off the left paddle
/// and -1 off the right.
pub fn deflect(ball_y: f32, speed: f32, paddle: &Paddle, direction: f32) -> Deflection {
    let collide_point = (ball_y - paddle.center_y()) / (paddle.height / 2.0);
    let angle = MAX_BOUNCE_ANGLE * collide_point;
    let vel = Vec2::new(direction * speed * angle.cos(), speed * angle.sin());
    Deflection {
        collide_point,
        angle,
        vel,
    }
}

/// Side that scores if the ball has crossed out past a side wall
pub fn exit_side(ball: &Ball, surface_width: f32) -> Option<Side> {
    if ball.pos.x - ball.radius < 0.0 {
        Some(Side::Opponent)
    } else if ball.pos.x + ball.radius > surface_width {
        Some(Side::Player)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn paddle_at(x: f32, y: f32) -> Paddle {
        let mut paddle = Paddle::new(Side::Player, SURFACE_WIDTH, SURFACE_HEIGHT);
        paddle.x = x;
        paddle.y = y;
        paddle
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y));
        ball.vel = Vec2::new(-5.0, 3.0);
        ball
    }

    #[test]
    fn test_wall_bounce_top_and_bottom() {
        let mut ball = ball_at(400.0, 5.0);
        ball.vel.y = -3.0;
        assert!(wall_bounce(&mut ball, 500.0));
        assert_eq!(ball.vel.y, 3.0);
        // No position correction
        assert_eq!(ball.pos.y, 5.0);

        let mut ball = ball_at(400.0, 495.0);
        assert!(wall_bounce(&mut ball, 500.0));
        assert_eq!(ball.vel.y, -3.0);

        let mut ball = ball_at(400.0, 250.0);
        assert!(!wall_bounce(&mut ball, 500.0));
        assert_eq!(ball.vel.y, 3.0);
    }

    #[test]
    fn test_defending_side() {
        assert_eq!(defending_side(399.9, 800.0), Side::Player);
        assert_eq!(defending_side(400.0, 800.0), Side::Opponent);
    }

    #[test]
    fn test_hits_paddle_center_point() {
        let paddle = paddle_at(10.0, 200.0);
        assert!(hits_paddle(&ball_at(25.0, 250.0), &paddle));
        // Center just above the paddle: circle overlaps but center test fails
        assert!(!hits_paddle(&ball_at(25.0, 195.0), &paddle));
        // Horizontally clear of the paddle face
        assert!(!hits_paddle(&ball_at(31.0, 250.0), &paddle));
        // Exactly on the edge does not count
        assert!(!hits_paddle(&ball_at(25.0, 200.0), &paddle));
    }

    #[test]
    fn test_center_hit_goes_straight() {
        let paddle = paddle_at(10.0, 200.0);
        let d = deflect(250.0, 5.0, &paddle, 1.0);
        assert_eq!(d.collide_point, 0.0);
        assert_eq!(d.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_edge_hit_is_forty_five_degrees() {
        let paddle = paddle_at(780.0, 200.0);
        let d = deflect(300.0, 5.0, &paddle, -1.0);
        assert!((d.angle - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!(d.vel.x < 0.0);
        assert!((d.vel.x + d.vel.y).abs() < 1e-4);
    }

    #[test]
    fn test_exit_side() {
        assert_eq!(exit_side(&ball_at(9.0, 250.0), 800.0), Some(Side::Opponent));
        assert_eq!(exit_side(&ball_at(791.0, 250.0), 800.0), Some(Side::Player));
        assert_eq!(exit_side(&ball_at(400.0, 250.0), 800.0), None);
        assert_eq!(exit_side(&ball_at(10.0, 250.0), 800.0), None);
    }

    proptest! {
        #[test]
        fn prop_deflection_preserves_speed(
            offset in -49.9f32..49.9f32,
            speed in 5.0f32..20.0f32,
        ) {
            let paddle = paddle_at(10.0, 200.0);
            let d = deflect(paddle.center_y() + offset, speed, &paddle, 1.0);
            prop_assert!((d.vel.length() - speed).abs() < 1e-3);
            prop_assert!(d.angle.abs() <= MAX_BOUNCE_ANGLE + 1e-6);
            prop_assert!(d.vel.x > 0.0);
        }

        #[test]
        fn prop_bounce_sign_follows_offset(offset in -49.9f32..49.9f32) {
            prop_assume!(offset.abs() > 1e-3);
            let paddle = paddle_at(780.0, 120.0);
            let d = deflect(paddle.center_y() + offset, 7.0, &paddle, -1.0);
            prop_assert_eq!(d.vel.y.signum(), offset.signum());
            prop_assert_eq!(d.angle.signum(), offset.signum());
            prop_assert!(d.vel.x < 0.0);
        }
    }
}
