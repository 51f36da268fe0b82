//! Duel Pong - classic two-paddle Pong against a tracking AI
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring, match flow)
//! - `driver`: Per-frame loop driver and time-step policy
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Keyboard-to-paddle mapping
//! - `audio`: Sound cues for simulation events
//! - `settings`: Player preferences

pub mod audio;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameReport, LoopDriver, TimeStep};
pub use input::InputState;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Drawing surface dimensions
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Declared on the opponent paddle but never read by the tracking filter
    pub const OPPONENT_SPEED: f32 = 4.0;
    pub const PLAYER_COLOR: u32 = 0x00ffcc;
    pub const OPPONENT_COLOR: u32 = 0xffcc00;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 5.0;
    /// Vertical speed of a fresh serve (sign is a coin flip)
    pub const SERVE_SPEED_Y: f32 = 3.0;
    /// Added to ball speed on every paddle hit
    pub const SPEED_INCREMENT: f32 = 0.2;
    /// Steepest bounce off a paddle edge (radians)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    pub const BALL_COLOR: u32 = 0xffffff;

    /// First side to reach this many points wins the match
    pub const WIN_SCORE: u32 = 7;

    /// Opponent tracking filter gain per difficulty level
    pub const OPPONENT_GAIN: f32 = 0.05;
    /// Per-frame chance of a tracking error per level below the maximum
    pub const OPPONENT_ERROR_CHANCE: f32 = 0.01;
    /// Tracking errors are uniform in [-magnitude, magnitude)
    pub const OPPONENT_ERROR_MAGNITUDE: f32 = 25.0;

    /// Center divider dashes
    pub const DIVIDER_WIDTH: f32 = 2.0;
    pub const DIVIDER_DASH: f32 = 20.0;
    pub const DIVIDER_PERIOD: f32 = 30.0;

    /// Score digits
    pub const SCORE_DIGIT_HEIGHT: f32 = 40.0;
    pub const SCORE_TOP: f32 = 10.0;

    /// Reference refresh interval the per-frame constants were tuned for
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest time step (in reference frames) a single scaled tick may take
    pub const MAX_FRAME_SCALE: f32 = 3.0;
}

/// Convert a `0xRRGGBB` color tag to RGBA channels in `[0, 1]`.
///
/// No gamma transfer is applied; the render target is non-sRGB.
#[inline]
pub fn rgba(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_channels() {
        assert_eq!(rgba(0xffffff), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(rgba(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let c = rgba(consts::PLAYER_COLOR);
        assert_eq!(c[0], 0.0);
        assert_eq!(c[1], 1.0);
        assert!((c[2] - 0.8).abs() < 1e-6);
    }
}
