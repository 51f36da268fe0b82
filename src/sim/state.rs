//! Game state and core simulation types
//!
//! Everything a match needs lives in [`GameState`]; nothing is global, so
//! independent instances can run side by side (tests, replays, demos).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which end of the table an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, keyboard controlled
    Player,
    /// Right paddle, driven by the tracking filter
    Opponent,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }

    /// Text announcing this side as the match winner
    pub fn banner(&self) -> &'static str {
        match self {
            Side::Player => "You Win! 🏆",
            Side::Opponent => "AI Wins! 🤖",
        }
    }
}

/// Opponent strength, chosen when a match starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Numeric level (1-3)
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Only 1, 2 and 3 are valid levels
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Fraction of the gap to the target closed per reference frame
    pub fn tracking_gain(&self) -> f32 {
        OPPONENT_GAIN * self.level() as f32
    }

    /// Chance per reference frame of a random tracking error
    pub fn error_chance(&self) -> f32 {
        OPPONENT_ERROR_CHANCE * (4 - self.level()) as f32
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for a difficulty selection
    Menu,
    /// Rally in progress
    Playing,
    /// A side reached the win threshold
    GameOver,
}

/// Something the simulation wants the host to react to (sound, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a paddle; `speed` is the ball speed after the hit
    PaddleHit { side: Side, speed: f32 },
    /// Ball left the table and `scorer` got a point
    Scored { scorer: Side, score: Score },
    /// Win threshold reached
    MatchOver { winner: Side },
}

/// A paddle. `x` never changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// `0xRRGGBB`
    pub color: u32,
    /// Units per reference frame when keyboard driven
    pub speed: f32,
}

impl Paddle {
    /// Paddle hugging the left or right wall, vertically centered
    pub fn new(side: Side, surface_width: f32, surface_height: f32) -> Self {
        let (x, color, speed) = match side {
            Side::Player => (PADDLE_MARGIN, PLAYER_COLOR, PLAYER_SPEED),
            Side::Opponent => (
                surface_width - PADDLE_WIDTH - PADDLE_MARGIN,
                OPPONENT_COLOR,
                OPPONENT_SPEED,
            ),
        };
        Self {
            x,
            y: surface_height / 2.0 - PADDLE_HEIGHT / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color,
            speed,
        }
    }

    /// Vertical center of the paddle
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Keep the paddle fully on screen
    pub fn clamp_to(&mut self, surface_height: f32) {
        self.y = self.y.clamp(0.0, (surface_height - self.height).max(0.0));
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed used to rebuild `vel` on paddle hits
    pub speed: f32,
    /// `0xRRGGBB`
    pub color: u32,
}

impl Ball {
    pub fn new(center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::new(BALL_BASE_SPEED, SERVE_SPEED_Y),
            radius: BALL_RADIUS,
            speed: BALL_BASE_SPEED,
            color: BALL_COLOR,
        }
    }
}

/// Points for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    /// Either side at the win threshold
    pub fn is_decided(&self) -> bool {
        self.player == WIN_SCORE || self.opponent == WIN_SCORE
    }

    /// Player wins only with strictly more points
    pub fn leader(&self) -> Side {
        if self.player > self.opponent {
            Side::Player
        } else {
            Side::Opponent
        }
    }
}

/// Per-match counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub paddle_hits: u32,
    pub rallies: u32,
    pub rally_hits: u32,
    pub longest_rally: u32,
    pub ticks: u64,
}

impl MatchStats {
    pub fn record_hit(&mut self) {
        self.paddle_hits += 1;
        self.rally_hits += 1;
    }

    /// Close the current rally (a point was scored)
    pub fn end_rally(&mut self) {
        self.rallies += 1;
        self.longest_rally = self.longest_rally.max(self.rally_hits);
        self.rally_hits = 0;
    }
}

/// Serializable end-of-match report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub winner: Side,
    pub score: Score,
    pub difficulty: Difficulty,
    pub stats: MatchStats,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub difficulty: Difficulty,
    pub phase: MatchPhase,
    /// Set when the match ends, cleared when a new one starts
    pub winner: Option<Side>,
    pub stats: MatchStats,
    /// Simulation tick counter (lifetime of the state)
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a state on the default surface, sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self::with_surface(seed, SURFACE_WIDTH, SURFACE_HEIGHT)
    }

    pub fn with_surface(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            width,
            height,
            player: Paddle::new(Side::Player, width, height),
            opponent: Paddle::new(Side::Opponent, width, height),
            ball: Ball::new(Vec2::new(width / 2.0, height / 2.0)),
            score: Score::default(),
            difficulty: Difficulty::default(),
            phase: MatchPhase::Menu,
            winner: None,
            stats: MatchStats::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Surface center
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Shared RNG for all random simulation decisions
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Serve: recenter the ball at base speed, send it back the other way
    /// with a random vertical direction
    pub fn reset_ball(&mut self) {
        let center = self.center();
        let flip_up = self.rng.random_bool(0.5);
        let ball = &mut self.ball;
        ball.pos = center;
        ball.speed = BALL_BASE_SPEED;
        ball.vel.x = -ball.vel.x;
        ball.vel.y = if flip_up { -SERVE_SPEED_Y } else { SERVE_SPEED_Y };
        log::debug!("Serve toward {:+.2}, {:+.1}", ball.vel.x, ball.vel.y);
    }

    /// Snapshot of the finished match
    pub fn summary(&self) -> Option<MatchSummary> {
        self.winner.map(|winner| MatchSummary {
            winner,
            score: self.score,
            difficulty: self.difficulty,
            stats: self.stats.clone(),
        })
    }
}
