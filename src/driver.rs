//! Per-frame loop driver
//!
//! The host calls [`LoopDriver::frame`] from its display-refresh callback and
//! keeps scheduling frames while the report says so. How much simulated
//! time one frame covers is decided by [`TimeStep`].

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_SCALE, REFERENCE_FRAME_MS};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// How refresh callbacks map to simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeStep {
    /// One reference frame per callback. Faster displays play faster.
    #[default]
    PerFrame,
    /// Scale each tick by the wall-clock time since the previous callback
    Scaled,
}

impl TimeStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeStep::PerFrame => "per-frame",
            TimeStep::Scaled => "scaled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per-frame" | "perframe" | "fixed" => Some(TimeStep::PerFrame),
            "scaled" | "delta" => Some(TimeStep::Scaled),
            _ => None,
        }
    }
}

/// Outcome of one driven frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Events emitted by the tick, in order
    pub events: Vec<GameEvent>,
    /// Whether the host should schedule another frame
    pub keep_running: bool,
    /// Simulated reference frames covered by this tick (0 if none ran)
    pub dt: f32,
}

/// Drives the `Playing` phase one refresh at a time
#[derive(Debug, Clone, Default)]
pub struct LoopDriver {
    pub time_step: TimeStep,
    last_frame_ms: Option<f64>,
}

impl LoopDriver {
    pub fn new(time_step: TimeStep) -> Self {
        Self {
            time_step,
            last_frame_ms: None,
        }
    }

    /// Forget the previous timestamp (call when a match starts)
    pub fn reset(&mut self) {
        self.last_frame_ms = None;
    }

    /// Time step for a callback at `now_ms`
    fn next_dt(&mut self, now_ms: f64) -> f32 {
        let previous = self.last_frame_ms.replace(now_ms);
        match (self.time_step, previous) {
            (TimeStep::PerFrame, _) | (TimeStep::Scaled, None) => 1.0,
            (TimeStep::Scaled, Some(prev)) => {
                let frames = ((now_ms - prev) / REFERENCE_FRAME_MS) as f32;
                frames.clamp(0.0, MAX_FRAME_SCALE)
            }
        }
    }

    /// Run one simulation step for a refresh callback at `now_ms`
    pub fn frame(&mut self, state: &mut GameState, input: TickInput, now_ms: f64) -> FrameReport {
        if !state.is_playing() {
            self.reset();
            return FrameReport::default();
        }

        let dt = self.next_dt(now_ms);
        let events = tick(state, &input, dt);
        let keep_running = state.is_playing();
        if !keep_running {
            self.reset();
        }

        FrameReport {
            events,
            keep_running,
            dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, MatchPhase, Side};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(5);
        state.start_match(Difficulty::Medium);
        state
    }

    #[test]
    fn test_idle_outside_playing() {
        let mut driver = LoopDriver::default();
        let mut state = GameState::new(5);
        let report = driver.frame(&mut state, TickInput::default(), 0.0);
        assert!(!report.keep_running);
        assert!(report.events.is_empty());
        assert_eq!(report.dt, 0.0);
    }

    #[test]
    fn test_per_frame_ignores_clock() {
        let mut driver = LoopDriver::new(TimeStep::PerFrame);
        let mut state = playing();
        assert_eq!(driver.frame(&mut state, TickInput::default(), 0.0).dt, 1.0);
        assert_eq!(driver.frame(&mut state, TickInput::default(), 7.0).dt, 1.0);
        assert_eq!(driver.frame(&mut state, TickInput::default(), 500.0).dt, 1.0);
    }

    #[test]
    fn test_scaled_follows_clock() {
        let mut driver = LoopDriver::new(TimeStep::Scaled);
        let mut state = playing();
        let first = driver.frame(&mut state, TickInput::default(), 1000.0);
        assert_eq!(first.dt, 1.0);

        // 120 Hz display: half a reference frame
        let half = driver.frame(&mut state, TickInput::default(), 1000.0 + 1000.0 / 120.0);
        assert!((half.dt - 0.5).abs() < 1e-4);

        // Long stall is capped
        let stall = driver.frame(&mut state, TickInput::default(), 5000.0);
        assert_eq!(stall.dt, MAX_FRAME_SCALE);
    }

    #[test]
    fn test_scaled_ball_distance_independent_of_refresh() {
        let run = |hz: f64, seconds: f64| {
            let mut driver = LoopDriver::new(TimeStep::Scaled);
            let mut state = playing();
            state.ball.pos = state.center();
            state.ball.vel = Vec2::new(2.0, 0.0);
            let frames = (hz * seconds) as usize;
            for i in 0..=frames {
                driver.frame(&mut state, TickInput::default(), i as f64 * 1000.0 / hz);
            }
            state.ball.pos.x
        };
        // First frame counts as one reference frame on both
        let at_60 = run(60.0, 1.0);
        let at_120 = run(120.0, 1.0);
        assert!((at_60 - at_120).abs() < 2.5, "{at_60} vs {at_120}");
    }

    #[test]
    fn test_stops_on_match_over() {
        let mut driver = LoopDriver::default();
        let mut state = playing();
        state.score.opponent = 6;
        state.player.y = 0.0;
        state.ball.pos = Vec2::new(12.0, 480.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let report = driver.frame(&mut state, TickInput::default(), 0.0);

        assert!(!report.keep_running);
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert!(report.events.contains(&GameEvent::MatchOver {
            winner: Side::Opponent
        }));
    }

    #[test]
    fn test_time_step_parse() {
        assert_eq!(TimeStep::from_str("Scaled"), Some(TimeStep::Scaled));
        assert_eq!(TimeStep::from_str("fixed"), Some(TimeStep::PerFrame));
        assert_eq!(TimeStep::from_str("warp"), None);
    }
}
