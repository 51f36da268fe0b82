//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the `GameState`
//! - No globals; every step takes the state explicitly
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod opponent;
pub mod phase;
pub mod state;
pub mod tick;

pub use collision::{Deflection, deflect, hits_paddle};
pub use phase::{MatchAction, TransitionResult};
pub use state::{
    Ball, Difficulty, GameEvent, GameState, MatchPhase, MatchStats, MatchSummary, Paddle, Score,
    Side,
};
pub use tick::{TickInput, tick};
