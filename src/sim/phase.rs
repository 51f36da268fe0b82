//! Match lifecycle state machine
//!
//! `Menu -> Playing -> GameOver -> Menu`. Every transition goes through
//! [`GameState::apply`]; invalid actions leave the state untouched.

use serde::{Deserialize, Serialize};

use super::state::{Difficulty, GameState, MatchPhase, MatchStats, Score};

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchAction {
    /// Difficulty picked in the menu
    Start(Difficulty),
    /// Win threshold reached
    Finish,
    /// Back to the difficulty selector
    Restart,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: MatchPhase,
    pub to: MatchPhase,
    pub action: MatchAction,
}

/// Next phase for an action, if the action is valid in `phase`
pub fn next_phase(phase: MatchPhase, action: MatchAction) -> Option<MatchPhase> {
    match (phase, action) {
        (MatchPhase::Menu, MatchAction::Start(_)) => Some(MatchPhase::Playing),
        (MatchPhase::Playing, MatchAction::Finish) => Some(MatchPhase::GameOver),
        (MatchPhase::GameOver, MatchAction::Restart) => Some(MatchPhase::Menu),
        _ => None,
    }
}

impl GameState {
    /// Attempt a transition, running its entry effects on success
    pub fn apply(&mut self, action: MatchAction) -> TransitionResult {
        let from = self.phase;
        let Some(to) = next_phase(from, action) else {
            log::warn!("Ignoring {:?} while in {:?}", action, from);
            return TransitionResult {
                success: false,
                from,
                to: from,
                action,
            };
        };

        match action {
            MatchAction::Start(difficulty) => {
                self.difficulty = difficulty;
                self.score = Score::default();
                self.stats = MatchStats::default();
                self.winner = None;
                self.reset_ball();
                log::info!("Match started ({})", difficulty.as_str());
            }
            MatchAction::Finish => {
                let winner = self.score.leader();
                self.winner = Some(winner);
                log::info!(
                    "Match over: {} wins {}-{}",
                    winner.as_str(),
                    self.score.player,
                    self.score.opponent
                );
            }
            MatchAction::Restart => {
                log::info!("Back to menu");
            }
        }

        self.phase = to;
        TransitionResult {
            success: true,
            from,
            to,
            action,
        }
    }

    pub fn start_match(&mut self, difficulty: Difficulty) -> TransitionResult {
        self.apply(MatchAction::Start(difficulty))
    }

    pub fn return_to_menu(&mut self) -> TransitionResult {
        self.apply(MatchAction::Restart)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }
}
