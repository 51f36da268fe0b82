//! Full matches driven through the public API

use duel_pong::consts::{REFERENCE_FRAME_MS, WIN_SCORE};
use duel_pong::sim::{Difficulty, GameEvent, GameState, MatchPhase, Side, TickInput};
use duel_pong::{LoopDriver, TimeStep};

const MAX_FRAMES: u64 = 200_000;

/// Keep the player paddle on the ball's row
fn follow(state: &GameState) -> TickInput {
    let offset = state.ball.pos.y - state.player.center_y();
    TickInput {
        up: offset < -10.0,
        down: offset > 10.0,
    }
}

/// Drive frames until the driver stops; returns every event emitted
fn play_out(
    state: &mut GameState,
    driver: &mut LoopDriver,
    input: impl Fn(&GameState) -> TickInput,
    frame_ms: f64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for frame in 0..MAX_FRAMES {
        let tick_input = input(state);
        let report = driver.frame(state, tick_input, frame as f64 * frame_ms);
        events.extend(report.events);
        if !report.keep_running {
            break;
        }
    }
    events
}

fn scored(events: &[GameEvent]) -> Vec<Side> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Scored { scorer, .. } => Some(*scorer),
            _ => None,
        })
        .collect()
}

#[test]
fn idle_player_match_ends_with_match_over() {
    let mut state = GameState::new(11);
    let mut driver = LoopDriver::new(TimeStep::PerFrame);
    assert!(state.start_match(Difficulty::Hard).success);

    let events = play_out(&mut state, &mut driver, |_| TickInput::default(), REFERENCE_FRAME_MS);

    assert_eq!(state.phase, MatchPhase::GameOver);
    let winner = state.winner.expect("finished match has a winner");
    assert_eq!(state.score.get(winner), WIN_SCORE);
    assert!(state.score.get(opposite(winner)) < WIN_SCORE);
    assert_eq!(
        scored(&events).len() as u32,
        state.score.player + state.score.opponent
    );
    assert_eq!(events.last(), Some(&GameEvent::MatchOver { winner }));
}

#[test]
fn autopilot_match_reaches_a_winner() {
    for difficulty in Difficulty::ALL {
        let mut state = GameState::new(2024);
        let mut driver = LoopDriver::new(TimeStep::PerFrame);
        state.start_match(difficulty);

        let events = play_out(&mut state, &mut driver, follow, REFERENCE_FRAME_MS);
        let points = scored(&events);

        assert!(state.is_game_over(), "{} match did not finish", difficulty.as_str());
        let winner = state.winner.expect("finished match has a winner");
        assert_eq!(state.score.get(winner), WIN_SCORE);
        assert!(state.score.get(winner) > state.score.get(opposite(winner)));
        assert_eq!(
            points.len() as u32,
            state.score.player + state.score.opponent
        );

        let summary = state.summary().expect("summary after game over");
        assert_eq!(summary.difficulty, difficulty);
        assert_eq!(summary.stats.rallies as usize, points.len());
        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
            .count();
        assert_eq!(summary.stats.paddle_hits as usize, hits);
    }
}

#[test]
fn scores_only_ever_step_by_one() {
    let mut state = GameState::new(99);
    let mut driver = LoopDriver::new(TimeStep::PerFrame);
    state.start_match(Difficulty::Medium);

    let events = play_out(&mut state, &mut driver, follow, REFERENCE_FRAME_MS);
    let mut total = 0;
    for event in &events {
        if let GameEvent::Scored { score, .. } = event {
            assert_eq!(score.player + score.opponent, total + 1);
            total += 1;
        }
    }
    assert!(total >= WIN_SCORE);
}

#[test]
fn scaled_time_step_finishes_on_a_fast_display() {
    let mut state = GameState::new(7);
    let mut driver = LoopDriver::new(TimeStep::Scaled);
    state.start_match(Difficulty::Easy);

    // 144 Hz refresh
    let events = play_out(&mut state, &mut driver, |_| TickInput::default(), 1000.0 / 144.0);

    assert!(state.is_game_over());
    let winner = state.winner.expect("finished match has a winner");
    assert_eq!(state.score.get(winner), WIN_SCORE);
    assert_eq!(
        scored(&events).len() as u32,
        state.score.player + state.score.opponent
    );
}

#[test]
fn restart_returns_to_menu_and_new_match_is_fresh() {
    let mut state = GameState::new(5);
    let mut driver = LoopDriver::default();
    state.start_match(Difficulty::Hard);
    play_out(&mut state, &mut driver, |_| TickInput::default(), REFERENCE_FRAME_MS);
    assert!(state.is_game_over());

    // Driver stays idle after the match
    let report = driver.frame(&mut state, TickInput::default(), 0.0);
    assert!(!report.keep_running);
    assert!(report.events.is_empty());

    // Can't start straight from game over
    assert!(!state.start_match(Difficulty::Easy).success);

    assert!(state.return_to_menu().success);
    assert_eq!(state.phase, MatchPhase::Menu);

    assert!(state.start_match(Difficulty::Easy).success);
    assert_eq!(state.difficulty, Difficulty::Easy);
    assert_eq!(state.score.player + state.score.opponent, 0);
    assert_eq!(state.winner, None);
    assert_eq!(state.ball.pos, state.center());
    assert!(driver.frame(&mut state, TickInput::default(), 0.0).keep_running);
}

#[test]
fn same_seed_same_match() {
    let run = || {
        let mut state = GameState::new(314);
        let mut driver = LoopDriver::default();
        state.start_match(Difficulty::Medium);
        let events = play_out(&mut state, &mut driver, follow, REFERENCE_FRAME_MS);
        (events, state.summary())
    };
    assert_eq!(run(), run());
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Player => Side::Opponent,
        Side::Opponent => Side::Player,
    }
}
