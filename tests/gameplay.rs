// Whole-run tests for the `step-hop` crate.
// These drive the public simulation API the way the hosts do.

use proptest::prelude::*;

use step_hop::audio::{Silent, play_events};
use step_hop::consts::SIM_DT_MS;
use step_hop::sim::{Command, GameEvent, GameState, TickInput, reset_game, tick};
use step_hop::{Scene, Tuning};

fn command(code: u8) -> Option<Command> {
    match code % 6 {
        0 => Some(Command::MoveLeft),
        1 => Some(Command::MoveRight),
        2 => Some(Command::Jump),
        _ => None,
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_input(seed in any::<u64>(), codes in prop::collection::vec(any::<u8>(), 1..400)) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut last_score = 0;
        let mut last_best = 0;

        for code in codes {
            let input = TickInput::with(command(code));
            let was_over = state.is_game_over();
            tick(&mut state, &input, SIM_DT_MS);

            prop_assert!(state.platforms.iter().all(|p| p.y > 0.0));
            prop_assert_eq!(state.pending_jump.is_some(), state.player.is_jumping());
            if let Some(id) = state.player.current_platform() {
                prop_assert!(state.platform(id).is_some());
            }
            prop_assert!(state.player.pos.y >= 0.0);
            prop_assert!(state.speed <= state.tuning.max_speed);
            prop_assert!(state.score >= last_score);
            if was_over {
                prop_assert_eq!(state.score, last_score);
            }
            prop_assert!(state.high_score.best() >= last_best);
            prop_assert!(state.high_score.best() >= state.score);

            last_score = state.score;
            last_best = state.high_score.best();
        }
    }
}

#[test]
fn autopilot_runs_are_reproducible() {
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let run = |seed: u64| {
        let mut state = GameState::new(seed, Tuning::default());
        let mut events = Vec::new();
        for _ in 0..3000 {
            tick(&mut state, &input, SIM_DT_MS);
            events.extend(state.drain_events());
        }
        (Scene::project(&state), events)
    };

    assert_eq!(run(2024), run(2024));
}

#[test]
fn game_over_then_reset_starts_fresh_run() {
    let mut state = GameState::new(11, Tuning::classic());
    let mut audio = Silent;
    let idle = TickInput::default();

    while !state.is_game_over() {
        tick(&mut state, &idle, SIM_DT_MS);
        let events = state.drain_events();
        play_events(&mut audio, &events);
        assert!(state.time_ms < 60_000, "idle run never ended");
    }

    let scene = Scene::project(&state);
    let overlay = scene.overlay.expect("overlay shown after game over");
    assert_eq!(overlay.score, 0);

    overlay.activate(|| reset_game(&mut state));
    assert!(!state.is_game_over());
    assert_eq!(state.score, 0);
    assert_eq!(state.platforms.len(), 3);
    assert!(Scene::project(&state).overlay.is_none());

    // Play continues after reset
    tick(&mut state, &TickInput::with([Command::Jump]), SIM_DT_MS);
    assert!(state.drain_events().contains(&GameEvent::Jumped));
}
