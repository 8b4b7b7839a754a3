//! Idle/demo mode player
//!
//! Reads the state and returns the commands a simple player would press
//! this tick. Used by the browser idle mode and the native headless run.

use super::state::{GameState, Platform};
use super::tick::Command;

/// How far platforms will fall during one jump at the current speed
fn fall_during_jump(state: &GameState) -> f32 {
    let t = &state.tuning;
    state.speed * t.jump_delay_ms as f32 / t.platform_period_ms.max(1) as f32
}

/// Platform whose height after a jump best matches where the jump ends
fn best_target(state: &GameState, landing_y: f32, fall: f32) -> Option<&Platform> {
    let current = state.player.current_platform();
    state
        .platforms
        .iter()
        .filter(|p| Some(p.id) != current)
        .min_by(|a, b| {
            let da = (a.y - fall - landing_y).abs();
            let db = (b.y - fall - landing_y).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Commands for this tick
pub fn autopilot(state: &GameState) -> Vec<Command> {
    if state.is_game_over() || state.player.is_jumping() {
        return Vec::new();
    }

    let t = &state.tuning;
    let pos = state.player.pos;
    let landing_y = pos.y + t.jump_height - t.jump_descent;
    let fall = fall_during_jump(state);
    let mut commands = Vec::new();

    if let Some(target) = best_target(state, landing_y, fall) {
        let dx = target.x - pos.x;
        let on_current = |x: f32| {
            state
                .player
                .current_platform()
                .and_then(|id| state.platform(id))
                .is_none_or(|p| (x - p.x).abs() <= p.width / 2.0)
        };

        // Steer without walking off the platform being ridden
        if dx.abs() > t.move_step / 2.0 {
            let (command, next_x) = if dx > 0.0 {
                (Command::MoveRight, pos.x + t.move_step)
            } else {
                (Command::MoveLeft, pos.x - t.move_step)
            };
            if on_current(next_x) {
                commands.push(command);
            }
        }

        let aligned = dx.abs() <= target.width / 2.0;
        let reachable = (target.y - fall - landing_y).abs() <= t.landing_band;
        if aligned && reachable {
            commands.push(Command::Jump);
            return commands;
        }
    }

    // Last chance before the floor
    if !state.player.on_platform() && pos.y <= t.jump_descent {
        commands.push(Command::Jump);
    }

    commands
}
