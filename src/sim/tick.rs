//! Fixed timestep simulation tick
//!
//! One call to [`tick`] applies input, the pending jump, platform motion,
//! gravity and the speed ramp as a single state transition.

use rand::Rng;

use super::autopilot::autopilot;
use super::collision::find_landing;
use super::platforms::spawn_platform;
use super::state::{GameEvent, GamePhase, GameState, Motion, PendingJump};
use crate::consts::FLOOR_Y;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Command {
    /// Map a `KeyboardEvent.key` / `.code` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Command::MoveLeft),
            "ArrowRight" => Some(Command::MoveRight),
            " " | "Space" | "Spacebar" => Some(Command::Jump),
            _ => None,
        }
    }

    /// Command for a tap or click on the game area. Taps on the
    /// game-over overlay belong to its controls.
    pub fn for_tap(on_overlay: bool) -> Option<Self> {
        (!on_overlay).then_some(Command::Jump)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands queued since the previous tick, applied in order
    pub commands: Vec<Command>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            idle_mode: false,
        }
    }
}

/// Advance the game state by one fixed timestep of `dt_ms`
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    // Nothing moves until reset
    if state.is_game_over() {
        return;
    }

    for &command in &input.commands {
        handle_movement(state, command);
    }
    if input.idle_mode {
        for command in autopilot(state) {
            handle_movement(state, command);
        }
    }

    state.time_ms += u64::from(dt_ms);

    advance_jump(state, dt_ms);

    let fires = state.cadences.platforms.advance(dt_ms);
    for _ in 0..fires {
        if state.is_game_over() {
            return;
        }
        tick_platforms(state);
    }

    let fires = state.cadences.gravity.advance(dt_ms);
    for _ in 0..fires {
        if state.is_game_over() {
            return;
        }
        tick_gravity(state);
    }

    let fires = state.cadences.speed_ramp.advance(dt_ms);
    for _ in 0..fires {
        tick_speed_ramp(state);
    }
}

/// Apply one player command. Ignored once the run is over.
pub fn handle_movement(state: &mut GameState, command: Command) {
    if state.is_game_over() {
        return;
    }

    let step = state.tuning.move_step;
    match command {
        Command::MoveLeft => state.player.pos.x -= step,
        Command::MoveRight => state.player.pos.x += step,
        Command::Jump => {
            handle_jump(state);
            return;
        }
    }

    // Walking off the edge of the ridden platform starts a fall
    if let Some(id) = state.player.current_platform() {
        let still_supported = state
            .platform(id)
            .is_some_and(|p| (state.player.pos.x - p.x).abs() <= p.width / 2.0);
        if !still_supported {
            state.player.motion = Motion::Airborne;
        }
    }
}

/// Start a jump: rise now, descend after `jump_delay_ms`
pub fn handle_jump(state: &mut GameState) {
    if state.is_game_over() || state.player.is_jumping() {
        return;
    }

    state.player.motion = Motion::Jumping;
    state.player.pos.y += state.tuning.jump_height;
    state.pending_jump = Some(PendingJump {
        generation: state.jump_generation,
        remaining_ms: state.tuning.jump_delay_ms.max(1),
    });
    state.events.push(GameEvent::Jumped);
}

/// Count down the pending jump and complete it when due
fn advance_jump(state: &mut GameState, dt_ms: u32) {
    let Some(mut pending) = state.pending_jump else {
        return;
    };
    pending.remaining_ms = pending.remaining_ms.saturating_sub(dt_ms);
    if pending.remaining_ms > 0 {
        state.pending_jump = Some(pending);
        return;
    }
    state.pending_jump = None;
    complete_jump(state, pending.generation);
}

/// Second half of a jump: descend, then look for a landing
fn complete_jump(state: &mut GameState, generation: u32) {
    if generation != state.jump_generation || state.is_game_over() {
        log::debug!("Discarding stale jump completion (generation {generation})");
        return;
    }

    let descent = state.tuning.jump_descent;
    state.player.pos.y = (state.player.pos.y - descent).max(FLOOR_Y);
    state.player.motion = Motion::Airborne;
    check_collision(state);
}

/// Resolve the player's support: land, keep falling, or end the run
pub fn check_collision(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }

    let pos = state.player.pos;
    let landing =
        find_landing(pos, &state.platforms, state.tuning.landing_band).map(|p| (p.id, p.y));

    match landing {
        Some((platform_id, y)) => land(state, platform_id, y),
        None if pos.y <= FLOOR_Y => game_over(state),
        None => state.player.motion = Motion::Airborne,
    }
}

fn land(state: &mut GameState, platform_id: u32, y: f32) {
    state.player.pos.y = y;
    state.player.motion = Motion::Riding { platform_id };

    // First landing arms scoring
    if state.has_started {
        state.score += 1;
        if state.high_score.record(state.score) {
            state.events.push(GameEvent::NewHighScore { score: state.score });
        }
    } else {
        state.has_started = true;
    }

    log::debug!("Landed on platform {platform_id} (score {})", state.score);
    state.events.push(GameEvent::Landed {
        platform_id,
        score: state.score,
    });
}

fn game_over(state: &mut GameState) {
    state.player.pos.y = FLOOR_Y;
    state.player.motion = Motion::Airborne;
    state.phase = GamePhase::GameOver;
    state.invalidate_jump();
    state.high_score.record(state.score);

    log::info!(
        "Game over: score {} (best {})",
        state.score,
        state.high_score.best()
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        high_score: state.high_score.best(),
    });
}

/// Pull an unsupported player toward the floor
pub fn tick_gravity(state: &mut GameState) {
    if state.is_game_over() || state.player.motion != Motion::Airborne {
        return;
    }

    let y = (state.player.pos.y - state.tuning.gravity_step).max(FLOOR_Y);
    state.player.pos.y = y;

    if state.tuning.land_while_falling || y <= FLOOR_Y {
        check_collision(state);
    }
}

/// Lower every platform by `speed`, carry the rider, despawn and spawn
pub fn tick_platforms(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }

    let delta = state.speed;
    for platform in &mut state.platforms {
        platform.y -= delta;
    }
    if state.player.on_platform() {
        state.player.pos.y -= delta;
    }

    state.platforms.retain(|p| p.y > FLOOR_Y);

    // Ridden platform fell out of the arena
    if let Some(id) = state.player.current_platform() {
        if state.platform(id).is_none() {
            state.player.motion = Motion::Airborne;
            state.player.pos.y = state.player.pos.y.max(FLOOR_Y);
            if state.player.pos.y <= FLOOR_Y {
                check_collision(state);
                if state.is_game_over() {
                    return;
                }
            }
        }
    }

    if state.rng.random_bool(state.tuning.spawn_chance) {
        let id = state.next_entity_id();
        let platform = spawn_platform(&mut state.rng, &state.tuning, id);
        log::debug!("Spawned platform {} at x={:.0}", platform.id, platform.x);
        state.platforms.push(platform);
    }
}

/// Raise the platform fall rate, capped at `max_speed`
pub fn tick_speed_ramp(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }
    state.speed = (state.speed + state.tuning.speed_increment).min(state.tuning.max_speed);
}

/// Restart the run from the overlay
pub fn reset_game(state: &mut GameState) {
    state.reset_game();
}
