//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; the host only reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::platforms::generate_platforms;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; physics and input frozen until reset
    GameOver,
}

/// What the player is doing vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Falling under gravity
    Airborne,
    /// Between the rise and descent of a jump
    Jumping,
    /// Standing on a platform and moving with it
    Riding { platform_id: u32 },
}

/// The player sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub motion: Motion,
}

impl Player {
    pub fn new(origin: Vec2) -> Self {
        Self {
            pos: origin,
            motion: Motion::Airborne,
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.motion == Motion::Jumping
    }

    pub fn on_platform(&self) -> bool {
        matches!(self.motion, Motion::Riding { .. })
    }

    /// Id of the platform being ridden, if any
    pub fn current_platform(&self) -> Option<u32> {
        match self.motion {
            Motion::Riding { platform_id } => Some(platform_id),
            _ => None,
        }
    }
}

/// A platform. `x` is its horizontal center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Platform {
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Events emitted by the simulation, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed { platform_id: u32, score: u64 },
    NewHighScore { score: u64 },
    GameOver { score: u64, high_score: u64 },
}

/// Fixed-period subsystem clock driven by simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub period_ms: u32,
    elapsed_ms: u32,
}

impl Cadence {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Advance by `dt_ms`, returning how many times the period elapsed
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        self.elapsed_ms += dt_ms;
        let fires = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        fires
    }
}

/// The scheduled descent of a jump in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingJump {
    /// Must match `GameState::jump_generation` to apply
    pub generation: u32,
    pub remaining_ms: u32,
}

/// Subsystem clocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadences {
    pub gravity: Cadence,
    pub platforms: Cadence,
    pub speed_ramp: Cadence,
}

impl Cadences {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            gravity: Cadence::new(tuning.gravity_period_ms),
            platforms: Cadence::new(tuning.platform_period_ms),
            speed_ramp: Cadence::new(tuning.speed_ramp_period_ms),
        }
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Active platforms, in creation order
    pub platforms: Vec<Platform>,
    pub score: u64,
    /// Set by the first landing; later landings score
    pub has_started: bool,
    pub high_score: HighScore,
    /// Platform fall per platform tick
    pub speed: f32,
    pub cadences: Cadences,
    pub pending_jump: Option<PendingJump>,
    /// Bumped on reset and game over to invalidate a pending jump
    pub jump_generation: u32,
    /// Simulation time in ms since the run started
    pub time_ms: u64,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = generate_platforms(&mut rng, &tuning, 1);
        let next_id = platforms.len() as u32 + 1;

        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            player: Player::new(tuning.player_origin),
            platforms,
            score: 0,
            has_started: false,
            high_score: HighScore::new(),
            speed: tuning.initial_speed,
            cadences: Cadences::from_tuning(&tuning),
            pending_jump: None,
            jump_generation: 0,
            time_ms: 0,
            events: Vec::new(),
            next_id,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Drop any scheduled jump descent so it can never fire
    pub fn invalidate_jump(&mut self) {
        self.jump_generation = self.jump_generation.wrapping_add(1);
        self.pending_jump = None;
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a fresh run. The high score and RNG stream carry over.
    pub fn reset_game(&mut self) {
        self.invalidate_jump();
        self.score = 0;
        self.has_started = false;
        self.player = Player::new(self.tuning.player_origin);
        let first_id = self.next_id;
        self.platforms = generate_platforms(&mut self.rng, &self.tuning, first_id);
        self.next_id = first_id + self.platforms.len() as u32;
        self.speed = self.tuning.initial_speed;
        self.cadences = Cadences::from_tuning(&self.tuning);
        self.time_ms = 0;
        self.phase = GamePhase::Playing;
        log::info!("Run reset (high score {})", self.high_score.best());
    }
}
