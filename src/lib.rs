//! Step Hop - A falling-platform hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, platforms, jumps, scoring)
//! - `view`: Pure render projection of the game state
//! - `audio`: Fire-and-forget sound cues
//! - `highscores`: Session best score
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod sim;
pub mod tuning;
pub mod view;

pub use highscores::HighScore;
pub use tuning::{Tuning, TuningError};
pub use view::{GameOverOverlay, Scene};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: u32 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host will feed into the accumulator (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Arena dimensions (y grows upward, 0 is the floor)
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Floor height; reaching it without support ends the run
    pub const FLOOR_Y: f32 = 0.0;
}
