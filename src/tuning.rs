//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Partial JSON is accepted;
//! missing fields fall back to the default preset.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    /// Height at which new platforms appear
    pub spawn_height: f32,

    // === Player ===
    pub player_origin: Vec2,
    /// Horizontal shift per arrow key
    pub move_step: f32,
    /// Upward displacement applied when a jump starts
    pub jump_height: f32,
    /// Downward displacement applied when the jump completes
    pub jump_descent: f32,
    /// Delay between the rise and the descent of a jump
    pub jump_delay_ms: u32,
    /// Fall per gravity tick
    pub gravity_step: f32,
    pub gravity_period_ms: u32,
    /// Whether a gravity fall can land on a platform
    pub land_while_falling: bool,

    // === Platforms ===
    pub platform_count: usize,
    pub first_platform_y: f32,
    pub platform_spacing: f32,
    pub min_platform_width: f32,
    pub max_platform_width: f32,
    pub platform_period_ms: u32,
    /// Probability of a new platform per platform tick
    pub spawn_chance: f64,
    /// Half-height of the vertical band that counts as a landing
    pub landing_band: f32,

    // === Speed ramp ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub speed_ramp_period_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            spawn_height: ARENA_HEIGHT - 50.0,

            player_origin: Vec2::new(ARENA_WIDTH / 2.0, 100.0),
            move_step: 20.0,
            jump_height: 100.0,
            jump_descent: 50.0,
            jump_delay_ms: 500,
            gravity_step: 5.0,
            gravity_period_ms: 30,
            land_while_falling: true,

            platform_count: 5,
            first_platform_y: 300.0,
            platform_spacing: 150.0,
            min_platform_width: 60.0,
            max_platform_width: 120.0,
            platform_period_ms: 50,
            spawn_chance: 0.1,
            landing_band: 20.0,

            initial_speed: 2.0,
            speed_increment: 0.5,
            max_speed: 10.0,
            speed_ramp_period_ms: 2000,
        }
    }
}

impl Tuning {
    /// Earliest ruleset: three platforms and slower cadences
    pub fn classic() -> Self {
        Self {
            platform_count: 3,
            gravity_period_ms: 50,
            platform_period_ms: 100,
            speed_ramp_period_ms: 1500,
            jump_delay_ms: 400,
            // Descent undoes the whole rise
            jump_descent: 100.0,
            ..Self::default()
        }
    }

    /// Parse and validate a tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let periods = [
            ("gravity_period_ms", self.gravity_period_ms),
            ("platform_period_ms", self.platform_period_ms),
            ("speed_ramp_period_ms", self.speed_ramp_period_ms),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(TuningError::Invalid(format!("{name} must be positive")));
            }
        }
        let magnitudes = [
            ("move_step", self.move_step),
            ("gravity_step", self.gravity_step),
            ("jump_height", self.jump_height),
            ("landing_band", self.landing_band),
            ("initial_speed", self.initial_speed),
        ];
        for (name, value) in magnitudes {
            if !(value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(TuningError::Invalid(format!(
                "spawn_chance {} outside [0, 1]",
                self.spawn_chance
            )));
        }
        if self.min_platform_width <= 0.0 || self.min_platform_width > self.max_platform_width {
            return Err(TuningError::Invalid(format!(
                "platform width range {}..={} is empty",
                self.min_platform_width, self.max_platform_width
            )));
        }
        if self.max_platform_width > self.arena_width {
            return Err(TuningError::Invalid(format!(
                "max_platform_width {} wider than arena {}",
                self.max_platform_width, self.arena_width
            )));
        }
        if self.first_platform_y <= 0.0 || self.spawn_height <= 0.0 {
            return Err(TuningError::Invalid(
                "platforms must start above the floor".to_string(),
            ));
        }
        if self.initial_speed > self.max_speed {
            return Err(TuningError::Invalid(format!(
                "initial_speed {} above max_speed {}",
                self.initial_speed, self.max_speed
            )));
        }
        Ok(())
    }
}
