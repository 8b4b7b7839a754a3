//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platforms in creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod platforms;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{find_landing, within_landing_band};
pub use platforms::{generate_platforms, spawn_platform};
pub use state::{GameEvent, GamePhase, GameState, Motion, PendingJump, Platform, Player};
pub use tick::{
    Command, TickInput, check_collision, handle_jump, handle_movement, reset_game, tick,
    tick_gravity, tick_platforms, tick_speed_ramp,
};
