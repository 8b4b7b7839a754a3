//! Render projection
//!
//! [`Scene::project`] maps game state straight onto layout coordinates. The
//! host applies the scene to the page; nothing here holds state.

use serde::Serialize;

use crate::sim::GameState;

/// Layout position of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub left: f32,
    pub bottom: f32,
}

/// Layout of one platform, keyed by platform id
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformMarker {
    pub key: u32,
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
}

/// Game-over popup contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverOverlay {
    pub score: u64,
    pub high_score: u64,
}

impl GameOverOverlay {
    pub const TITLE: &'static str = "Game Over";
    pub const RESET_LABEL: &'static str = "Try again?";

    /// Reset control: hands off to the caller's reset
    pub fn activate<F: FnOnce()>(&self, on_reset: F) {
        on_reset();
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_text(&self) -> String {
        format!("High score: {}", self.high_score)
    }
}

/// Everything the page shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub score_text: String,
    pub player: Marker,
    pub platforms: Vec<PlatformMarker>,
    pub overlay: Option<GameOverOverlay>,
}

impl Scene {
    pub fn project(state: &GameState) -> Self {
        let platforms = state
            .platforms
            .iter()
            .map(|p| PlatformMarker {
                key: p.id,
                left: p.x,
                bottom: p.y,
                width: p.width,
            })
            .collect();

        let overlay = state.is_game_over().then(|| GameOverOverlay {
            score: state.score,
            high_score: state.high_score.best(),
        });

        Self {
            score_text: format!("Score: {}", state.score),
            player: Marker {
                left: state.player.pos.x,
                bottom: state.player.pos.y,
            },
            platforms,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, reset_game};
    use crate::tuning::Tuning;

    #[test]
    fn test_projection_mirrors_state() {
        let mut state = GameState::new(8, Tuning::default());
        state.score = 4;
        let scene = Scene::project(&state);

        assert_eq!(scene.score_text, "Score: 4");
        assert_eq!(scene.player.left, state.player.pos.x);
        assert_eq!(scene.player.bottom, state.player.pos.y);
        assert_eq!(scene.platforms.len(), state.platforms.len());
        for (marker, platform) in scene.platforms.iter().zip(&state.platforms) {
            assert_eq!(marker.key, platform.id);
            assert_eq!(marker.left, platform.x);
            assert_eq!(marker.bottom, platform.y);
            assert_eq!(marker.width, platform.width);
        }
        assert!(scene.overlay.is_none());
    }

    #[test]
    fn test_overlay_only_when_game_over() {
        let mut state = GameState::new(8, Tuning::default());
        state.score = 6;
        state.high_score.record(9);
        state.phase = GamePhase::GameOver;

        let overlay = Scene::project(&state).overlay.unwrap();
        assert_eq!(overlay.score, 6);
        assert_eq!(overlay.high_score, 9);
        assert_eq!(overlay.high_score_text(), "High score: 9");
    }

    #[test]
    fn test_overlay_reset_invokes_callback() {
        let mut state = GameState::new(8, Tuning::default());
        state.phase = GamePhase::GameOver;
        let overlay = Scene::project(&state).overlay.unwrap();

        overlay.activate(|| reset_game(&mut state));
        assert!(!state.is_game_over());
        assert!(Scene::project(&state).overlay.is_none());
    }

    #[test]
    fn test_scene_serializes() {
        let state = GameState::new(8, Tuning::classic());
        let json = serde_json::to_value(Scene::project(&state)).unwrap();
        assert_eq!(json["platforms"].as_array().unwrap().len(), 3);
        assert!(json["overlay"].is_null());
    }
}
