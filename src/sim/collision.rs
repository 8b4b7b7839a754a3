//! Landing detection
//!
//! A landing is the player's position falling inside a platform's vertical
//! band and horizontal extent.

use glam::Vec2;

use super::state::Platform;

/// Whether a point counts as standing on the platform
#[inline]
pub fn within_landing_band(pos: Vec2, platform: &Platform, band: f32) -> bool {
    (pos.y - platform.y).abs() <= band && (pos.x - platform.x).abs() <= platform.width / 2.0
}

/// First platform (in list order) that supports a player at `pos`
pub fn find_landing<'a>(pos: Vec2, platforms: &'a [Platform], band: f32) -> Option<&'a Platform> {
    platforms.iter().find(|p| within_landing_band(pos, p, band))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(id: u32, x: f32, y: f32, width: f32) -> Platform {
        Platform { id, x, y, width }
    }

    #[test]
    fn test_hit_inside_band() {
        let p = platform(1, 200.0, 300.0, 80.0);
        assert!(within_landing_band(Vec2::new(200.0, 300.0), &p, 20.0));
        assert!(within_landing_band(Vec2::new(240.0, 320.0), &p, 20.0));
        assert!(within_landing_band(Vec2::new(160.0, 280.0), &p, 20.0));
    }

    #[test]
    fn test_miss_vertical() {
        let p = platform(1, 200.0, 300.0, 80.0);
        assert!(!within_landing_band(Vec2::new(200.0, 321.0), &p, 20.0));
        assert!(!within_landing_band(Vec2::new(200.0, 279.0), &p, 20.0));
    }

    #[test]
    fn test_miss_horizontal() {
        let p = platform(1, 200.0, 300.0, 80.0);
        assert!(!within_landing_band(Vec2::new(241.0, 300.0), &p, 20.0));
        assert!(!within_landing_band(Vec2::new(150.0, 300.0), &p, 20.0));
    }

    #[test]
    fn test_find_landing_picks_first_match() {
        let platforms = [
            platform(1, 100.0, 500.0, 60.0),
            platform(2, 200.0, 210.0, 100.0),
            platform(3, 200.0, 195.0, 100.0),
        ];
        let hit = find_landing(Vec2::new(210.0, 200.0), &platforms, 20.0);
        assert_eq!(hit.map(|p| p.id), Some(2));
        assert!(find_landing(Vec2::new(10.0, 200.0), &platforms, 20.0).is_none());
    }
}
