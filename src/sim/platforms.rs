//! Platform generation
//!
//! Pure functions of an RNG and the tuning, so layouts are reproducible
//! from a seed.

use rand::Rng;

use super::state::Platform;
use crate::tuning::Tuning;

/// Random width and center x that keep the platform inside the arena
fn random_span<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> (f32, f32) {
    let width = rng.random_range(tuning.min_platform_width..=tuning.max_platform_width);
    let half = width / 2.0;
    let x = if tuning.arena_width - half > half {
        rng.random_range(half..=tuning.arena_width - half)
    } else {
        tuning.arena_width / 2.0
    };
    (x, width)
}

/// Generate the opening layout: `platform_count` platforms stacked
/// `platform_spacing` apart starting at `first_platform_y`.
pub fn generate_platforms<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    first_id: u32,
) -> Vec<Platform> {
    (0..tuning.platform_count)
        .map(|i| {
            let (x, width) = random_span(rng, tuning);
            Platform {
                id: first_id + i as u32,
                x,
                y: tuning.first_platform_y + i as f32 * tuning.platform_spacing,
                width,
            }
        })
        .collect()
}

/// A new platform entering at the top of the arena
pub fn spawn_platform<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, id: u32) -> Platform {
    let (x, width) = random_span(rng, tuning);
    Platform {
        id,
        x,
        y: tuning.spawn_height,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_classic_layout_heights() {
        let mut rng = Pcg32::seed_from_u64(1);
        let platforms = generate_platforms(&mut rng, &Tuning::classic(), 1);
        let ys: Vec<f32> = platforms.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![300.0, 450.0, 600.0]);
        let ids: Vec<u32> = platforms.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let tuning = Tuning::default();
        let a = generate_platforms(&mut Pcg32::seed_from_u64(99), &tuning, 1);
        let b = generate_platforms(&mut Pcg32::seed_from_u64(99), &tuning, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_at_top() {
        let tuning = Tuning::default();
        let p = spawn_platform(&mut Pcg32::seed_from_u64(5), &tuning, 42);
        assert_eq!(p.id, 42);
        assert_eq!(p.y, tuning.spawn_height);
    }

    proptest! {
        #[test]
        fn generated_platforms_within_ranges(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let platforms = generate_platforms(&mut rng, &tuning, 1);
            prop_assert_eq!(platforms.len(), tuning.platform_count);
            for (i, p) in platforms.iter().enumerate() {
                let expected_y = tuning.first_platform_y + i as f32 * tuning.platform_spacing;
                prop_assert_eq!(p.y, expected_y);
                prop_assert!(p.width >= tuning.min_platform_width);
                prop_assert!(p.width <= tuning.max_platform_width);
                prop_assert!(p.left() >= -0.001);
                prop_assert!(p.right() <= tuning.arena_width + 0.001);
            }
        }
    }
}
