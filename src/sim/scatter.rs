//! Seeded random table layouts
//!
//! Used by the headless runner and by tests that want a busy table.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{BodySpec, Bound, Color};

/// Placement attempts per requested body before giving up
const ATTEMPTS_PER_BODY: usize = 64;

/// Place up to `count` non-overlapping bodies inside `bound`.
///
/// Radii fall in `[max_radius / 2, max_radius]`. A crowded surface may yield
/// fewer bodies than asked for. The same seed always gives the same layout.
pub fn scatter(bound: Bound, count: usize, max_radius: f32, seed: u64) -> Vec<BodySpec> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut placed: Vec<BodySpec> = Vec::with_capacity(count);

    let max_radius = max_radius.min(bound.width / 2.0).min(bound.height / 2.0);
    if max_radius <= 0.0 {
        return placed;
    }
    let min_radius = max_radius / 2.0;

    for _ in 0..count * ATTEMPTS_PER_BODY {
        if placed.len() == count {
            break;
        }

        let radius = rng.random_range(min_radius..=max_radius);
        let x = rng.random_range(radius..=bound.width - radius);
        let y = rng.random_range(radius..=bound.height - radius);
        let pos = Vec2::new(x, y);

        let overlaps = placed
            .iter()
            .any(|other| other.pos().distance(pos) < other.radius + radius);
        if overlaps {
            continue;
        }

        let color = Color::ALL[rng.random_range(0..Color::ALL.len())];
        placed.push(BodySpec::new(x, y, radius, color));
    }

    if placed.len() < count {
        log::debug!(
            "Scatter placed {} of {} bodies (seed {})",
            placed.len(),
            count,
            seed
        );
    }

    placed
}

/// Random push for each body, each axis in `[-max_speed, max_speed]`
pub fn random_kicks(count: usize, max_speed: f32, seed: u64) -> Vec<Vec2> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec2::new(
                rng.random_range(-max_speed..=max_speed),
                rng.random_range(-max_speed..=max_speed),
            )
        })
        .collect()
}
