//! Pairwise elastic collisions between balls
//!
//! Each contact is solved on its own along the line of centers, with the
//! radius standing in for mass. Overlap is tested at the current positions
//! only, so a fast ball can tunnel through a small one in a single tick.

use glam::Vec2;

use super::state::Body;
use crate::consts::MIN_CONTACT_DISTANCE;

/// Outcome of resolving one body against the rest of the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactCount {
    /// Overlapping pairs whose velocities were exchanged
    pub resolved: u32,
    /// Overlapping pairs skipped because the centers coincide
    pub coincident: u32,
}

/// 1D elastic collision along the normal, masses `m1`, `m2`.
///
/// Returns the outgoing normal velocities `(v1', v2')`.
#[inline]
pub fn elastic_1d(m1: f32, v1: f32, m2: f32, v2: f32) -> (f32, f32) {
    let total = m1 + m2;
    let v1_out = ((m1 - m2) * v1 + 2.0 * m2 * v2) / total;
    let v2_out = (2.0 * m1 * v1 + (m2 - m1) * v2) / total;
    (v1_out, v2_out)
}

/// Exchange velocities of two overlapping bodies along the line of centers.
///
/// `normal` is the unit vector from `a` to `b`. Tangential components
/// pass through unchanged.
pub fn collide_pair(a: &mut Body, b: &mut Body, normal: Vec2) {
    // Collision frame: x along the normal, y along the tangent
    let tangent = normal.perp();

    let (va_n, va_t) = (a.vel.dot(normal), a.vel.dot(tangent));
    let (vb_n, vb_t) = (b.vel.dot(normal), b.vel.dot(tangent));

    let (va_n, vb_n) = elastic_1d(a.radius, va_n, b.radius, vb_n);

    a.vel = normal * va_n + tangent * va_t;
    b.vel = normal * vb_n + tangent * vb_t;
}

/// Resolve every overlap between the body at `index` and all other bodies.
///
/// Contacts are solved one after another in table order, so a body touching
/// two others ends up with the velocity from the last contact. Positions are
/// not corrected; overlapping balls keep overlapping until their new
/// velocities separate them.
pub fn resolve_collisions(bodies: &mut [Body], index: usize) -> ContactCount {
    let mut count = ContactCount::default();

    for other in 0..bodies.len() {
        if other == index {
            continue;
        }

        let (current, other_body) = pair_mut(bodies, index, other);
        let offset = other_body.pos - current.pos;
        let distance = offset.length();

        if !distance.is_finite() {
            // A lost position has no direction to push along
            log::debug!(
                "Skipping bodies {} and {} with non-finite separation",
                current.id.0,
                other_body.id.0
            );
            continue;
        }

        if distance >= current.radius + other_body.radius {
            continue;
        }

        if distance < MIN_CONTACT_DISTANCE {
            // No usable normal; leave both untouched this tick
            log::debug!(
                "Skipping coincident bodies {} and {}",
                current.id.0,
                other_body.id.0
            );
            count.coincident += 1;
            continue;
        }

        collide_pair(current, other_body, offset / distance);
        count.resolved += 1;
    }

    count
}

/// Borrow two distinct elements mutably
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
