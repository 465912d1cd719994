//! Wall collision against the rectangular surface

use super::state::{Body, Bound};
use crate::consts::RESTITUTION;

/// Reflect and clamp a body against the surface edges.
///
/// Each axis is reflected independently when the disc pokes past either
/// edge. Position is then clamped back inside, even if the velocity already
/// points away from the wall. Returns true if any axis was reflected.
pub fn resolve_boundary(body: &mut Body, bound: Bound) -> bool {
    let r = body.radius;
    let mut reflected = false;

    if body.pos.x - r < 0.0 || body.pos.x + r > bound.width {
        body.vel.x *= RESTITUTION;
        reflected = true;
    }
    if body.pos.y - r < 0.0 || body.pos.y + r > bound.height {
        body.vel.y *= RESTITUTION;
        reflected = true;
    }

    if body.pos.x - r < 0.0 {
        body.pos.x = r;
    } else if body.pos.x + r > bound.width {
        body.pos.x = bound.width - r;
    }

    if body.pos.y - r < 0.0 {
        body.pos.y = r;
    } else if body.pos.y + r > bound.height {
        body.pos.y = bound.height - r;
    }

    reflected
}
