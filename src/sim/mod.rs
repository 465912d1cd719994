//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - One tick per frame, unit timestep
//! - Seeded RNG only
//! - Stable iteration order (by body id)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod collision;
pub mod scatter;
pub mod state;
pub mod tick;

pub use boundary::resolve_boundary;
pub use collision::{ContactCount, collide_pair, elastic_1d, resolve_collisions};
pub use scatter::{random_kicks, scatter};
pub use state::{Body, BodyId, BodySpec, Bound, Color, Table};
pub use tick::{TickReport, tick};
