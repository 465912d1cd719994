//! Billiards - drag-and-flick balls on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, wall bounce, elastic collisions, stepping)
//! - `interaction`: Pointer drag and recolor menu state machine
//! - `render`: Drawing surface abstraction and full-table redraw
//! - `session`: Owned animation session with an explicit stop flag
//! - `config`: Table layout loading and validation

pub mod config;
pub mod error;
pub mod interaction;
pub mod render;
pub mod session;
pub mod sim;

pub use config::{BodySpec, TableConfig};
pub use error::ConfigError;
pub use interaction::{Controller, DragState, RecolorMenu};
pub use session::Session;

/// Simulation constants
pub mod consts {
    /// Velocity multiplier applied on a wall bounce (reverse, keep 80%)
    pub const RESTITUTION: f32 = -0.8;
    /// Per-tick velocity damping
    pub const DAMPING: f32 = 0.99;
    /// Drag displacement is divided by this to get velocity
    pub const DRAG_DIVISOR: f32 = 10.0;
    /// Centers closer than this are treated as coincident (no collision normal)
    pub const MIN_CONTACT_DISTANCE: f32 = 1e-4;

    /// Default surface size
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;
    /// Table felt
    pub const BACKGROUND: &str = "#008000";
}
