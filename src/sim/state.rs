//! Table state and core simulation types
//!
//! The `Table` is the single owner of every body. Components borrow it
//! mutably for the duration of one operation; nothing holds on to it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ball color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
}

impl Color {
    /// Every color the picker offers, in menu order
    pub const ALL: [Color; 3] = [Color::Red, Color::Blue, Color::Yellow];

    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "yellow" => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Capitalized label for menu buttons
    pub fn label(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
        }
    }
}

/// Stable body identifier.
///
/// Assigned sequentially when the table is built. Bodies are never removed
/// or reordered, so the id is also the body's position in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Also used as the body's mass in collisions
    pub radius: f32,
    pub color: Color,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
        }
    }

    /// Point lies on or inside the disc
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    /// Whether the disc lies fully inside `bound`
    pub fn is_contained(&self, bound: Bound) -> bool {
        self.pos.x >= self.radius
            && self.pos.x <= bound.width - self.radius
            && self.pos.y >= self.radius
            && self.pos.y <= bound.height - self.radius
    }
}

/// Starting placement of one body, as read from a table layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
}

impl BodySpec {
    pub fn new(x: f32, y: f32, radius: f32, color: Color) -> Self {
        Self { x, y, radius, color }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Rectangular surface, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub width: f32,
    pub height: f32,
}

impl Bound {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// All bodies on one surface (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub bound: Bound,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Insertion order, which is also collision iteration order
    bodies: Vec<Body>,
}

impl Table {
    /// Create an empty table. Bodies are added with `add_body` during setup.
    pub fn new(bound: Bound) -> Self {
        Self {
            bound,
            time_ticks: 0,
            bodies: Vec::new(),
        }
    }

    /// Add a resting body and return its id
    pub fn add_body(&mut self, pos: Vec2, radius: f32, color: Color) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body::new(id, pos, radius, color));
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable view for the stepper and collision resolver
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.iter().map(|b| b.id)
    }

    /// Position of a body in iteration order, if the id is known
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        let index = id.index();
        (index < self.bodies.len()).then_some(index)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(self.index_of(id)?)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let index = self.index_of(id)?;
        self.bodies.get_mut(index)
    }

    /// Returns false if the id is unknown
    pub fn set_color(&mut self, id: BodyId, color: Color) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.color = color;
                true
            }
            None => false,
        }
    }

    pub fn set_velocity(&mut self, id: BodyId, vel: Vec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.vel = vel;
                true
            }
            None => false,
        }
    }

    pub fn set_position(&mut self, id: BodyId, pos: Vec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.pos = pos;
                true
            }
            None => false,
        }
    }

    /// First body (in insertion order) whose disc contains `point`.
    ///
    /// Not necessarily the one drawn on top when discs overlap.
    pub fn hit_test(&self, point: Vec2) -> Option<BodyId> {
        self.bodies.iter().find(|b| b.contains(point)).map(|b| b.id)
    }

    /// Sum of radius * speed^2, a kinetic energy proxy for diagnostics
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .map(|b| b.radius * b.vel.length_squared())
            .sum()
    }
}
