//! Pointer interaction: drag to flick, click to recolor
//!
//! The controller only ever writes velocity (and color). Positions change
//! through the regular tick, never directly from a pointer event.

use glam::Vec2;

use crate::consts::DRAG_DIVISOR;
use crate::sim::state::{BodyId, Color, Table};

/// Drag state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// A body is grabbed; `anchor` is the last pointer sample
    Dragging { id: BodyId, anchor: Vec2 },
}

/// Color picker shown next to a clicked body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecolorMenu {
    /// Body that will receive the chosen color
    pub target: BodyId,
    /// Its color right now, for highlighting in the picker
    pub current: Color,
    /// Where the click landed, in surface coordinates
    pub anchor: Vec2,
}

/// Pointer state for one surface
#[derive(Debug, Clone)]
pub struct Controller {
    drag: DragState,
    menu: Option<RecolorMenu>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
            menu: None,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Body currently grabbed, if any
    pub fn grabbed(&self) -> Option<BodyId> {
        match self.drag {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn menu(&self) -> Option<&RecolorMenu> {
        self.menu.as_ref()
    }

    /// Grab the first body under `pos` and stop it dead.
    ///
    /// Misses leave the controller (and every body) untouched.
    pub fn pointer_down(&mut self, table: &mut Table, pos: Vec2) -> Option<BodyId> {
        let id = table.hit_test(pos)?;
        table.set_velocity(id, Vec2::ZERO);
        self.drag = DragState::Dragging { id, anchor: pos };
        log::debug!("Grabbed body {} at ({:.1}, {:.1})", id.0, pos.x, pos.y);
        Some(id)
    }

    /// Set the grabbed body's velocity from movement since the last sample.
    ///
    /// Returns true if a body was updated (the caller should keep animating).
    pub fn pointer_move(&mut self, table: &mut Table, pos: Vec2) -> bool {
        let DragState::Dragging { id, anchor } = self.drag else {
            return false;
        };

        let delta = pos - anchor;
        table.set_velocity(id, delta / DRAG_DIVISOR);
        self.drag = DragState::Dragging { id, anchor: pos };
        true
    }

    /// Release whatever is grabbed. Safe to call when idle.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging { id, .. } = self.drag {
            log::debug!("Released body {}", id.0);
        }
        self.drag = DragState::Idle;
    }

    /// Open the color picker for the body under `pos`, or close it on a miss.
    ///
    /// Independent of drag state.
    pub fn select_for_recolor(&mut self, table: &Table, pos: Vec2) -> Option<&RecolorMenu> {
        self.menu = table.hit_test(pos).and_then(|target| {
            let body = table.get(target)?;
            Some(RecolorMenu {
                target,
                current: body.color,
                anchor: pos,
            })
        });
        self.menu.as_ref()
    }

    /// Apply a picker choice to the menu's target. The menu stays open.
    ///
    /// Returns false when no menu is open.
    pub fn choose_color(&mut self, table: &mut Table, color: Color) -> bool {
        let Some(menu) = self.menu.as_mut() else {
            return false;
        };
        if !recolor(table, menu.target, color) {
            return false;
        }
        menu.current = color;
        true
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }
}

/// Set one body's color. Returns false for an unknown id.
pub fn recolor(table: &mut Table, id: BodyId, color: Color) -> bool {
    let changed = table.set_color(id, color);
    if changed {
        log::info!("Body {} recolored to {}", id.0, color.as_str());
    }
    changed
}
