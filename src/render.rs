//! Drawing surface abstraction
//!
//! The simulation never draws. Once per frame the session hands the table to
//! `draw_table`, which repaints everything through a `Surface`.

use glam::Vec2;

use crate::sim::state::Table;

/// Minimal 2D painter: filled rectangles and filled circles
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, css_color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, css_color: &str);
}

/// Repaint the background, then every body in table order
pub fn draw_table<S: Surface + ?Sized>(surface: &mut S, table: &Table, background: &str) {
    let bound = table.bound;
    surface.fill_rect(0.0, 0.0, bound.width, bound.height, background);
    for body in table.iter() {
        surface.fill_circle(body.pos, body.radius, body.color.as_str());
    }
}

/// `Surface` backed by a browser `<canvas>` 2D context
#[cfg(target_arch = "wasm32")]
pub struct CanvasSurface {
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl CanvasSurface {
    pub fn new(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Get the 2D context of a canvas element
    pub fn from_canvas(canvas: &web_sys::HtmlCanvasElement) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self::new(ctx))
    }
}

#[cfg(target_arch = "wasm32")]
impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, css_color: &str) {
        self.ctx.set_fill_style_str(css_color);
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, css_color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(css_color);
        self.ctx.fill();
        self.ctx.close_path();
    }
}
