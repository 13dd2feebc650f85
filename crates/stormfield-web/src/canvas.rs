use std::f64::consts::TAU;

use stormfield::glam::Vec2;
use stormfield::{Color, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    /// Resize the backing store. Clears the canvas as a side effect.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, extent: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, extent.x as f64, extent.y as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        // arc() only fails on a negative radius
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill();
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}
