//! Drawing surface contract.
//!
//! The engine never touches a canvas directly. Each frame it issues a short
//! list of immediate-mode calls against a [`Surface`]; the browser bridge
//! implements it on a 2D canvas context, and the `vectors` feature provides a
//! tessellating implementation for GPU hosts.

use glam::Vec2;

use super::color::Color;

pub trait Surface {
    /// Reset the surface to transparent over `extent`.
    fn clear(&mut self, extent: Vec2);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke an open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { extent: Vec2 },
    FillRect { origin: Vec2, size: Vec2, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Polyline { points: Vec<Vec2>, width: f32, color: Color },
}

/// A surface that records calls instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded polylines, in draw order.
    pub fn polylines(&self) -> impl Iterator<Item = (&[Vec2], f32, Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polyline { points, width, color } => Some((points.as_slice(), *width, *color)),
            _ => None,
        })
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, extent: Vec2) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { extent });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }
}
