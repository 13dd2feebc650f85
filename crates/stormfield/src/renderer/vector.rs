//! Lyon-backed [`Surface`] for GPU hosts.
//!
//! Tessellates every drawing call on the CPU into a flat triangle list of
//! colored vertices, which a WebGPU/WebGL host can upload as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use super::color::Color;
use super::traits::Surface;

/// Per-vertex data: position plus straight RGBA.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color)
    }
}

/// Tessellating surface. Cleared by [`Surface::clear`] at the start of each frame.
pub struct VectorSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
}

impl VectorSurface {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// The triangle list as raw floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw pointer to the flat float buffer (for wasm memory reads).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Flush indexed geometry into the triangle list.
    fn flush_geometry(&mut self) {
        let geometry = &self.geometry;
        self.vertices
            .extend(geometry.indices.iter().map(|idx| geometry.vertices[*idx as usize]));
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

impl Default for VectorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for VectorSurface {
    fn clear(&mut self, _extent: Vec2) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(origin.x, origin.y));
        builder.line_to(point(origin.x + size.x, origin.y));
        builder.line_to(point(origin.x + size.x, origin.y + size.y));
        builder.line_to(point(origin.x, origin.y + size.y));
        builder.close();
        self.fill_path(&builder.build(), color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        let path = builder.build();

        // Canvas defaults: butt caps, miter joins
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(LineCap::Butt)
            .with_line_join(LineJoin::Miter);
        let result = self.stroke_tess.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_rect_produces_two_triangles() {
        let mut surface = VectorSurface::new();
        surface.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Color::BLACK);
        assert_eq!(surface.vertex_count(), 6);
        assert_eq!(surface.as_floats().len(), 6 * VectorVertex::FLOATS);
    }

    #[test]
    fn stroke_carries_color() {
        let mut surface = VectorSurface::new();
        let color = Color::new(0.2, 0.4, 1.0, 0.5);
        surface.stroke_polyline(&[Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)], 3.0, color);
        assert!(surface.vertex_count() >= 6);
        assert!(surface.vertices().iter().all(|v| v.a == 0.5 && v.b == 1.0));
    }

    #[test]
    fn degenerate_calls_emit_nothing() {
        let mut surface = VectorSurface::new();
        surface.stroke_polyline(&[Vec2::ZERO], 3.0, Color::WHITE);
        surface.stroke_polyline(&[Vec2::ZERO, Vec2::ONE], 0.0, Color::WHITE);
        surface.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        assert_eq!(surface.vertex_count(), 0);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut surface = VectorSurface::new();
        surface.fill_circle(Vec2::new(5.0, 5.0), 2.0, Color::WHITE);
        assert!(surface.vertex_count() > 0);
        surface.clear(Vec2::new(10.0, 10.0));
        assert_eq!(surface.vertex_count(), 0);
    }
}
