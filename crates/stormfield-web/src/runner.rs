use stormfield::{InputEvent, InputQueue, Storm, StormConfig};
#[cfg(feature = "vectors")]
use stormfield::VectorSurface;

use crate::canvas::CanvasSurface;

/// Wires the engine loop to a canvas.
///
/// The page creates one runner in a `thread_local!` and drives it through the
/// free functions exported from the crate root, because wasm-bindgen cannot
/// export the engine's borrowing API directly.
pub struct StormRunner {
    storm: Storm,
    input: InputQueue,
    surface: CanvasSurface,
    #[cfg(feature = "vectors")]
    vectors: VectorSurface,
}

impl StormRunner {
    pub fn new(config: StormConfig, surface: CanvasSurface) -> Self {
        let storm = Storm::new(config, surface.width(), surface.height());
        Self {
            storm,
            input: InputQueue::new(),
            surface,
            #[cfg(feature = "vectors")]
            vectors: VectorSurface::new(),
        }
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Resize the canvas now and let the engine pick it up next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.push_input(InputEvent::Resize {
            width: width as f32,
            height: height as f32,
        });
    }

    /// Run one display frame: apply queued input, step the simulation, draw.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.storm.handle_input(event);
        }
        self.storm.advance(dt);
        self.storm.render(&mut self.surface);
    }

    pub fn storm(&self) -> &Storm {
        &self.storm
    }

    // ---- Vector output for GPU hosts ----

    /// Re-tessellate the current frame into the vertex buffer.
    #[cfg(feature = "vectors")]
    pub fn tessellate(&mut self) {
        self.storm.render(&mut self.vectors);
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }
}
