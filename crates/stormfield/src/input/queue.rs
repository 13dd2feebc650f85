/// Pointer and viewport events, in canvas pixels with the origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The engagement button went down.
    PointerDown { x: f32, y: f32 },
    /// The engagement button came up.
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// The canvas changed size.
    Resize { width: f32, height: f32 },
}

/// Events collected between frames.
///
/// Only the latest position matters to the storm, so a move that directly
/// follows another move replaces it instead of queueing behind it.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { pending: Vec::with_capacity(16) }
    }

    pub fn push(&mut self, event: InputEvent) {
        if let (InputEvent::PointerMove { .. }, Some(InputEvent::PointerMove { .. })) =
            (event, self.pending.last())
        {
            self.pending.pop();
        }
        self.pending.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
