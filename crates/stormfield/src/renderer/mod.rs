pub mod color;
pub mod frame;
pub mod traits;
#[cfg(feature = "vectors")]
pub mod vector;

// Re-export key types for convenient access
pub use color::{palette, Color, StrokePair, Taper};
pub use frame::{compose, draw_bolt, BoltStroke, FrameView, Shade};
pub use traits::{CommandBuffer, DrawCommand, Surface};
#[cfg(feature = "vectors")]
pub use vector::{VectorSurface, VectorVertex};
