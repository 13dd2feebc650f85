pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::config::{CarouselConfig, LightningConfig, StormConfig};
pub use api::storm::Storm;
pub use crate::core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::{Color, CommandBuffer, DrawCommand, Surface};
pub use systems::carousel::{Carousel, Depth, Slide, SlideLayout};
pub use systems::lightning::{CompletedBranch, Path, ResidualBolt};
pub use systems::rng::Rng;
pub use systems::starfield::{Star, Starfield};

#[cfg(feature = "vectors")]
pub use renderer::{VectorSurface, VectorVertex};
