//! Procedural lightning: growth, branching and the fade pipeline.
//!
//! Bolts move through three collections owned by [`crate::Storm`]:
//! active [`Path`]s grow one segment per tick, finished paths freeze into
//! [`CompletedBranch`]es, and on release those become fading [`ResidualBolt`]s.

pub mod geometry;
mod growth;
mod lifecycle;
mod path;

pub use geometry::{normalize_angle, would_backtrack};
pub use growth::grow;
pub use lifecycle::{dissipate, fade_residuals, finalize, finalize_all};
pub use path::{CompletedBranch, Path, ResidualBolt};
