//! Frame composition: draw order and the shared glow/core stroke rule.

use glam::Vec2;

use super::color::{palette, Color, CORE_TAPER, GLOW_TAPER};
use super::traits::Surface;
use crate::systems::lightning::{CompletedBranch, Path, ResidualBolt};
use crate::systems::starfield::Starfield;

/// How a bolt's stroke alpha is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shade {
    /// Keep the palette's own alpha.
    Palette,
    /// Core alpha = k * 0.9, glow alpha = k * 0.5.
    Scaled(f32),
}

/// Everything the renderer needs to stroke one bolt, whatever stage it is in.
#[derive(Debug, Clone, Copy)]
pub struct BoltStroke<'a> {
    pub points: &'a [Vec2],
    pub level: u8,
    pub main_trunk: bool,
    /// Multiplies both stroke widths.
    pub scale: f32,
    pub shade: Shade,
}

impl<'a> From<&'a Path> for BoltStroke<'a> {
    fn from(path: &'a Path) -> Self {
        Self {
            points: &path.segments,
            level: path.level,
            main_trunk: path.main_trunk,
            scale: path.intensity,
            shade: Shade::Scaled(path.intensity),
        }
    }
}

impl<'a> From<&'a CompletedBranch> for BoltStroke<'a> {
    fn from(branch: &'a CompletedBranch) -> Self {
        Self {
            points: &branch.segments,
            level: branch.level,
            main_trunk: branch.main_trunk,
            scale: branch.intensity,
            shade: Shade::Palette,
        }
    }
}

impl<'a> From<&'a ResidualBolt> for BoltStroke<'a> {
    fn from(bolt: &'a ResidualBolt) -> Self {
        Self {
            points: &bolt.segments,
            level: bolt.level,
            main_trunk: bolt.main_trunk,
            scale: bolt.opacity,
            shade: Shade::Scaled(bolt.opacity),
        }
    }
}

/// Stroke a bolt twice: a wide dim glow, then a narrow bright core.
pub fn draw_bolt<S: Surface + ?Sized>(surface: &mut S, stroke: BoltStroke<'_>) {
    if stroke.points.len() < 2 {
        return;
    }
    let pair = palette(stroke.level);
    let (glow, core) = match stroke.shade {
        Shade::Palette => (pair.glow, pair.core),
        Shade::Scaled(k) => (pair.glow.with_alpha(k * 0.5), pair.core.with_alpha(k * 0.9)),
    };
    surface.stroke_polyline(
        stroke.points,
        GLOW_TAPER.width(stroke.level, stroke.main_trunk, stroke.scale),
        glow,
    );
    surface.stroke_polyline(
        stroke.points,
        CORE_TAPER.width(stroke.level, stroke.main_trunk, stroke.scale),
        core,
    );
}

pub fn draw_stars<S: Surface + ?Sized>(surface: &mut S, starfield: &Starfield) {
    for star in &starfield.stars {
        surface.fill_circle(star.pos, star.radius, Color::WHITE.with_alpha(star.alpha));
    }
}

/// Borrowed view of everything drawn in a frame.
pub struct FrameView<'a> {
    pub extent: Vec2,
    pub starfield: &'a Starfield,
    pub completed: &'a [CompletedBranch],
    pub active: &'a [Path],
    pub residual: &'a [ResidualBolt],
}

/// Draw one frame: background, stars, frozen branches, growing paths, then fading bolts on top.
pub fn compose<S: Surface + ?Sized>(surface: &mut S, frame: &FrameView<'_>) {
    surface.clear(frame.extent);
    surface.fill_rect(Vec2::ZERO, frame.extent, Color::BLACK);
    draw_stars(surface, frame.starfield);
    for branch in frame.completed {
        draw_bolt(surface, branch.into());
    }
    for path in frame.active {
        draw_bolt(surface, path.into());
    }
    for bolt in frame.residual {
        draw_bolt(surface, bolt.into());
    }
}
