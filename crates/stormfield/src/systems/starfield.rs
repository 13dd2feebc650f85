//! Twinkling, slowly falling background stars.

use glam::Vec2;

use super::rng::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward drift in pixels per tick.
    pub velocity: f32,
    pub alpha: f32,
    /// Scale of the per-tick random alpha walk.
    pub twinkle: f32,
}

impl Star {
    pub const MIN_ALPHA: f32 = 0.1;

    fn random(extent: Vec2, rng: &mut Rng) -> Self {
        Self {
            pos: Vec2::new(rng.next_f32() * extent.x, rng.next_f32() * extent.y),
            radius: rng.next_f32() * 1.5,
            velocity: rng.range_f32(0.01, 0.02),
            alpha: rng.next_f32(),
            twinkle: rng.range_f32(0.1, 0.15),
        }
    }

    /// Drift, twinkle, and wrap back to the top once below `extent.y`.
    pub fn tick(&mut self, extent: Vec2, rng: &mut Rng) {
        self.pos.y += self.velocity;
        self.alpha = (self.alpha + rng.centered(self.twinkle)).clamp(Self::MIN_ALPHA, 1.0);
        if self.pos.y > extent.y {
            self.pos.y = 0.0;
            self.pos.x = rng.next_f32() * extent.x;
        }
    }
}

/// The persistent star set. Stars are never destroyed, only recycled.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, extent: Vec2, rng: &mut Rng) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(extent, rng)).collect(),
        }
    }

    pub fn tick(&mut self, extent: Vec2, rng: &mut Rng) {
        for star in &mut self.stars {
            star.tick(extent, rng);
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
