//! The three stages a bolt goes through: a growing [`Path`], a frozen
//! [`CompletedBranch`], and a fading [`ResidualBolt`].
//!
//! Each stage converts into the next by value. Nothing is shared between
//! stages, so a frozen branch never sees later edits to the path it came from.

use glam::Vec2;
use std::f32::consts::PI;

use super::geometry::tangent;
use crate::api::config::LightningConfig;
use crate::systems::rng::Rng;

/// A still-growing chain of segments.
#[derive(Debug, Clone)]
pub struct Path {
    /// Points visited so far; append-only while the path is active.
    pub segments: Vec<Vec2>,
    pub position: Vec2,
    /// Heading used for the last emitted segment.
    pub angle: f32,
    /// Heading the path keeps steering back toward. Fixed for the path's lifetime.
    pub target_angle: f32,
    pub last_direction: f32,
    /// 0 = trunk, 1 = secondary, 2+ = tertiary.
    pub level: u8,
    pub main_trunk: bool,
    pub intensity: f32,
    pub branch_probability: f32,
    pub split_probability: f32,
    pub segment_length: f32,
    pub jitter: f32,
    pub meander: f32,
    pub max_segments: Option<usize>,
    pub frame_counter: u32,
    pub sharp_turn_counter: u32,
    pub complete: bool,
}

impl Path {
    fn rooted(origin: Vec2, angle: f32) -> Self {
        Self {
            segments: vec![origin],
            position: origin,
            angle,
            target_angle: angle,
            last_direction: angle,
            level: 0,
            main_trunk: true,
            intensity: 1.0,
            branch_probability: 0.0,
            split_probability: 0.0,
            segment_length: 0.0,
            jitter: 0.0,
            meander: 0.0,
            max_segments: None,
            frame_counter: 0,
            sharp_turn_counter: 0,
            complete: false,
        }
    }

    /// A fresh main trunk at `origin`, heading up within +-30 degrees.
    pub fn trunk(origin: Vec2, config: &LightningConfig, rng: &mut Rng) -> Self {
        let angle = -PI / 2.0 + rng.range_f32(-PI / 6.0, PI / 6.0);
        Self {
            branch_probability: config.branch_probability,
            split_probability: config.major_split_probability,
            segment_length: config.trunk_segment_length
                + rng.next_f32() * config.trunk_segment_length_jitter,
            jitter: config.trunk_jitter,
            meander: config.trunk_meander,
            ..Self::rooted(origin, angle)
        }
    }

    /// A sibling trunk forking from this path's tip at 30-52.5 degrees off the local tangent.
    pub fn split(&self, rng: &mut Rng) -> Self {
        let base = tangent(&self.segments, self.angle);
        let angle = base + rng.sign() * (PI / 6.0 + rng.next_f32() * PI / 8.0);
        Self {
            intensity: self.intensity * 0.9,
            branch_probability: self.branch_probability * 0.8,
            split_probability: self.split_probability * 0.5,
            segment_length: self.segment_length * 0.9,
            jitter: self.jitter,
            meander: self.meander,
            ..Self::rooted(self.position, angle)
        }
    }

    /// A child branch one level deeper, leaving the tip at a sharp angle.
    pub fn branch(&self, rng: &mut Rng) -> Self {
        let base = tangent(&self.segments, self.angle);
        let offset = if self.level == 0 {
            PI / 3.0 + rng.next_f32() * PI / 5.0
        } else {
            PI / 4.0 + rng.next_f32() * PI / 6.0
        };
        let max_segments = match self.level {
            0 => rng.range_usize(15, 24),
            1 => rng.range_usize(8, 14),
            _ => rng.range_usize(4, 7),
        };
        Self {
            level: self.level + 1,
            main_trunk: false,
            intensity: self.intensity * 0.8,
            branch_probability: self.branch_probability * 0.5,
            segment_length: (self.segment_length * 0.8).max(3.0),
            jitter: self.jitter * 1.3,
            meander: self.meander * 1.1,
            max_segments: Some(max_segments),
            ..Self::rooted(self.position, base + rng.sign() * offset)
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True once the optional segment cap has been reached.
    pub fn at_cap(&self) -> bool {
        self.max_segments.is_some_and(|cap| self.segments.len() >= cap)
    }
}

/// A finished path, drawn unfaded until the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedBranch {
    pub segments: Vec<Vec2>,
    pub level: u8,
    pub intensity: f32,
    pub main_trunk: bool,
}

impl From<Path> for CompletedBranch {
    fn from(path: Path) -> Self {
        Self {
            segments: path.segments,
            level: path.level,
            intensity: path.intensity,
            main_trunk: path.main_trunk,
        }
    }
}

/// A released bolt fading out.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualBolt {
    pub segments: Vec<Vec2>,
    pub level: u8,
    pub intensity: f32,
    pub main_trunk: bool,
    /// 1.0 at release, removed once it reaches zero.
    pub opacity: f32,
    /// Opacity lost per tick.
    pub fade_speed: f32,
}

impl ResidualBolt {
    pub fn from_branch(branch: CompletedBranch, fade_speed: f32) -> Self {
        Self {
            segments: branch.segments,
            level: branch.level,
            intensity: branch.intensity,
            main_trunk: branch.main_trunk,
            opacity: 1.0,
            fade_speed,
        }
    }

    /// Apply one tick of fading. Returns false once the bolt is fully transparent.
    pub fn fade(&mut self) -> bool {
        self.opacity -= self.fade_speed;
        self.opacity > 0.0
    }
}
