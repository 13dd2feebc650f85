//! Structured colors and the per-level lightning palette.

/// RGBA color, channels in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 0-255 channels plus a 0.0 - 1.0 alpha.
    pub const fn rgb8a(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Same color with the alpha channel replaced (clamped to 0.0 - 1.0).
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// CSS `rgba(...)` string for canvas stroke/fill styles.
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0),
        )
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Core + glow colors for one bolt level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePair {
    pub core: Color,
    pub glow: Color,
}

pub const TRUNK: StrokePair = StrokePair {
    core: Color::rgb8a(235, 235, 255, 0.95),
    glow: Color::rgb8a(150, 150, 255, 0.6),
};

pub const SECONDARY: StrokePair = StrokePair {
    core: Color::rgb8a(210, 210, 255, 0.85),
    glow: Color::rgb8a(130, 130, 255, 0.5),
};

pub const TERTIARY: StrokePair = StrokePair {
    core: Color::rgb8a(180, 180, 255, 0.75),
    glow: Color::rgb8a(120, 110, 255, 0.4),
};

/// Palette for a bolt level; everything past level 1 shares the dimmest pair.
pub fn palette(level: u8) -> StrokePair {
    match level {
        0 => TRUNK,
        1 => SECONDARY,
        _ => TERTIARY,
    }
}

/// Line width model: a base width that shrinks per level, faster for branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Taper {
    pub base: f32,
    pub trunk_falloff: f32,
    pub branch_falloff: f32,
}

impl Taper {
    pub fn width(&self, level: u8, main_trunk: bool, scale: f32) -> f32 {
        let falloff = if main_trunk { self.trunk_falloff } else { self.branch_falloff };
        ((self.base - level as f32 * falloff) * scale).max(0.0)
    }
}

pub const GLOW_TAPER: Taper = Taper { base: 3.94, trunk_falloff: 0.28, branch_falloff: 1.13 };
pub const CORE_TAPER: Taper = Taper { base: 2.25, trunk_falloff: 0.17, branch_falloff: 0.56 };
