//! Angle helpers shared by the growth engine.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Wrap an angle into (-PI, PI].
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    }
    if a <= -PI {
        a += TAU;
    }
    a
}

/// True when turning from `current` to `candidate` reverses by more than `threshold` radians.
pub fn would_backtrack(current: f32, candidate: f32, threshold: f32) -> bool {
    normalize_angle(candidate - current).abs() > threshold
}

/// Heading of the segment `from -> to`.
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Heading of the last segment of a polyline, or `fallback` when it has a single point.
pub fn tangent(points: &[Vec2], fallback: f32) -> f32 {
    match points {
        [.., prev, last] => heading(*prev, *last),
        _ => fallback,
    }
}

/// Point `length` units away from `origin` along `angle`.
pub fn advance(origin: Vec2, angle: f32, length: f32) -> Vec2 {
    origin + Vec2::from_angle(angle) * length
}

/// Inclusive containment test against a `[0, width] x [0, height]` extent.
pub fn within_extent(p: Vec2, extent: Vec2) -> bool {
    p.x >= 0.0 && p.x <= extent.x && p.y >= 0.0 && p.y <= extent.y
}
