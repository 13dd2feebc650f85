//! Per-tick advancement of every active path.
//!
//! Each tick a path either waits (pacing), retires (it was marked complete
//! on an earlier tick), or emits exactly one segment. Emitting may also fork
//! a sibling trunk or spawn a child branch, capped by `max_active_paths`.

use glam::Vec2;
use log::trace;
use std::f32::consts::PI;

use super::geometry::{advance, tangent, within_extent, would_backtrack};
use super::lifecycle;
use super::path::{CompletedBranch, Path};
use crate::api::config::LightningConfig;
use crate::systems::rng::Rng;

/// Outcome of one tick for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Throttled, capped, or grew; the path stays active.
    Continue,
    /// The path was already complete and leaves the active set now.
    Retire,
}

/// Collects paths spawned during a tick while enforcing the active-path cap.
struct Spawner {
    cap: usize,
    live: usize,
    spawned: Vec<Path>,
}

impl Spawner {
    fn new(cap: usize, live: usize) -> Self {
        Self { cap, live, spawned: Vec::new() }
    }

    fn has_room(&self) -> bool {
        self.live + self.spawned.len() < self.cap
    }

    fn spawn(&mut self, make: impl FnOnce() -> Path) {
        if self.has_room() {
            self.spawned.push(make());
        } else {
            trace!("active path cap ({}) reached, spawn skipped", self.cap);
        }
    }
}

/// Advance all active paths by one tick.
///
/// Retired paths are frozen into `completed` (or discarded when too short).
/// Paths spawned this tick are appended to `active` and start growing next tick.
pub fn grow(
    active: &mut Vec<Path>,
    completed: &mut Vec<CompletedBranch>,
    config: &LightningConfig,
    extent: Vec2,
    rng: &mut Rng,
) {
    let paths = std::mem::take(active);
    let mut spawner = Spawner::new(config.max_active_paths, paths.len());
    let mut kept = Vec::with_capacity(paths.len());

    for mut path in paths {
        match step(&mut path, &mut spawner, config, extent, rng) {
            Step::Continue => kept.push(path),
            Step::Retire => {
                spawner.live -= 1;
                lifecycle::finalize(path, config.min_branch_segments, completed);
            }
        }
    }

    kept.append(&mut spawner.spawned);
    *active = kept;
}

fn step(
    path: &mut Path,
    spawner: &mut Spawner,
    config: &LightningConfig,
    extent: Vec2,
    rng: &mut Rng,
) -> Step {
    path.frame_counter += 1;
    if path.frame_counter < config.frames_per_segment {
        return Step::Continue;
    }
    path.frame_counter = 0;

    if path.complete {
        return Step::Retire;
    }

    // Finalized on the next tick, like any other completion
    if path.at_cap() {
        path.complete = true;
        return Step::Continue;
    }

    if path.main_trunk
        && path.len() > config.split_min_segments
        && rng.chance(path.split_probability)
    {
        spawner.spawn(|| path.split(rng));
    }

    path.sharp_turn_counter += 1;
    let sharp = rng.chance(config.sharp_turn_probability)
        && path.sharp_turn_counter > config.sharp_turn_gap;

    let heading = if sharp {
        path.sharp_turn_counter = 0;
        sharp_turn(path, config, rng)
    } else {
        path.angle += (path.target_angle - path.angle) * config.heading_correction;
        path.angle + rng.centered(path.jitter) + rng.centered(path.meander)
    };

    let next = advance(path.position, heading, path.segment_length);
    path.segments.push(next);
    path.position = next;
    path.angle = heading;
    path.last_direction = heading;

    if path.level <= config.branch_max_level
        && path.len() > config.branch_min_segments
        && rng.chance(path.branch_probability)
    {
        spawner.spawn(|| path.branch(rng));
    }

    if !within_extent(next, extent) {
        path.complete = true;
    }

    Step::Continue
}

/// Zig-zag heading: roughly perpendicular to the local tangent, halved if it would double back.
fn sharp_turn(path: &Path, config: &LightningConfig, rng: &mut Rng) -> f32 {
    let sign = rng.sign();
    let amount = PI / 2.0 * rng.range_f32(0.6, 1.1);

    if path.len() < 2 {
        return path.target_angle + sign * amount;
    }

    let current = tangent(&path.segments, path.angle);
    let candidate = current + sign * amount;
    if would_backtrack(path.last_direction, candidate, config.backtrack_threshold) {
        current + sign * amount * 0.5
    } else {
        candidate
    }
}
