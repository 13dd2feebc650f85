//! Stage transitions: active -> completed -> residual -> gone.

use log::debug;

use super::path::{CompletedBranch, Path, ResidualBolt};
use crate::api::config::LightningConfig;
use crate::systems::rng::Rng;

/// Freeze a path into a completed branch.
///
/// Paths holding fewer than `min_segments` points are dropped and `false` is returned.
pub fn finalize(path: Path, min_segments: usize, completed: &mut Vec<CompletedBranch>) -> bool {
    if path.segments.len() < min_segments {
        return false;
    }
    completed.push(CompletedBranch::from(path));
    true
}

/// Force-finalize every active path, regardless of its completion state.
pub fn finalize_all(active: &mut Vec<Path>, min_segments: usize, completed: &mut Vec<CompletedBranch>) {
    for mut path in active.drain(..) {
        path.complete = true;
        finalize(path, min_segments, completed);
    }
}

/// Turn every completed branch into a fading residual bolt and empty the completed set.
pub fn dissipate(
    completed: &mut Vec<CompletedBranch>,
    residual: &mut Vec<ResidualBolt>,
    config: &LightningConfig,
    rng: &mut Rng,
) {
    if completed.is_empty() {
        return;
    }
    debug!("dissipating {} branches", completed.len());
    residual.extend(completed.drain(..).map(|branch| {
        let fade_speed = config.fade_speed_min + rng.next_f32() * config.fade_speed_spread;
        ResidualBolt::from_branch(branch, fade_speed)
    }));
}

/// One tick of fading; bolts at or below zero opacity are removed.
pub fn fade_residuals(residual: &mut Vec<ResidualBolt>) {
    residual.retain_mut(|bolt| bolt.fade());
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn path_with(points: usize) -> Path {
        let mut rng = Rng::new(9);
        let mut path = Path::trunk(Vec2::new(10.0, 10.0), &LightningConfig::default(), &mut rng);
        for i in 1..points {
            path.segments.push(Vec2::new(10.0, 10.0 - i as f32));
        }
        path
    }

    #[test]
    fn short_paths_are_discarded() {
        let mut completed = Vec::new();
        assert!(!finalize(path_with(2), 3, &mut completed));
        assert!(completed.is_empty());
        assert!(finalize(path_with(3), 3, &mut completed));
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].segments.len(), 3);
    }

    #[test]
    fn finalize_all_empties_active_set() {
        let mut active = vec![path_with(2), path_with(5), path_with(1)];
        let mut completed = Vec::new();
        finalize_all(&mut active, 3, &mut completed);
        assert!(active.is_empty());
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].segments.len(), 5);
    }

    #[test]
    fn dissipate_moves_everything_to_residual() {
        let config = LightningConfig::default();
        let mut rng = Rng::new(1);
        let mut completed = Vec::new();
        finalize(path_with(4), 3, &mut completed);
        finalize(path_with(6), 3, &mut completed);
        let mut residual = Vec::new();

        dissipate(&mut completed, &mut residual, &config, &mut rng);

        assert!(completed.is_empty());
        assert_eq!(residual.len(), 2);
        for bolt in &residual {
            assert_eq!(bolt.opacity, 1.0);
            assert!(bolt.fade_speed >= config.fade_speed_min);
            assert!(bolt.fade_speed < config.fade_speed_min + config.fade_speed_spread);
        }
    }

    #[test]
    fn residual_removed_on_the_tick_opacity_hits_zero() {
        let branch = CompletedBranch::from(path_with(3));
        let mut residual = vec![ResidualBolt::from_branch(branch, 0.0625)];
        for _ in 0..15 {
            fade_residuals(&mut residual);
            assert_eq!(residual.len(), 1);
        }
        fade_residuals(&mut residual);
        assert!(residual.is_empty());
    }

    #[test]
    fn faster_bolts_leave_first() {
        let a = ResidualBolt::from_branch(CompletedBranch::from(path_with(3)), 0.5);
        let b = ResidualBolt::from_branch(CompletedBranch::from(path_with(3)), 0.125);
        let mut residual = vec![a, b];
        fade_residuals(&mut residual);
        fade_residuals(&mut residual);
        assert_eq!(residual.len(), 1);
        assert_eq!(residual[0].fade_speed, 0.125);
    }
}
