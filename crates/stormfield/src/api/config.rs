use serde::{Deserialize, Serialize};

/// Top-level engine configuration.
///
/// Every field has a default, so a partial JSON document (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Seed for the engine RNG.
    pub seed: u64,
    /// Number of background stars.
    pub star_count: usize,
    pub lightning: LightningConfig,
    pub carousel: CarouselConfig,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            seed: 0x5EED,
            star_count: 300,
            lightning: LightningConfig::default(),
            carousel: CarouselConfig::default(),
        }
    }
}

/// Tuning for bolt growth, branching and fading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightningConfig {
    /// Minimum time between two trunk starts, in seconds.
    pub cooldown_secs: f32,
    /// Hard cap on simultaneously growing paths.
    pub max_active_paths: usize,
    /// Ticks between two segment emissions of the same path.
    pub frames_per_segment: u32,
    /// Per-segment chance of spawning a child branch (trunk value).
    pub branch_probability: f32,
    /// Per-segment chance of a trunk forking into a sibling trunk.
    pub major_split_probability: f32,
    /// Per-segment chance of a zig-zag turn.
    pub sharp_turn_probability: f32,
    /// A sharp turn needs the cooldown counter to exceed this.
    pub sharp_turn_gap: u32,
    pub trunk_segment_length: f32,
    /// Extra random length in [0, jitter) added to the trunk segment length.
    pub trunk_segment_length_jitter: f32,
    pub trunk_jitter: f32,
    pub trunk_meander: f32,
    /// Fraction of the gap to the target heading closed on each normal step.
    pub heading_correction: f32,
    /// Trunks may split only once they hold more than this many points.
    pub split_min_segments: usize,
    /// Paths may branch only once they hold more than this many points.
    pub branch_min_segments: usize,
    /// Deepest level that may still spawn branches.
    pub branch_max_level: u8,
    /// Paths shorter than this are discarded instead of frozen.
    pub min_branch_segments: usize,
    /// Turns reversing the last heading by more than this (radians) are halved.
    pub backtrack_threshold: f32,
    pub fade_speed_min: f32,
    pub fade_speed_spread: f32,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 0.8,
            max_active_paths: 24,
            frames_per_segment: 1,
            branch_probability: 0.1,
            major_split_probability: 0.01,
            sharp_turn_probability: 0.13,
            sharp_turn_gap: 6,
            trunk_segment_length: 9.9,
            trunk_segment_length_jitter: 3.0,
            trunk_jitter: 1.0,
            trunk_meander: 0.45,
            heading_correction: 0.15,
            split_min_segments: 8,
            branch_min_segments: 4,
            branch_max_level: 1,
            min_branch_segments: 3,
            backtrack_threshold: std::f32::consts::PI * 0.6,
            fade_speed_min: 0.015_258_789_062_5,
            fade_speed_spread: 0.015_258_789_062_5,
        }
    }
}

/// Tuning for the auto-scrolling image carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Scroll speed in pixels per frame.
    pub speed: f32,
    /// Gap between images in pixels.
    pub gap: f32,
    /// Delay before a released touch resumes scrolling, in seconds.
    pub touch_resume_secs: f32,
    /// Full span of the random vertical offset (centered on zero).
    pub jitter_y: f32,
    /// Full span of the random rotation in degrees (centered on zero).
    pub jitter_rotation_deg: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            gap: 48.0,
            touch_resume_secs: 1.0,
            jitter_y: 60.0,
            jitter_rotation_deg: 8.0,
        }
    }
}

impl StormConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp out-of-range values into something the engine can run with.
    pub fn sanitized(mut self) -> Self {
        if !(self.fixed_dt > 0.0) {
            self.fixed_dt = 1.0 / 60.0;
        }
        let l = &mut self.lightning;
        l.max_active_paths = l.max_active_paths.max(1);
        l.frames_per_segment = l.frames_per_segment.max(1);
        l.branch_probability = l.branch_probability.clamp(0.0, 1.0);
        l.major_split_probability = l.major_split_probability.clamp(0.0, 1.0);
        l.sharp_turn_probability = l.sharp_turn_probability.clamp(0.0, 1.0);
        l.heading_correction = l.heading_correction.clamp(0.0, 1.0);
        l.cooldown_secs = l.cooldown_secs.max(0.0);
        l.trunk_segment_length = l.trunk_segment_length.max(0.0);
        l.trunk_segment_length_jitter = l.trunk_segment_length_jitter.max(0.0);
        l.fade_speed_min = l.fade_speed_min.max(0.0);
        l.fade_speed_spread = l.fade_speed_spread.max(0.0);
        let c = &mut self.carousel;
        c.speed = c.speed.max(0.0);
        c.gap = c.gap.max(0.0);
        c.touch_resume_secs = c.touch_resume_secs.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = StormConfig::from_json("{}").unwrap();
        assert_eq!(config, StormConfig::default());
    }

    #[test]
    fn partial_json_overrides_nested_field() {
        let json = r#"{
            "star_count": 50,
            "lightning": { "max_active_paths": 4 }
        }"#;
        let config = StormConfig::from_json(json).unwrap();
        assert_eq!(config.star_count, 50);
        assert_eq!(config.lightning.max_active_paths, 4);
        assert_eq!(config.lightning.branch_probability, 0.1);
        assert_eq!(config.carousel.gap, 48.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(StormConfig::from_json("{ star_count: ").is_err());
    }

    #[test]
    fn sanitized_clamps_bad_values() {
        let mut config = StormConfig::default();
        config.fixed_dt = 0.0;
        config.lightning.max_active_paths = 0;
        config.lightning.frames_per_segment = 0;
        config.lightning.branch_probability = 3.0;
        config.carousel.speed = -1.0;

        let config = config.sanitized();
        assert!(config.fixed_dt > 0.0);
        assert_eq!(config.lightning.max_active_paths, 1);
        assert_eq!(config.lightning.frames_per_segment, 1);
        assert_eq!(config.lightning.branch_probability, 1.0);
        assert_eq!(config.carousel.speed, 0.0);
    }

    #[test]
    fn round_trips_through_json() {
        let config = StormConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(StormConfig::from_json(&json).unwrap(), config);
    }
}
