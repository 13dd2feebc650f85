use glam::Vec2;
use log::{debug, info};

use crate::api::config::StormConfig;
use crate::core::time::FixedTimestep;
use crate::input::queue::InputEvent;
use crate::renderer::frame::{compose, FrameView};
use crate::renderer::traits::Surface;
use crate::systems::lightning::{self, CompletedBranch, Path, ResidualBolt};
use crate::systems::rng::Rng;
use crate::systems::starfield::Starfield;

/// The whole background effect: stars, growing bolts, frozen branches and fading residue,
/// plus the pointer session that drives them.
///
/// Single-threaded by construction: input is applied between ticks, and
/// [`Storm::tick`] runs growth, lifecycle and fading to completion.
pub struct Storm {
    config: StormConfig,
    extent: Vec2,
    rng: Rng,
    timestep: FixedTimestep,
    /// Simulated seconds since creation.
    clock: f64,
    last_trunk_at: Option<f64>,
    pointer: Vec2,
    engaged: bool,
    starfield: Starfield,
    active: Vec<Path>,
    completed: Vec<CompletedBranch>,
    residual: Vec<ResidualBolt>,
}

impl Storm {
    pub fn new(config: StormConfig, width: f32, height: f32) -> Self {
        let config = config.sanitized();
        let extent = Vec2::new(width, height);
        let mut rng = Rng::new(config.seed);
        let starfield = Starfield::new(config.star_count, extent, &mut rng);
        info!("storm: {}x{} canvas, {} stars", width, height, starfield.len());

        Self {
            timestep: FixedTimestep::new(config.fixed_dt),
            config,
            extent,
            rng,
            clock: 0.0,
            last_trunk_at: None,
            pointer: Vec2::ZERO,
            engaged: false,
            starfield,
            active: Vec::new(),
            completed: Vec::new(),
            residual: Vec::new(),
        }
    }

    /// Apply one input event immediately.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.move_pointer(Vec2::new(x, y)),
            InputEvent::PointerDown { x, y } => {
                self.move_pointer(Vec2::new(x, y));
                self.press();
            }
            InputEvent::PointerUp { x, y } => {
                self.move_pointer(Vec2::new(x, y));
                self.release();
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    pub fn move_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Start a session: drop the previous gesture's frozen branches and try to grow a trunk.
    pub fn press(&mut self) {
        self.engaged = true;
        self.completed.clear();
        self.try_start_trunk();
    }

    /// End the session: freeze everything still growing and let it all fade.
    pub fn release(&mut self) {
        self.engaged = false;
        let l = &self.config.lightning;
        lightning::finalize_all(&mut self.active, l.min_branch_segments, &mut self.completed);
        lightning::dissipate(&mut self.completed, &mut self.residual, l, &mut self.rng);
        debug!("storm: released, {} bolts fading", self.residual.len());
    }

    /// Track a new canvas size. Existing stars and bolts keep their absolute coordinates.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.extent = Vec2::new(width, height);
    }

    /// Start a trunk at the pointer if the cooldown has elapsed and there is room.
    /// Returns whether a trunk was created.
    pub fn try_start_trunk(&mut self) -> bool {
        let l = &self.config.lightning;
        if !self.cooldown_elapsed() || self.active.len() >= l.max_active_paths {
            return false;
        }
        let trunk = Path::trunk(self.pointer, l, &mut self.rng);
        debug!(
            "storm: trunk at ({:.0}, {:.0}) heading {:.2} rad",
            self.pointer.x, self.pointer.y, trunk.angle
        );
        self.active.push(trunk);
        self.last_trunk_at = Some(self.clock);
        true
    }

    fn cooldown_elapsed(&self) -> bool {
        self.last_trunk_at
            .map_or(true, |t| self.clock - t > self.config.lightning.cooldown_secs as f64)
    }

    /// Run one fixed step: stars, growth, automatic re-strike while held, fading.
    pub fn tick(&mut self) {
        self.clock += self.timestep.dt() as f64;
        self.starfield.tick(self.extent, &mut self.rng);

        lightning::grow(
            &mut self.active,
            &mut self.completed,
            &self.config.lightning,
            self.extent,
            &mut self.rng,
        );

        if self.engaged && self.active.is_empty() {
            self.try_start_trunk();
        }

        lightning::fade_residuals(&mut self.residual);
    }

    /// Feed a variable frame delta (seconds); runs as many fixed ticks as it covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.tick();
        }
        steps
    }

    /// Draw the current state. Does not mutate anything.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        compose(surface, &FrameView {
            extent: self.extent,
            starfield: &self.starfield,
            completed: &self.completed,
            active: &self.active,
            residual: &self.residual,
        });
    }

    pub fn config(&self) -> &StormConfig {
        &self.config
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Simulated seconds since creation.
    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn active(&self) -> &[Path] {
        &self.active
    }

    pub fn completed(&self) -> &[CompletedBranch] {
        &self.completed
    }

    pub fn residual(&self) -> &[ResidualBolt] {
        &self.residual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::LightningConfig;
    use crate::renderer::traits::{CommandBuffer, DrawCommand};
    use std::f32::consts::PI;

    /// No stochastic forks, so bolt counts are predictable.
    fn calm() -> StormConfig {
        StormConfig {
            star_count: 20,
            lightning: LightningConfig {
                branch_probability: 0.0,
                major_split_probability: 0.0,
                sharp_turn_probability: 0.0,
                ..LightningConfig::default()
            },
            ..StormConfig::default()
        }
    }

    fn storm() -> Storm {
        Storm::new(calm(), 800.0, 600.0)
    }

    #[test]
    fn press_creates_one_upward_trunk() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 100.0, y: 500.0 });

        assert!(s.is_engaged());
        assert_eq!(s.active().len(), 1);
        let trunk = &s.active()[0];
        assert!(trunk.main_trunk);
        assert_eq!(trunk.level, 0);
        assert_eq!(trunk.segments[0], Vec2::new(100.0, 500.0));
        assert!((trunk.angle + PI / 2.0).abs() <= PI / 6.0 + 1e-6);
    }

    #[test]
    fn release_turns_grown_trunk_into_one_residual_bolt() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        for _ in 0..4 {
            s.tick();
        }
        assert_eq!(s.active()[0].len(), 5);

        s.handle_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        assert!(s.active().is_empty());
        assert!(s.completed().is_empty());
        assert_eq!(s.residual().len(), 1);
        assert_eq!(s.residual()[0].opacity, 1.0);
        assert_eq!(s.residual()[0].segments.len(), 5);
    }

    #[test]
    fn quick_release_leaves_nothing_behind() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        s.tick();
        assert_eq!(s.active()[0].len(), 2);
        s.handle_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        assert!(s.residual().is_empty());
        assert!(s.active().is_empty());
    }

    #[test]
    fn cooldown_gates_new_trunks() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        s.handle_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        for _ in 0..10 {
            s.tick();
        }
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        assert!(s.active().is_empty(), "still cooling down");
        s.handle_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });

        for _ in 0..60 {
            s.tick();
        }
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        assert_eq!(s.active().len(), 1);
    }

    #[test]
    fn holding_restrikes_after_trunk_dies() {
        let mut s = storm();
        // Right under the top edge: the trunk leaves the canvas on its first step
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 2.0 });
        s.tick();
        s.tick();
        assert!(s.active().is_empty());

        let mut restruck = false;
        for _ in 0..120 {
            s.tick();
            if !s.active().is_empty() {
                restruck = true;
                break;
            }
        }
        assert!(restruck);
        assert!(s.elapsed() > 0.8);
    }

    #[test]
    fn new_press_clears_frozen_branches() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        // Held until the trunk leaves the canvas and freezes
        for _ in 0..2000 {
            s.tick();
            if !s.completed().is_empty() {
                break;
            }
        }
        assert!(!s.completed().is_empty());
        assert!(s.residual().is_empty());

        // A second press without a release (another finger) starts over
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        assert!(s.completed().is_empty());
    }

    #[test]
    fn residual_bolts_fade_away() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        for _ in 0..5 {
            s.tick();
        }
        s.handle_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        assert_eq!(s.residual().len(), 1);

        // Slowest fade is ~0.0153 per tick
        for _ in 0..70 {
            s.tick();
        }
        assert!(s.residual().is_empty());
    }

    #[test]
    fn advance_runs_fixed_steps() {
        let mut s = storm();
        assert_eq!(s.advance(1.0 / 60.0), 1);
        assert_eq!(s.advance(0.001), 0);
        let capped = s.advance(5.0);
        assert!(capped > 0 && capped <= FixedTimestep::MAX_STEPS);
    }

    #[test]
    fn resize_keeps_absolute_coordinates() {
        let mut s = storm();
        let before: Vec<Vec2> = s.starfield().stars.iter().map(|st| st.pos).collect();
        s.handle_input(InputEvent::Resize { width: 100.0, height: 100.0 });
        assert_eq!(s.extent(), Vec2::new(100.0, 100.0));
        let after: Vec<Vec2> = s.starfield().stars.iter().map(|st| st.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn render_draws_background_then_stars() {
        let mut s = storm();
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        s.tick();
        let mut buf = CommandBuffer::new();
        s.render(&mut buf);

        assert!(matches!(buf.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(buf.commands[1], DrawCommand::FillRect { .. }));
        let circles = buf
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, 20);
        // One growing trunk: glow + core
        assert_eq!(buf.polylines().count(), 2);
    }

    #[test]
    fn branching_storm_respects_path_cap() {
        let config = StormConfig {
            lightning: LightningConfig {
                branch_probability: 1.0,
                major_split_probability: 1.0,
                max_active_paths: 5,
                ..LightningConfig::default()
            },
            ..StormConfig::default()
        };
        let mut s = Storm::new(config, 800.0, 600.0);
        s.handle_input(InputEvent::PointerDown { x: 400.0, y: 590.0 });
        for _ in 0..300 {
            s.tick();
            assert!(s.active().len() <= 5);
            for b in s.completed() {
                assert!(b.segments.len() >= 3);
            }
        }
    }
}
