/// Turns variable display-frame deltas into whole simulation ticks.
///
/// Bolts grow one segment per tick, so tick rate (not frame rate) sets how
/// fast they crawl across the screen.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    carry: f32,
    ticks: u64,
}

impl FixedTimestep {
    /// Most ticks a single frame may run. A long stall (hidden tab) is dropped, not replayed.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self { dt, carry: 0.0, ticks: 0 }
    }

    /// Bank `frame_dt` seconds and return how many ticks are now due.
    /// Negative deltas bank nothing.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let banked = (self.carry + frame_dt.max(0.0)).min(self.dt * Self::MAX_STEPS as f32);
        let steps = (banked / self.dt) as u32;
        self.carry = banked - steps as f32 * self.dt;
        self.ticks += steps as u64;
        steps
    }

    /// Fraction of a tick left in the bank, in [0, 1).
    pub fn alpha(&self) -> f32 {
        self.carry / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn whole_frame_is_one_tick() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(DT), 1);
        assert_eq!(ts.ticks(), 1);
    }

    #[test]
    fn short_frames_carry_over() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(0.008), 0);
        assert!(ts.alpha() > 0.4 && ts.alpha() < 0.5);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut ts = FixedTimestep::new(DT);
        let steps = ts.accumulate(3.0);
        assert!(steps >= FixedTimestep::MAX_STEPS - 1 && steps <= FixedTimestep::MAX_STEPS);
        // The cap drops the stall rather than spreading it over later frames
        assert!(ts.accumulate(0.0) <= 1);
    }

    #[test]
    fn negative_delta_banks_nothing() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(-5.0), 0);
        assert_eq!(ts.alpha(), 0.0);
        assert_eq!(ts.ticks(), 0);
    }
}
