//! Fixed-timestep accumulator for the headless simulation.
//!
//! Frame times are fed in explicitly so runs are reproducible; simulation
//! steps always use [`FIXED_DT`].

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Maximum frame time accepted per frame. Longer frames are clamped and the
/// simulation runs slow instead of catching up with a burst of steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulates frame time and runs fixed steps.
#[derive(Debug, Default)]
pub struct FixedStep {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FixedStep {
    /// Create an empty loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of `frame_time` seconds and run as many fixed steps as
    /// fit. `update_fn(dt, total_sim_time)` is called once per step.
    /// Returns the number of steps run.
    pub fn frame(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
            steps += 1;
        }
        self.frame_count += 1;
        steps
    }

    /// Total frames fed.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total fixed steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        let mut lp = FixedStep::new();
        assert_eq!(lp.frame(FIXED_DT, |_, _| {}), 1);
        assert!(lp.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_multiple_steps_advance_sim_time() {
        let mut lp = FixedStep::new();
        let mut times = Vec::new();
        lp.frame(3.0 * FIXED_DT + 1e-9, |_, t| times.push(t));
        assert_eq!(times.len(), 3);
        assert!((times[2] - 2.0 * FIXED_DT).abs() < 1e-12);
        assert_eq!(lp.update_count(), 3);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut lp = FixedStep::new();
        assert_eq!(lp.frame(FIXED_DT * 0.6, |_, _| {}), 0);
        assert_eq!(lp.frame(FIXED_DT * 0.6, |_, _| {}), 1);
        assert_eq!(lp.frame_count(), 2);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut lp = FixedStep::new();
        let steps = lp.frame(10.0, |_, _| {});
        assert!((14..=15).contains(&steps), "got {steps} steps");
        assert!(lp.total_sim_time() <= MAX_FRAME_TIME + 1e-9);
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut lp = FixedStep::new();
        assert_eq!(lp.frame(-1.0, |_, _| {}), 0);
        assert_eq!(lp.total_sim_time(), 0.0);
    }
}
