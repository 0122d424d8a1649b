//! Fixed timestep accumulator
//!
//! Hosts render at whatever rate they get; the jump simulation always runs at
//! `SIM_DT`. Frame time is accumulated and drained in whole ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStepper {
    step: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
    ticks: u64,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStepper {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total ticks run since creation
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    /// Drop any partial tick (after pause or respawn)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Feed one frame of wall time and run the ticks it covers
    ///
    /// `run` gets the substep index within this frame. A frame may run no
    /// ticks at all, so one-shot inputs go through a
    /// [`PressLatch`](crate::sim::PressLatch). Returns the number of ticks run.
    pub fn advance<F>(&mut self, frame_dt: f32, mut run: F) -> u32
    where
        F: FnMut(u32, f32),
    {
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            log::warn!("Ignoring bad frame time {}", frame_dt);
            return 0;
        }

        self.accumulator += frame_dt.min(self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            run(substeps, self.step);
            self.accumulator -= self.step;
            substeps += 1;
        }
        self.ticks += u64::from(substeps);

        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!(
                "Stepper hit {} substeps, {:.4}s carried over",
                substeps,
                self.accumulator
            );
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut stepper = FixedStepper::new(0.01);
        assert_eq!(stepper.advance(0.004, |_, _| {}), 0);
        assert_eq!(stepper.advance(0.004, |_, _| {}), 0);
        assert_eq!(stepper.advance(0.004, |_, _| {}), 1);
        assert!((stepper.alpha() - 0.2).abs() < 1e-3);
        assert_eq!(stepper.ticks(), 1);
    }

    #[test]
    fn test_substep_indices_and_dt() {
        let mut stepper = FixedStepper::new(0.01);
        let mut seen = Vec::new();
        let ran = stepper.advance(0.0305, |i, dt| seen.push((i, dt)));
        assert_eq!(ran, 3);
        assert_eq!(seen, vec![(0, 0.01), (1, 0.01), (2, 0.01)]);
    }

    #[test]
    fn test_caps_substeps_and_frame_time() {
        let mut stepper = FixedStepper::new(SIM_DT).with_max_substeps(4);
        let ran = stepper.advance(10.0, |_, _| {});
        assert_eq!(ran, 4);
        // Long frames are clamped, so the backlog stays bounded
        let mut total = ran;
        for _ in 0..10 {
            total += stepper.advance(0.0, |_, _| {});
        }
        let max_ticks = (MAX_FRAME_DT / SIM_DT).ceil() as u32;
        assert!(total <= max_ticks);
    }

    #[test]
    fn test_ignores_bad_frame_time() {
        let mut stepper = FixedStepper::new(0.01);
        assert_eq!(stepper.advance(-1.0, |_, _| panic!("ran")), 0);
        assert_eq!(stepper.advance(f32::NAN, |_, _| panic!("ran")), 0);
        assert_eq!(stepper.alpha(), 0.0);
    }

    #[test]
    fn test_reset_drops_partial_tick() {
        let mut stepper = FixedStepper::new(0.01);
        stepper.advance(0.009, |_, _| {});
        stepper.reset();
        assert_eq!(stepper.advance(0.002, |_, _| {}), 0);
    }
}
