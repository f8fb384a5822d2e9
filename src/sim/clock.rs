//! Fixed-step clock (accumulator pattern) and per-frame debounce timers
//!
//! The render clock is variable; the simulation only ever sees `fixed_dt`.

use crate::countdown;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    fixed_dt: f32,
    /// Frames longer than this are truncated to bound catch-up work
    max_frame: f32,
    accumulator: f32,
    total_steps: u64,
}

impl FixedStepClock {
    pub fn new(fixed_dt: f32, max_frame: f32) -> Self {
        Self {
            fixed_dt,
            max_frame: max_frame.max(fixed_dt),
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Feed one displayed frame's elapsed time and run the fixed steps it pays for.
    ///
    /// When `running` is false (pause/debug overlay) no steps run and the
    /// frame's time is dropped rather than banked. Returns the step count.
    pub fn advance(&mut self, frame_dt: f32, running: bool, mut step: impl FnMut(f32)) -> u32 {
        if !running {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, self.max_frame);

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            step(self.fixed_dt);
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        self.total_steps += u64::from(steps);
        steps
    }

    /// Unsimulated time carried into the next frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Most steps a single frame can trigger
    pub fn max_steps_per_frame(&self) -> u32 {
        (self.max_frame / self.fixed_dt).ceil() as u32
    }
}

/// UI-level countdown decremented once per displayed frame
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    duration: f32,
    remaining: f32,
}

impl Debounce {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    pub fn tick(&mut self, frame_dt: f32) {
        self.remaining = countdown(self.remaining, frame_dt);
    }

    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Start the cooldown window
    pub fn arm(&mut self) {
        self.remaining = self.duration;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
