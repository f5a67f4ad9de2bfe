/// Turns variable frame time into whole fixed ticks.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepper {
    fixed_delta: f32,
    max_catch_up: u32,
    accumulator: f32,
}

impl FixedStepper {
    pub fn new(fixed_delta: f32, max_catch_up: u32) -> Self {
        debug_assert!(fixed_delta > 0.0, "fixed delta must be positive");
        Self {
            fixed_delta,
            max_catch_up: max_catch_up.max(1),
            accumulator: 0.0,
        }
    }

    pub fn fixed_delta(&self) -> f32 {
        self.fixed_delta
    }

    pub fn max_catch_up(&self) -> u32 {
        self.max_catch_up
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Number of fixed ticks to run for this frame. Whole ticks past the
    /// catch-up cap are dropped, only the fractional remainder carries.
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        self.accumulator += frame_delta.max(0.0);
        if self.accumulator < self.fixed_delta {
            return 0;
        }

        let due = (self.accumulator / self.fixed_delta).floor() as u32;
        let count = due.min(self.max_catch_up);
        self.accumulator -= self.fixed_delta * count as f32;
        if due > count {
            log::debug!("fixed step behind by {} ticks, dropping", due - count);
            self.accumulator %= self.fixed_delta;
        }
        count
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
