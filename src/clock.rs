//! The simulation clock: a monotonic time driven by wall-clock deltas and a
//! user-controlled speed multiplier. Speed 0 freezes motion without losing
//! position; there is no seek or rollback.

#[derive(Debug, Clone)]
pub struct SimulationClock {
    time: f64,
    speed: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
        }
    }

    /// Advance by an elapsed real-time delta scaled by the speed multiplier.
    /// Negative deltas are ignored to keep the clock monotonic.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        if elapsed_seconds > 0.0 {
            self.time += elapsed_seconds * self.speed;
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed multiplier. Clamped to non-negative.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
