//! Back-and-forth sweep of the in-flight block

use serde::{Deserialize, Serialize};

use super::geometry::Axis;

/// Drives the in-flight block along its slide axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub axis: Axis,
    /// +1.0 or -1.0
    pub direction: f32,
    /// Units per tick
    pub speed: f32,
    /// Current coordinate along `axis`
    pub position: f32,
    /// Sweep turns around beyond ±bound
    pub bound: f32,
}

impl Oscillator {
    pub fn new(bound: f32, speed: f32) -> Self {
        Self {
            axis: Axis::X,
            direction: 1.0,
            speed,
            position: -bound,
            bound,
        }
    }

    /// Start a new sweep from the far negative bound.
    ///
    /// Direction carries over from the previous block.
    pub fn restart(&mut self, axis: Axis) {
        self.axis = axis;
        self.position = -self.bound;
    }

    /// Move by `speed * direction * dt` (dt in ticks) and bounce past the bounds
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.position += self.speed * self.direction * dt;
        // Strict: sitting exactly on the bound does not flip
        if self.position > self.bound || self.position < -self.bound {
            self.direction = -self.direction;
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_along_direction() {
        let mut osc = Oscillator::new(5.0, 0.5);
        osc.position = 0.0;
        assert_eq!(osc.advance(1.0), 0.5);
        assert_eq!(osc.advance(2.0), 1.5);
        assert_eq!(osc.direction, 1.0);
    }

    #[test]
    fn test_bounces_past_bound() {
        let mut osc = Oscillator::new(5.0, 0.5);
        osc.position = 4.75;
        osc.advance(1.0);
        assert_eq!(osc.position, 5.25);
        assert_eq!(osc.direction, -1.0);
        osc.advance(1.0);
        assert_eq!(osc.position, 4.75);
    }

    #[test]
    fn test_landing_on_bound_does_not_flip() {
        let mut osc = Oscillator::new(5.0, 0.5);
        osc.position = 4.5;
        osc.advance(1.0);
        assert_eq!(osc.position, 5.0);
        assert_eq!(osc.direction, 1.0);
    }

    #[test]
    fn test_restart_keeps_direction() {
        let mut osc = Oscillator::new(5.0, 0.5);
        osc.direction = -1.0;
        osc.position = 2.0;
        osc.restart(Axis::Z);
        assert_eq!(osc.axis, Axis::Z);
        assert_eq!(osc.position, -5.0);
        assert_eq!(osc.direction, -1.0);

        // Heading out of bounds turns it straight back
        osc.advance(1.0);
        assert_eq!(osc.direction, 1.0);
    }

    #[test]
    fn test_sweep_stays_near_bounds() {
        let mut osc = Oscillator::new(5.0, 0.15);
        for _ in 0..10_000 {
            osc.advance(1.0);
            assert!(osc.position.abs() <= 5.0 + 0.15 + 1e-4);
        }
    }
}
